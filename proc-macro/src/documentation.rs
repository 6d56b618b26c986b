//! Generates documentation describing the contract of a function.

use quote::quote;
use syn::{parse_quote, Attribute, Expr};

use crate::contract::Contract;

/// Renders the conditions as a markdown list.
fn render_list<'a>(docs: &mut String, title: &str, conditions: impl Iterator<Item = &'a Expr>) {
    let mut conditions = conditions.peekable();

    if conditions.peek().is_none() {
        return;
    }

    docs.push_str(title);
    docs.push_str("\n\n");

    for condition in conditions {
        docs.push_str(&format!("- `{}`\n", quote!(#condition)));
    }

    docs.push('\n');
}

/// Generates a doc attribute listing the given contracts.
pub(crate) fn generate_docs(contracts: &[Contract]) -> Attribute {
    let mut docs = String::from("\n# Contract\n\n");

    render_list(
        &mut docs,
        "Requires:",
        contracts.iter().filter_map(|contract| match contract {
            Contract::Requires { condition, .. } => Some(condition),
            _ => None,
        }),
    );
    render_list(
        &mut docs,
        "Ensures:",
        contracts.iter().filter_map(|contract| match contract {
            Contract::Ensures { condition, .. } => Some(condition),
            _ => None,
        }),
    );

    if contracts
        .iter()
        .any(|contract| matches!(contract, Contract::KeepsInvariant { .. }))
    {
        docs.push_str("Keeps the invariant of `self`.\n");
    }

    parse_quote!(#[doc = #docs])
}
