//! Procedural macros for `dbc`.
//!
//! The attributes of this crate expand to the checking macros of `dbc`, so they must be used
//! through that crate.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, ItemFn};

use crate::contract::{render_function, without_contracts, ContractAttrKind};

mod contract;
mod crate_name;
mod documentation;
mod helpers;

/// Checks preconditions when the function is entered.
///
/// The first argument is the condition, any further arguments are included in the diagnostic:
///
/// ```rust,ignore
/// #[requires(b != 0, a, b)]
/// fn divide(a: i32, b: i32) -> i32 {
///     a / b
/// }
/// ```
#[proc_macro_attribute]
#[proc_macro_error::proc_macro_error]
pub fn requires(attr: TokenStream, function: TokenStream) -> TokenStream {
    expand(ContractAttrKind::Requires, attr, function)
}

/// Checks postconditions before the function returns.
///
/// The returned value can be referred to as `ret`:
///
/// ```rust,ignore
/// #[ensures(ret * ret <= x, x)]
/// fn isqrt(x: u64) -> u64 {
///     (x as f64).sqrt() as u64
/// }
/// ```
#[proc_macro_attribute]
#[proc_macro_error::proc_macro_error]
pub fn ensures(attr: TokenStream, function: TokenStream) -> TokenStream {
    expand(ContractAttrKind::Ensures, attr, function)
}

/// Checks the invariant of `self` when the method is entered and before it returns.
///
/// Methods taking `self` by value only have the invariant checked on entry.
///
/// ```rust,ignore
/// impl Account {
///     #[keeps_invariant]
///     fn withdraw(&mut self, amount: u64) {
///         self.balance -= amount;
///     }
/// }
/// ```
#[proc_macro_attribute]
#[proc_macro_error::proc_macro_error]
pub fn keeps_invariant(attr: TokenStream, function: TokenStream) -> TokenStream {
    expand(ContractAttrKind::KeepsInvariant, attr, function)
}

/// Renders the function with all of its contract attributes applied.
fn expand(kind: ContractAttrKind, attr: TokenStream, function: TokenStream) -> TokenStream {
    let attr: TokenStream2 = attr.into();
    let function = parse_macro_input!(function as ItemFn);

    // Without its contracts, so that the remaining attributes do not report the same errors again.
    let dummy_function = without_contracts(&function);
    proc_macro_error::set_dummy(quote! {
        #dummy_function
    });

    render_function(kind, attr, function).into()
}
