//! Helpers for handling attributes.

use proc_macro2::Span;
use proc_macro_error::emit_error;
use syn::{parse::Parse, spanned::Spanned, Attribute, Path};

use crate::crate_name::CRATE_NAME;

/// Checks if the given path names the `attr_to_check` attribute of the main crate.
pub(crate) fn is_attr(attr_to_check: &str, path: &Path) -> bool {
    if path.is_ident(attr_to_check) {
        true
    } else if path.segments.len() == 2 {
        // Note that `Path::leading_colon` is not checked here, so paths both with and without a
        // leading colon are accepted here
        path.segments[0].ident == *CRATE_NAME && path.segments[1].ident == attr_to_check
    } else {
        false
    }
}

/// Removes matching attributes, parses them, and then allows visiting them.
///
/// `filter` decides which attributes match and classifies them. The attributes are visited in
/// the order in which they were written, along with the span of their path.
pub(crate) fn visit_matching_attrs_parsed<Class, ParsedAttr: Parse>(
    attributes: &mut Vec<Attribute>,
    mut filter: impl FnMut(&Attribute) -> Option<Class>,
    mut visit: impl FnMut(Class, ParsedAttr, Span),
) {
    let mut i = 0;

    while i < attributes.len() {
        if let Some(class) = filter(&attributes[i]) {
            let attr = attributes.remove(i);
            let span = attr.path.span();

            match syn::parse2::<ParsedAttr>(attr.tokens) {
                Ok(parsed_attr) => visit(class, parsed_attr, span),
                Err(err) => emit_error!(err),
            }
        } else {
            i += 1;
        }
    }
}
