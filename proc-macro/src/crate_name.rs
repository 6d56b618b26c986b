//! Allows retrieving the name of the main crate.

use lazy_static::lazy_static;
use proc_macro2::Span;
use proc_macro_error::abort_call_site;
use std::env;
use syn::Ident;

lazy_static! {
    /// The name under which the main `dbc` crate is available to the crate being compiled.
    pub(crate) static ref CRATE_NAME: String = {
        match proc_macro_crate::crate_name("dbc") {
            Ok(name) => name,
            Err(err) => match env::var("CARGO_PKG_NAME") {
                // Doc tests of `dbc` are built against its own manifest, which does not list
                // `dbc` as a dependency. An unrelated package named `dbc` fails to compile the
                // generated paths instead.
                Ok(val) if val == "dbc" => "dbc".into(),
                _ => abort_call_site!("crate `dbc` must be imported: {}", err),
            },
        }
    };
}

/// Returns the name of the main crate as an identifier for generated code.
pub(crate) fn crate_name() -> Ident {
    Ident::new(&CRATE_NAME, Span::call_site())
}
