//! Defines the contract attributes and how they are rendered into a function.

use proc_macro2::{Group, Ident, Span, TokenStream, TokenTree};
use proc_macro_error::{emit_error, emit_warning};
use quote::{quote, quote_spanned};
use syn::{
    parenthesized,
    parse::{Parse, ParseStream},
    parse2,
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Block, Expr, ExprLit, FnArg, ItemFn, Lit, Pat, PatIdent, PatType, Receiver,
    ReturnType, Signature, Stmt, Token, Type, TypeReference,
};

use crate::{
    crate_name::crate_name,
    documentation::generate_docs,
    helpers::{is_attr, visit_matching_attrs_parsed},
};

/// The custom keywords used in contract attributes.
mod custom_keywords {
    use syn::custom_keyword;

    custom_keyword!(no_doc);
}

/// The attributes that declare a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContractAttrKind {
    /// `#[requires(condition, info...)]`
    Requires,
    /// `#[ensures(condition, info...)]`
    Ensures,
    /// `#[keeps_invariant(info...)]`
    KeepsInvariant,
}

impl ContractAttrKind {
    /// All contract attributes.
    const ALL: [ContractAttrKind; 3] = [
        ContractAttrKind::Requires,
        ContractAttrKind::Ensures,
        ContractAttrKind::KeepsInvariant,
    ];

    /// The name of the attribute.
    fn name(self) -> &'static str {
        match self {
            ContractAttrKind::Requires => "requires",
            ContractAttrKind::Ensures => "ensures",
            ContractAttrKind::KeepsInvariant => "keeps_invariant",
        }
    }

    /// Returns which contract attribute `attr` is, if any.
    fn of(attr: &Attribute) -> Option<ContractAttrKind> {
        ContractAttrKind::ALL
            .iter()
            .copied()
            .find(|kind| is_attr(kind.name(), &attr.path))
    }
}

/// The arguments of a contract attribute.
pub(crate) enum ContractArgs {
    /// A request not to generate contract documentation for the function.
    NoDoc(custom_keywords::no_doc),
    /// The condition (if the attribute has one) followed by the diagnostic payload.
    Exprs(Punctuated<Expr, Token![,]>),
}

impl Parse for ContractArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let fork = input.fork();

        if fork.parse::<custom_keywords::no_doc>().is_ok() && fork.is_empty() {
            Ok(ContractArgs::NoDoc(input.parse()?))
        } else {
            Ok(ContractArgs::Exprs(Punctuated::parse_terminated(input)?))
        }
    }
}

/// The arguments of a contract attribute that is still attached to the function.
///
/// These are either surrounded by parentheses or missing entirely.
struct InnerArgs(ContractArgs);

impl Parse for InnerArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.is_empty() {
            Ok(InnerArgs(ContractArgs::Exprs(Punctuated::new())))
        } else {
            let content;
            parenthesized!(content in input);

            Ok(InnerArgs(content.parse()?))
        }
    }
}

/// A single contract of a function.
pub(crate) enum Contract {
    /// A precondition.
    Requires {
        /// The condition that must hold when the function is entered.
        condition: Expr,
        /// The diagnostic payload.
        info: Vec<Expr>,
    },
    /// A postcondition.
    Ensures {
        /// The condition that must hold when the function returns.
        condition: Expr,
        /// The diagnostic payload.
        info: Vec<Expr>,
    },
    /// The invariant of `self`.
    KeepsInvariant {
        /// The diagnostic payload.
        info: Vec<Expr>,
        /// The span of the attribute.
        span: Span,
    },
    /// A request not to generate documentation.
    NoDoc {
        /// The span of the `no_doc` keyword.
        span: Span,
    },
}

impl Contract {
    /// Creates the contracts declared by an attribute of the given kind.
    fn from_attr(kind: ContractAttrKind, args: ContractArgs, span: Span) -> Vec<Contract> {
        let exprs = match args {
            ContractArgs::NoDoc(no_doc) if kind == ContractAttrKind::KeepsInvariant => {
                return vec![
                    Contract::NoDoc {
                        span: no_doc.span(),
                    },
                    Contract::KeepsInvariant {
                        info: Vec::new(),
                        span,
                    },
                ];
            }
            ContractArgs::NoDoc(no_doc) => {
                return vec![Contract::NoDoc {
                    span: no_doc.span(),
                }]
            }
            ContractArgs::Exprs(exprs) => exprs,
        };
        let mut exprs = exprs.into_iter();

        if kind == ContractAttrKind::KeepsInvariant {
            return vec![Contract::KeepsInvariant {
                info: exprs.collect(),
                span,
            }];
        }

        let condition = match exprs.next() {
            Some(condition) => condition,
            None => {
                emit_error!(
                    span,
                    "expected a condition";
                    help = "try `#[{}(some_condition)]`", kind.name()
                );
                return Vec::new();
            }
        };

        if let Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) = &condition
        {
            emit_error!(
                lit,
                "conditions are boolean expressions, not strings";
                help = "try `#[{}({})]`", kind.name(), lit.value()
            );
        }

        let info = exprs.collect();

        vec![match kind {
            ContractAttrKind::Requires => Contract::Requires { condition, info },
            _ => Contract::Ensures { condition, info },
        }]
    }
}

/// Returns a copy of the function without any contract attributes.
pub(crate) fn without_contracts(function: &ItemFn) -> ItemFn {
    let mut function = function.clone();
    function
        .attrs
        .retain(|attr| ContractAttrKind::of(attr).is_none());

    function
}

/// Returns whether the method has a `self` receiver, and whether it is a reference.
fn receiver(sig: &Signature) -> Option<bool> {
    match sig.inputs.first() {
        Some(FnArg::Receiver(receiver)) => Some(receiver.reference.is_some()),
        _ => None,
    }
}

/// The name the body uses for a `&mut self` receiver once it runs inside a closure.
const SELF_PARAM: &str = "__dbc_self";

/// A mutable reference argument that is handed to the body as a closure parameter.
///
/// A closure capturing a `&mut` argument can only lend out borrows that end with the closure, so
/// a body returning a borrow of such an argument gets it as a parameter instead.
struct Reborrow {
    /// The closure parameter.
    param: TokenStream,
    /// The reborrow of the argument passed for it.
    arg: TokenStream,
}

/// Checks whether the receiver is `&mut self`.
fn is_mutable_borrow(receiver: &Receiver) -> bool {
    receiver.reference.is_some() && receiver.mutability.is_some()
}

/// Checks whether the body gets `self` as a closure parameter.
fn reborrows_self(sig: &Signature) -> bool {
    matches!(sig.inputs.first(), Some(FnArg::Receiver(receiver)) if is_mutable_borrow(receiver))
}

/// Finds the mutable reference arguments of the function.
///
/// Only the receiver and arguments bound to a plain identifier are considered.
fn mutable_borrows(sig: &Signature) -> Vec<Reborrow> {
    sig.inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Receiver(receiver) if is_mutable_borrow(receiver) => {
                let self_token = &receiver.self_token;
                let param = Ident::new(SELF_PARAM, self_token.span);

                Some(Reborrow {
                    param: quote!(#param),
                    arg: quote!(&mut *#self_token),
                })
            }
            FnArg::Typed(PatType { pat, ty, .. }) => match (&**pat, &**ty) {
                (
                    Pat::Ident(PatIdent {
                        by_ref: None,
                        mutability,
                        ident,
                        subpat: None,
                        ..
                    }),
                    Type::Reference(TypeReference {
                        mutability: Some(_),
                        ..
                    }),
                ) if ident != "self" => Some(Reborrow {
                    param: quote!(#mutability #ident),
                    arg: quote!(&mut *#ident),
                }),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

/// Replaces every use of the `self` value in `tokens` with `replacement`.
///
/// Paths starting with `self::` name a module and are left alone.
fn replace_self(tokens: TokenStream, replacement: &str) -> TokenStream {
    let mut tokens = tokens.into_iter().peekable();
    let mut replaced = TokenStream::new();

    while let Some(token) = tokens.next() {
        let token = match token {
            TokenTree::Ident(ident) if ident == "self" => {
                let is_path = matches!(
                    tokens.peek(),
                    Some(TokenTree::Punct(next)) if next.as_char() == ':'
                );

                if is_path {
                    TokenTree::Ident(ident)
                } else {
                    TokenTree::Ident(Ident::new(replacement, ident.span()))
                }
            }
            TokenTree::Group(group) => {
                let mut inner = Group::new(
                    group.delimiter(),
                    replace_self(group.stream(), replacement),
                );
                inner.set_span(group.span());

                TokenTree::Group(inner)
            }
            token => token,
        };

        replaced.extend(std::iter::once(token));
    }

    replaced
}

/// Checks whether the type contains anything a closure return type cannot spell out.
fn needs_inference(tokens: TokenStream) -> bool {
    let mut tokens = tokens.into_iter().peekable();

    while let Some(token) = tokens.next() {
        match token {
            TokenTree::Ident(ident) if ident == "impl" => return true,
            TokenTree::Punct(punct) if punct.as_char() == '&' => {
                let has_lifetime = matches!(
                    tokens.peek(),
                    Some(TokenTree::Punct(next)) if next.as_char() == '\''
                );

                if !has_lifetime {
                    return true;
                }
            }
            TokenTree::Punct(punct) if punct.as_char() == '\'' => {
                if matches!(tokens.peek(), Some(TokenTree::Ident(ident)) if ident == "_") {
                    return true;
                }
            }
            TokenTree::Group(group) => {
                if needs_inference(group.stream()) {
                    return true;
                }
            }
            _ => (),
        }
    }

    false
}

/// The return type annotation of the closure running the body.
fn closure_return_type(output: &ReturnType) -> TokenStream {
    match output {
        ReturnType::Type(arrow, ty) if !needs_inference(quote!(#ty)) => quote!(#arrow #ty),
        _ => TokenStream::new(),
    }
}

/// Renders the given function and applies all contract attributes to it.
///
/// `kind` and `attr` describe the attribute that is being expanded; all other contract
/// attributes on the function are removed and rendered along with it.
pub(crate) fn render_function(
    kind: ContractAttrKind,
    attr: TokenStream,
    mut function: ItemFn,
) -> TokenStream {
    let attr_span = if attr.is_empty() {
        Span::call_site()
    } else {
        attr.span()
    };

    let mut contracts = Vec::new();

    match parse2::<ContractArgs>(attr) {
        Ok(args) => contracts.extend(Contract::from_attr(kind, args, attr_span)),
        Err(err) => emit_error!(err),
    }

    visit_matching_attrs_parsed(
        &mut function.attrs,
        ContractAttrKind::of,
        |kind, args: InnerArgs, span| contracts.extend(Contract::from_attr(kind, args.0, span)),
    );

    let krate = crate_name();
    let by_ref_receiver = receiver(&function.sig);

    let mut no_doc_span = None;
    let mut entry_invariants = Vec::new();
    let mut requires = Vec::new();
    let mut ensures = Vec::new();
    let mut exit_invariants = Vec::new();

    for contract in contracts.iter() {
        match contract {
            Contract::Requires { condition, info } => requires.push(quote_spanned! { condition.span()=>
                ::#krate::require!(#condition #(, #info)*);
            }),
            Contract::Ensures { condition, info } => ensures.push(quote_spanned! { condition.span()=>
                ::#krate::ensure!(#condition #(, #info)*);
            }),
            Contract::KeepsInvariant { info, span } => match by_ref_receiver {
                Some(by_ref) => {
                    let check = quote_spanned! { *span=>
                        ::#krate::invariant!(self #(, #info)*);
                    };

                    if by_ref {
                        exit_invariants.push(check.clone());
                    }
                    entry_invariants.push(check);
                }
                None => emit_error!(
                    *span,
                    "`keeps_invariant` can only be used on methods with a `self` receiver"
                ),
            },
            Contract::NoDoc { span } => no_doc_span = Some(*span),
        }
    }

    let checks_on_return = !ensures.is_empty() || !exit_invariants.is_empty();
    let checks_anything = checks_on_return || !entry_invariants.is_empty() || !requires.is_empty();

    if let Some(constness) = &function.sig.constness {
        if checks_anything {
            emit_error!(constness, "contracts cannot be checked in a `const fn`");
        }
    }

    if let Some(asyncness) = &function.sig.asyncness {
        if checks_on_return {
            emit_error!(
                asyncness,
                "the contract of an `async fn` can only be checked when it is entered"
            );
        }
    }

    match no_doc_span {
        Some(span) if !checks_anything => {
            emit_warning!(span, "this is ignored, there is no contract to document")
        }
        Some(_) => (),
        None if checks_anything => function.attrs.push(generate_docs(&contracts)),
        None => (),
    }

    let entry_checks = entry_invariants.iter().chain(requires.iter());

    if checks_on_return {
        let block = &function.block;
        let return_type = closure_return_type(&function.sig.output);
        let exit_checks = ensures.iter().chain(exit_invariants.iter());
        let reborrows = mutable_borrows(&function.sig);

        let call = if reborrows.is_empty() {
            quote! { (|| #return_type #block)() }
        } else {
            let block = if reborrows_self(&function.sig) {
                replace_self(quote!(#block), SELF_PARAM)
            } else {
                quote!(#block)
            };
            let params = reborrows.iter().map(|reborrow| &reborrow.param);
            let args = reborrows.iter().map(|reborrow| &reborrow.arg);

            quote! {
                ::#krate::__private::call_once((#(#args,)*), |(#(#params,)*)| #return_type #block)
            }
        };

        let body = quote! {{
            #(#entry_checks)*
            #[allow(clippy::redundant_closure_call, clippy::let_unit_value)]
            let ret = #call;
            #(#exit_checks)*
            ret
        }};

        function.block = Box::new(parse2::<Block>(body).expect("valid block"));
    } else {
        for check in entry_checks.rev() {
            function
                .block
                .stmts
                .insert(0, parse2::<Stmt>(check.clone()).expect("valid statement"));
        }
    }

    quote! { #function }
}
