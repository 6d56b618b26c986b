//! Design by contract for Rust.
//!
//! Design by contract binds a function and its callers to a contract, written as a Hoare triple
//! `{P} C {Q}`: if the precondition `P` holds before the command `C` runs, the postcondition `Q`
//! holds afterwards. This crate checks such contracts at runtime:
//!
//! - [`require!`] checks a precondition,
//! - [`ensure!`] checks a postcondition,
//! - [`check!`] checks anything else,
//! - [`invariant_simple!`] and [`invariant!`] check the invariant of an object.
//!
//! ```rust
//! fn divide(a: i32, b: i32) -> i32 {
//!     dbc::require!(b != 0, a, b);
//!     let quotient = a / b;
//!     dbc::ensure!(quotient * b + a % b == a);
//!     quotient
//! }
//!
//! assert_eq!(divide(7, 2), 3);
//! ```
//!
//! A violated contract is a bug in the program, not an error to handle. The check therefore
//! panics with a [`ContractViolation`] describing where the check was called:
//!
//! ```text
//! REQUIRE:
//!         func (app::divide) 0x55d4c3a1b2f0
//!         File src/main.rs:2
//!         Info: [1, 0]
//! ```
//!
//! Use [`catch_violation`] to assert on violations in tests. An uncaught violation prints its
//! diagnostic through the hook of [`install_panic_hook`], which the first violation installs.
//!
//! Each macro has a function counterpart ([`require`], [`ensure`], [`check`],
//! [`invariant_simple`], [`invariant`]) taking the payload as a slice. The functions resolve the
//! name of their caller from the stack (with the `backtrace` feature), whereas the macros know it
//! at compile time.
//!
//! Contracts can also be attached to functions with the [`requires`], [`ensures`] and
//! [`keeps_invariant`] attributes.

pub use crate::{
    call_site::CallSite,
    checks::{check, ensure, invariant, invariant_simple, require},
    intercept::{catch_violation, install_panic_hook},
    invariant::{DescribedInvariant, Invariant},
    violation::{ContractKind, ContractViolation},
};

/// Checks the preconditions of the function it is attached to.
///
/// ```rust
/// use dbc::requires;
///
/// #[requires(!items.is_empty(), "cannot take the first of nothing")]
/// fn first(items: &[u32]) -> u32 {
///     items[0]
/// }
///
/// assert_eq!(first(&[4, 2]), 4);
/// assert!(dbc::catch_violation(|| first(&[])).is_err());
/// ```
pub use dbc_proc_macro::requires;

/// Checks the postconditions of the function it is attached to.
///
/// The returned value is available as `ret`:
///
/// ```rust
/// use dbc::ensures;
///
/// #[ensures(ret >= a && ret >= b)]
/// fn max(a: i32, b: i32) -> i32 {
///     if a > b { a } else { b }
/// }
///
/// assert_eq!(max(3, 8), 8);
/// ```
pub use dbc_proc_macro::ensures;

/// Checks the invariant of `self` when a method is entered and when it returns.
pub use dbc_proc_macro::keeps_invariant;

mod call_site;
mod checks;
mod intercept;
mod invariant;
mod violation;

/// Items used by the macros of this crate.
///
/// *WARNING* These are not considered to be part of the public API and may change at any time
/// without notice.
#[doc(hidden)]
pub mod __private {
    pub use crate::{
        call_site::{enclosing_function, type_name_of},
        invariant::{described, Described},
        violation::abort,
    };

    /// Runs the body of a function with postconditions, passing its `&mut` arguments along.
    #[inline(always)]
    pub fn call_once<A, R>(args: A, body: impl FnOnce(A) -> R) -> R {
        body(args)
    }
}

/// Expands to the path of the enclosing function.
///
/// Closures are attributed to the function they are defined in.
///
/// ```rust
/// mod parser {
///     pub fn parse() -> &'static str {
///         dbc::function_name!()
///     }
/// }
///
/// assert!(parser::parse().ends_with("parser::parse"));
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __dbc_here() {}
        $crate::__private::enclosing_function($crate::__private::type_name_of(__dbc_here))
    }};
}

/// Checks that a precondition holds before the body of a function runs.
///
/// Any further arguments are included in the diagnostic using their `Debug` implementation.
///
/// ```rust
/// fn divide(a: i32, b: i32) -> i32 {
///     dbc::require!(b != 0);
///     a / b
/// }
///
/// assert_eq!(divide(9, 3), 3);
/// ```
#[macro_export]
macro_rules! require {
    ($condition:expr $(, $info:expr)* $(,)?) => {
        if !$condition {
            $crate::__private::abort(
                $crate::ContractKind::Require,
                ::core::option::Option::Some($crate::function_name!()),
                &[$(&$info as &dyn ::core::fmt::Debug),*],
            )
        }
    };
}

/// Checks that a postcondition holds before a function returns to its caller.
///
/// ```rust
/// struct Data {
///     a: i32,
/// }
///
/// impl Data {
///     fn set(&mut self, a: i32) {
///         self.a = a;
///         dbc::ensure!(self.a == a, "value was not stored");
///     }
/// }
///
/// Data { a: 0 }.set(5);
/// ```
#[macro_export]
macro_rules! ensure {
    ($condition:expr $(, $info:expr)* $(,)?) => {
        if !$condition {
            $crate::__private::abort(
                $crate::ContractKind::Ensure,
                ::core::option::Option::Some($crate::function_name!()),
                &[$(&$info as &dyn ::core::fmt::Debug),*],
            )
        }
    };
}

/// Checks a condition that is neither a pre- nor a postcondition.
///
/// ```rust,should_panic
/// let digits = "12a";
/// dbc::check!(digits.chars().all(|c| c.is_ascii_digit()), digits);
/// ```
#[macro_export]
macro_rules! check {
    ($condition:expr $(, $info:expr)* $(,)?) => {
        if !$condition {
            $crate::__private::abort(
                $crate::ContractKind::Check,
                ::core::option::Option::Some($crate::function_name!()),
                &[$(&$info as &dyn ::core::fmt::Debug),*],
            )
        }
    };
}

/// Checks the invariant of an object that only implements [`Invariant`].
#[macro_export]
macro_rules! invariant_simple {
    ($object:expr $(, $info:expr)* $(,)?) => {
        if !$crate::Invariant::invariant(&$object) {
            $crate::__private::abort(
                $crate::ContractKind::Invariant,
                ::core::option::Option::Some($crate::function_name!()),
                &[$(&$info as &dyn ::core::fmt::Debug),*],
            )
        }
    };
}

/// Checks the invariant of an object that implements [`DescribedInvariant`].
///
/// If the invariant does not hold, the displayed object is appended to the diagnostic.
///
/// ```rust
/// use std::fmt;
///
/// struct Date {
///     day: u8,
///     month: u8,
/// }
///
/// impl dbc::Invariant for Date {
///     fn invariant(&self) -> bool {
///         (1..=31).contains(&self.day) && (1..=12).contains(&self.month)
///     }
/// }
///
/// impl fmt::Display for Date {
///     fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
///         write!(f, "Day:{} Month:{}", self.day, self.month)
///     }
/// }
///
/// let violation = dbc::catch_violation(|| dbc::invariant!(Date { day: 0, month: 0 })).unwrap_err();
/// assert!(violation.to_string().contains("Day:0 Month:0"));
///
/// dbc::invariant!(Date { day: 15, month: 6 });
/// ```
#[macro_export]
macro_rules! invariant {
    ($object:expr $(, $info:expr)* $(,)?) => {
        match &$object {
            object => {
                if !$crate::Invariant::invariant(object) {
                    $crate::__private::abort(
                        $crate::ContractKind::Invariant,
                        ::core::option::Option::Some($crate::function_name!()),
                        &[
                            $(&$info as &dyn ::core::fmt::Debug,)*
                            &$crate::__private::described(object) as &dyn ::core::fmt::Debug,
                        ],
                    )
                }
            }
        }
    };
}
