//! The contract checks.
//!
//! All of these return without any effect if the contract holds. If it does not, they raise a
//! [`ContractViolation`](struct.ContractViolation.html) panic attributed to their caller.

use std::fmt;

use crate::{
    invariant::{Described, DescribedInvariant, Invariant},
    violation::{abort, ContractKind},
};

/// Checks that a precondition holds before the body of a function runs.
///
/// ```rust
/// fn divide(a: i32, b: i32) -> i32 {
///     dbc::require(b != 0, &[&a]);
///     a / b
/// }
///
/// assert_eq!(divide(9, 3), 3);
/// ```
#[inline]
#[track_caller]
pub fn require(condition: bool, info: &[&dyn fmt::Debug]) {
    if !condition {
        abort(ContractKind::Require, None, info)
    }
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
///         dbc::ensure(self.a == a, &[]);
///     }
/// }
///
/// Data { a: 0 }.set(5);
/// ```
#[inline]
#[track_caller]
pub fn ensure(condition: bool, info: &[&dyn fmt::Debug]) {
    if !condition {
        abort(ContractKind::Ensure, None, info)
    }
}

/// Checks a condition that is neither a pre- nor a postcondition.
#[inline]
#[track_caller]
pub fn check(condition: bool, info: &[&dyn fmt::Debug]) {
    if !condition {
        abort(ContractKind::Check, None, info)
    }
}

/// Checks the invariant of an object that cannot describe itself.
#[inline]
#[track_caller]
pub fn invariant_simple<T: Invariant + ?Sized>(object: &T, info: &[&dyn fmt::Debug]) {
    if !object.invariant() {
        abort(ContractKind::Invariant, None, info)
    }
}

/// Checks the invariant of an object.
///
/// If the invariant does not hold, the displayed object is appended to `info`.
///
/// ```rust,should_panic
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
/// dbc::invariant(&Date { day: 0, month: 0 }, &[]);
/// ```
#[inline]
#[track_caller]
pub fn invariant<T: DescribedInvariant + ?Sized>(object: &T, info: &[&dyn fmt::Debug]) {
    if !object.invariant() {
        invariant_failed(object, info)
    }
}

/// Appends the described object to the payload and aborts.
#[cold]
#[track_caller]
fn invariant_failed<T: DescribedInvariant + ?Sized>(object: &T, info: &[&dyn fmt::Debug]) -> ! {
    let described = Described(object);
    let mut info: Vec<&dyn fmt::Debug> = info.to_vec();
    info.push(&described);

    abort(ContractKind::Invariant, None, &info)
}
