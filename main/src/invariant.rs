//! Capabilities of objects that can validate themselves.

use std::fmt;

/// An object that can tell whether it is in a consistent state.
///
/// This is all that [`invariant_simple`](fn.invariant_simple.html) needs.
///
/// ```rust
/// use dbc::Invariant;
///
/// struct Percentage(u8);
///
/// impl Invariant for Percentage {
///     fn invariant(&self) -> bool {
///         self.0 <= 100
///     }
/// }
///
/// dbc::invariant_simple!(Percentage(42));
/// ```
pub trait Invariant {
    /// Returns `true` if the object is internally consistent.
    fn invariant(&self) -> bool;
}

/// An object that can validate itself and describe itself to a human.
///
/// This is implemented for every type that implements both [`Invariant`] and
/// [`Display`](std::fmt::Display). On a violation, [`invariant`](fn.invariant.html) appends the
/// displayed object to the diagnostic.
pub trait DescribedInvariant: Invariant + fmt::Display {}

impl<T: Invariant + fmt::Display + ?Sized> DescribedInvariant for T {}

impl<T: Invariant + ?Sized> Invariant for &T {
    fn invariant(&self) -> bool {
        (**self).invariant()
    }
}

impl<T: Invariant + ?Sized> Invariant for &mut T {
    fn invariant(&self) -> bool {
        (**self).invariant()
    }
}

impl<T: Invariant + ?Sized> Invariant for Box<T> {
    fn invariant(&self) -> bool {
        (**self).invariant()
    }
}

/// Renders a described object with its `Display` implementation where a `Debug` value is needed.
#[doc(hidden)]
pub struct Described<'a, T: ?Sized>(pub &'a T);

/// Wraps an object for the payload of [`invariant!`](macro.invariant.html).
#[doc(hidden)]
pub fn described<T: DescribedInvariant + ?Sized>(object: &T) -> Described<'_, T> {
    Described(object)
}

impl<T: fmt::Display + ?Sized> fmt::Debug for Described<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}
