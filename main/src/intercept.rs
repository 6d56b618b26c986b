//! Intercepting contract violations at the edges of a program.

use std::{
    panic::{self, AssertUnwindSafe},
    sync::Once,
    thread,
};

use crate::violation::ContractViolation;

/// Runs `f`, returning the contract violation it raised instead of unwinding further.
///
/// This is meant for test harnesses and top-level recovery points. Panics that are not contract
/// violations are resumed unchanged.
///
/// ```rust
/// use dbc::ContractKind;
///
/// fn divide(a: i32, b: i32) -> i32 {
///     dbc::require!(b != 0, a);
///     a / b
/// }
///
/// assert_eq!(dbc::catch_violation(|| divide(6, 3)), Ok(2));
///
/// let violation = dbc::catch_violation(|| divide(1, 0)).unwrap_err();
/// assert_eq!(violation.kind(), ContractKind::Require);
/// assert!(violation.call_site().function().ends_with("divide"));
/// ```
pub fn catch_violation<F, R>(f: F) -> Result<R, ContractViolation>
where
    F: FnOnce() -> R,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<ContractViolation>() {
            Ok(violation) => Err(*violation),
            Err(payload) => panic::resume_unwind(payload),
        },
    }
}

/// Guards the installation of the reporting hook.
static REPORTING_HOOK: Once = Once::new();

/// Installs a panic hook that reports contract violations with their full diagnostic.
///
/// The default hook only knows how to print string payloads. Any other panic is passed on to the
/// hook that was installed before.
///
/// Every violation installs this hook before it unwinds, so calling it is only needed to have it
/// in place before the first violation. The hook is installed at most once per process.
///
/// ```rust,no_run
/// fn main() {
///     dbc::install_panic_hook();
///
///     dbc::check!(std::env::args().count() > 1, "expected an argument");
/// }
/// ```
pub fn install_panic_hook() {
    REPORTING_HOOK.call_once(|| {
        let previous = panic::take_hook();

        panic::set_hook(Box::new(move |info| {
            match info.payload().downcast_ref::<ContractViolation>() {
                Some(violation) => {
                    let thread = thread::current();
                    let name = thread.name().unwrap_or("<unnamed>");

                    eprintln!("thread '{}' violated a contract: {}", name, violation);
                }
                None => previous(info),
            }
        }));
    });
}
