//! The fault raised when a contract does not hold.

use std::{
    fmt::{self, Write as _},
    panic::{self, Location},
};
use thiserror::Error;

use crate::{call_site::CallSite, intercept::install_panic_hook};

/// Appended to a payload rendering when one of its values failed to format.
const FORMATTING_FAILED: &str = "<formatting failed>";

/// The kind of contract that was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    /// A precondition, checked before the body of a function runs.
    Require,
    /// A postcondition, checked before a function returns.
    Ensure,
    /// Any other assertion.
    Check,
    /// An invariant of an object.
    Invariant,
}

impl ContractKind {
    /// The token used for this kind in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            ContractKind::Require => "REQUIRE",
            ContractKind::Ensure => "ENSURE",
            ContractKind::Check => "CHECK",
            ContractKind::Invariant => "INVARIANT",
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A violated contract.
///
/// This is the payload of the panic raised by every failing check. It can be recovered with
/// [`catch_violation`](fn.catch_violation.html) or by downcasting the payload returned from
/// [`std::panic::catch_unwind`].
///
/// ```rust
/// use dbc::{ContractKind, ContractViolation};
///
/// let payload = std::panic::catch_unwind(|| dbc::check!(1 + 1 == 3, "arithmetic")).unwrap_err();
/// let violation = payload.downcast_ref::<ContractViolation>().unwrap();
///
/// assert_eq!(violation.kind(), ContractKind::Check);
/// assert_eq!(violation.info(), Some(r#"["arithmetic"]"#));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}:\n\t\t{site}{}", info_line(.info))]
pub struct ContractViolation {
    /// The kind of contract that was violated.
    kind: ContractKind,
    /// Where the violated check was called.
    site: CallSite,
    /// The rendered diagnostic payload.
    info: Option<String>,
}

impl ContractViolation {
    /// The kind of contract that was violated.
    pub fn kind(&self) -> ContractKind {
        self.kind
    }

    /// Where the violated check was called.
    pub fn call_site(&self) -> &CallSite {
        &self.site
    }

    /// The rendered diagnostic payload, if one was supplied.
    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }
}

/// Renders the optional `Info` line of a diagnostic.
fn info_line(info: &Option<String>) -> String {
    match info {
        Some(info) => format!("\n\t\tInfo: {}", info),
        None => String::new(),
    }
}

/// Renders the payload of a check as a list.
///
/// A value whose `Debug` implementation fails leaves a partial rendering instead of a panic, so
/// that the abort path itself cannot break.
fn render_info(info: &[&dyn fmt::Debug]) -> Option<String> {
    if info.is_empty() {
        return None;
    }

    let mut rendered = String::new();
    if write!(rendered, "{:?}", info).is_err() {
        rendered.push_str(FORMATTING_FAILED);
    }

    Some(rendered)
}

/// Raises a contract violation of `kind` for the caller.
///
/// Every public check calls this directly, so the tracked location is the check's caller. The
/// violation is logged at `error` level with the `dbc` target, and the reporting hook is installed
/// so that an uncaught violation still prints its diagnostic.
#[doc(hidden)]
#[cold]
#[inline(never)]
#[track_caller]
pub fn abort(kind: ContractKind, function: Option<&'static str>, info: &[&dyn fmt::Debug]) -> ! {
    let violation = ContractViolation {
        kind,
        site: CallSite::capture(Location::caller(), function),
        info: render_info(info),
    };

    log::error!(target: "dbc", "contract violated: {}", violation);

    install_panic_hook();
    panic::panic_any(violation)
}
