//! Captures where a contract check was invoked.
//!
//! The file, line and column come from [`Location::caller`], which is exact as long as every
//! function between the user's code and the capture is `#[track_caller]`. The function name is
//! either handed in by the checking macros or resolved from the stack, which is also where the
//! program counter comes from.

use std::{borrow::Cow, fmt, panic::Location};

/// The name reported when the calling function cannot be determined.
const UNKNOWN_FUNCTION: &str = "<unknown>";

/// Where a contract check was called from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// The path of the calling function.
    function: Cow<'static, str>,
    /// The program counter inside the calling function, `0` if unknown.
    address: usize,
    /// The source file of the call.
    file: &'static str,
    /// The line of the call.
    line: u32,
    /// The column of the call.
    column: u32,
}

impl CallSite {
    /// Captures the call site at `location`.
    ///
    /// If `function` is `None`, the function name is resolved from the current stack.
    pub(crate) fn capture(
        location: &'static Location<'static>,
        function: Option<&'static str>,
    ) -> CallSite {
        let (address, resolved_function) = resolve::frame_at(location);

        let function = match (function, resolved_function) {
            (Some(name), _) => Cow::Borrowed(name),
            (None, Some(name)) => Cow::Owned(outside_closures(&name).to_owned()),
            (None, None) => Cow::Borrowed(UNKNOWN_FUNCTION),
        };

        CallSite {
            function,
            address,
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }

    /// The path of the calling function, or `<unknown>`.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// The program counter inside the calling function, or `0` if it could not be determined.
    pub fn address(&self) -> usize {
        self.address
    }

    /// The source file of the call.
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// The line of the call.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The column of the call.
    pub fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "func ({}) {:#x}\n\t\tFile {}:{}",
            self.function, self.address, self.file, self.line
        )
    }
}

/// Strips the helper item and any closure segments from the path of an item nested in a function.
///
/// Used by [`function_name!`](macro.function_name.html).
#[doc(hidden)]
pub fn enclosing_function(nested_item_path: &'static str) -> &'static str {
    match nested_item_path.rfind("::") {
        Some(index) => outside_closures(&nested_item_path[..index]),
        None => nested_item_path,
    }
}

/// Strips trailing closure segments, naming the function the closures are defined in.
///
/// Both the legacy (`{{closure}}`) and the v0 (`{closure#0}`) spelling are recognized.
fn outside_closures(mut path: &str) -> &str {
    while let Some(index) = path.rfind("::") {
        let segment = &path[index + 2..];

        if segment == "{{closure}}" || segment.starts_with("{closure#") {
            path = &path[..index];
        } else {
            break;
        }
    }

    path
}

/// Returns the type name of the given value.
#[doc(hidden)]
pub fn type_name_of<T>(_: T) -> &'static str {
    std::any::type_name::<T>()
}

cfg_if::cfg_if! {
    if #[cfg(feature = "backtrace")] {
        mod resolve {
            use std::{panic::Location, path::Path};

            /// Walks the current stack for the frame executing the code at `location`.
            ///
            /// Returns its program counter and the demangled name of the function containing
            /// `location`, taking inlining into account.
            #[inline(never)]
            pub(super) fn frame_at(location: &Location) -> (usize, Option<String>) {
                let file = Path::new(location.file());
                let mut found = None;

                backtrace::trace(|frame| {
                    backtrace::resolve_frame(frame, |symbol| {
                        if found.is_some() || symbol.lineno() != Some(location.line()) {
                            return;
                        }

                        if symbol.filename().map_or(false, |path| path.ends_with(file)) {
                            let name = symbol.name().map(|name| format!("{:#}", name));

                            found = Some((frame.ip() as usize, name));
                        }
                    });

                    found.is_none()
                });

                match found {
                    Some((address, name)) => (address, name),
                    None => (0, None),
                }
            }
        }
    } else {
        mod resolve {
            use std::panic::Location;

            /// Without stack walking, neither the program counter nor the function are known.
            pub(super) fn frame_at(_location: &Location) -> (usize, Option<String>) {
                (0, None)
            }
        }
    }
}
