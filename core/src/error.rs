//! Error classification shared across Delta crates.

use std::fmt;

/// Marker reported for a diagnostic scope that is not open.
pub const NONE_MARKER: &str = "none";

/// Top-level category of a conversion failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input unreadable or output unwritable.
    Io,
    /// Unbalanced parentheses or a malformed quoted atom.
    Syntax,
    /// Illegal nesting, misplaced or unknown command, wrong argument count.
    Structural,
    /// A variable with no binding in the compiled graph.
    Resolution,
    /// Configuration file unreadable or invalid.
    Config,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Io => "io error",
            ErrorKind::Syntax => "syntax error",
            ErrorKind::Structural => "structural error",
            ErrorKind::Resolution => "resolution error",
            ErrorKind::Config => "config error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name of an optional diagnostic scope, or `NONE_MARKER`.
pub fn scope_name(name: Option<&str>) -> String {
    name.unwrap_or(NONE_MARKER).to_string()
}
