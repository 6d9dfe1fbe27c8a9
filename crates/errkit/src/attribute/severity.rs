//! Severity levels for errors.
//!
//! Severity ranks an issue within your system. It is neither priority (see
//! [`Rank`](super::Rank)) nor the level shown to a user (see
//! [`UserLevel`](super::UserLevel)): invalid user input is usually
//! [`Severity::Info`] for the system while being an error for the user.

use std::fmt;

use errkit_core::Attribute;

/// How severe an error is for the system.
///
/// Variants are ordered from least to most severe, so the highest severity
/// of an error chain is its maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Zero or negligible severity.
    Info,

    /// Unexpected but recoverable.
    Warning,

    /// The operation failed.
    Error,

    /// The system cannot continue as expected.
    Critical,
}

impl Severity {
    /// Returns the lowercase name of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        }
    }

    /// Returns `true` for [`Severity::Error`] and [`Severity::Critical`].
    pub fn is_failure(&self) -> bool {
        *self >= Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Attribute for Severity {
    fn type_label(&self) -> String {
        "Severity".to_string()
    }

    fn value_strings(&self) -> Vec<String> {
        vec![self.to_string()]
    }
}
