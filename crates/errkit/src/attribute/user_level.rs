//! Error level from the user's perspective.

use std::fmt;

use errkit_core::Attribute;

/// How an error should be conveyed to a user.
///
/// Pairs well with [`Localization`](super::Localization) to present a
/// message with the matching visual treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserLevel {
    /// Informational, e.g. a cancelled operation.
    Info,

    /// The operation went through, with caveats.
    Warning,

    /// The operation failed for the user.
    Error,
}

impl UserLevel {
    /// Returns the lowercase name of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserLevel::Info => "info",
            UserLevel::Warning => "warning",
            UserLevel::Error => "error",
        }
    }
}

impl fmt::Display for UserLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Attribute for UserLevel {
    fn type_label(&self) -> String {
        "User level".to_string()
    }

    fn value_strings(&self) -> Vec<String> {
        vec![self.to_string()]
    }
}
