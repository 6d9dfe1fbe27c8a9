//! The high-level component an error emerged from.

use std::fmt;

use errkit_core::Attribute;

/// Where an error originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Logic error or bug in this application.
    Internal,

    /// Failure of a third-party service or API.
    External,

    /// Invalid input or request data.
    Input,

    /// Failure of the host: hardware, OS, resources or environment.
    System,

    /// Communication failure: network, connectivity or protocol.
    Io,
}

impl Source {
    /// Returns the lowercase name of the source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Internal => "internal",
            Source::External => "external",
            Source::Input => "input",
            Source::System => "system",
            Source::Io => "io",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Attribute for Source {
    fn type_label(&self) -> String {
        "Source".to_string()
    }

    fn value_strings(&self) -> Vec<String> {
        vec![self.to_string()]
    }
}
