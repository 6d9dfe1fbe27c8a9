//! Extra source locations recorded along an error's path.

use errkit_core::{Attribute, Provenance};

/// A source location worth keeping, independent of where it was attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Trace(Provenance);

impl Trace {
    /// Captures the caller's location.
    #[track_caller]
    pub fn here() -> Self {
        Self(Provenance::caller())
    }

    /// Creates a trace for an explicit location.
    pub fn new(provenance: Provenance) -> Self {
        Self(provenance)
    }

    /// Returns the recorded location.
    pub fn provenance(&self) -> Provenance {
        self.0
    }
}

impl Attribute for Trace {
    fn type_label(&self) -> String {
        "Trace".to_string()
    }

    fn value_strings(&self) -> Vec<String> {
        vec![self.0.to_string()]
    }
}
