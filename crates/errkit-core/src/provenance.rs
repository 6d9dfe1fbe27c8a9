//! Source locations of attachment calls.
//!
//! A [`Provenance`] records where in the source code an attribute was
//! attached to an error. It is captured from the caller through
//! `#[track_caller]`, so every public attachment entry point propagates the
//! location of the code that called it rather than its own.

use std::{fmt, panic::Location};

/// The source location of an attachment call.
///
/// # Examples
///
/// ```
/// use errkit_core::Provenance;
///
/// let here = Provenance::caller();
/// assert!(here.file().ends_with(".rs"));
///
/// let fixed = Provenance::new("src/lib.rs", 10, Some(5));
/// assert_eq!(fixed.to_string(), "src/lib.rs:10:5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Provenance {
    file: &'static str,
    line: u32,
    column: Option<u32>,
}

impl Provenance {
    /// Creates a provenance from explicit parts.
    pub const fn new(file: &'static str, line: u32, column: Option<u32>) -> Self {
        Self { file, line, column }
    }

    /// Captures the location of the caller.
    ///
    /// When called from a `#[track_caller]` function, the location is the one
    /// of the first caller in the chain that is not annotated.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }

    /// Returns the source file identifier.
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Returns the line number.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the column number, if known.
    pub fn column(&self) -> Option<u32> {
        self.column
    }
}

impl From<&'static Location<'static>> for Provenance {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line(), Some(location.column()))
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)?;
        if let Some(column) = self.column {
            write!(f, ":{column}")?;
        }
        Ok(())
    }
}
