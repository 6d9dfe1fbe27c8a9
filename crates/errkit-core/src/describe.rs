//! Human-readable rendering of attributed errors.
//!
//! Attributes are listed most recent first. Consecutive attributes attached
//! at the same location are grouped under one `@file:line:column` header.
//!
//! ```text
//! AttributedError {
//!     base<std::io::error::Error>: disk full
//!     identity<uuid::Uuid>: 2f1b5c9e-8d3a-4f6b-9c1e-0a7d5e3b4c21
//!     attributes: [
//!         @src/store.rs:42:18
//!         - Severity:
//!             - error
//!         - Tag<&str>:
//!             - "storage"
//!     ]
//! }
//! ```
//!
//! A base attached as a boxed error has no type label and renders as
//! `base: disk full`.

use std::fmt::Write;

use serde::Deserialize;

use crate::{envelope::AttributedError, provenance::Provenance};

/// Controls how [`describe`] renders an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DescribeConfig {
    /// Indentation unit for each nesting level.
    indent: String,

    /// Whether the identity line is rendered.
    show_identity: bool,

    /// Whether the base error line is rendered.
    show_base: bool,
}

impl DescribeConfig {
    /// Creates a new [`DescribeConfig`].
    ///
    /// # Arguments
    ///
    /// * `indent` - Indentation unit for each nesting level.
    /// * `show_identity` - Whether the identity line is rendered.
    /// * `show_base` - Whether the base error line is rendered.
    pub fn new(indent: impl Into<String>, show_identity: bool, show_base: bool) -> Self {
        Self {
            indent: indent.into(),
            show_identity,
            show_base,
        }
    }

    /// Returns the indentation unit.
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// Returns whether the identity line is rendered.
    pub fn show_identity(&self) -> bool {
        self.show_identity
    }

    /// Returns whether the base error line is rendered.
    pub fn show_base(&self) -> bool {
        self.show_base
    }
}

impl Default for DescribeConfig {
    fn default() -> Self {
        Self::new("    ", true, true)
    }
}

/// Renders `envelope` as a multi-line description.
pub fn describe(envelope: &AttributedError, config: &DescribeConfig) -> String {
    let one = config.indent();
    let two = one.repeat(2);
    let three = one.repeat(3);

    let mut out = String::from("AttributedError {\n");
    if config.show_base() {
        match envelope.base_type() {
            Some(base_type) => {
                let _ = writeln!(out, "{one}base<{base_type}>: {}", envelope.base());
            }
            None => {
                let _ = writeln!(out, "{one}base: {}", envelope.base());
            }
        }
    }
    if config.show_identity() {
        let identity = envelope.identity();
        let _ = writeln!(out, "{one}identity<{}>: {identity}", identity.type_name());
    }

    if envelope.is_empty() {
        let _ = writeln!(out, "{one}attributes: []");
    } else {
        let _ = writeln!(out, "{one}attributes: [");
        let mut last: Option<&Provenance> = None;
        for entry in envelope.entries().iter().rev() {
            let provenance = entry.provenance();
            if last != Some(provenance) {
                last = Some(provenance);
                let _ = writeln!(out, "{two}@{provenance}");
            }
            let attribute = entry.attribute();
            let _ = writeln!(out, "{two}- {}:", attribute.type_label());
            for value in attribute.value_strings() {
                let _ = writeln!(out, "{three}- {value}");
            }
        }
        let _ = writeln!(out, "{one}]");
    }

    out.push('}');
    out
}
