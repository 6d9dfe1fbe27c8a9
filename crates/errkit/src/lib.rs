//! Errkit - Attach strongly-typed attributes to errors as they propagate.
//!
//! Any error can be enriched with attributes at every layer it passes
//! through. The first attachment wraps the error in an [`AttributedError`]
//! envelope with a stable identity; later attachments extend the same
//! envelope. Each attribute remembers the source location that attached it,
//! and queries return the most recent attribute first.
//!
//! # Examples
//!
//! ```
//! use errkit::prelude::*;
//!
//! #[derive(Debug)]
//! struct StoreError;
//!
//! impl std::fmt::Display for StoreError {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "row not found")
//!     }
//! }
//!
//! impl std::error::Error for StoreError {}
//!
//! fn load() -> Result<(), AttributedError> {
//!     Err(StoreError).attributes(attributes![Severity::Warning, Tag::new("store")])
//! }
//!
//! fn handle() -> Result<(), AttributedError> {
//!     load().attributes(attributes![
//!         Severity::Error,
//!         Localization::new("Your order could not be found."),
//!     ])
//! }
//!
//! let error = handle().unwrap_err();
//!
//! assert_eq!(error.to_string(), "row not found");
//! assert_eq!(error.severity(), Some(Severity::Error));
//! assert_eq!(error.highest_severity(), Some(Severity::Error));
//! assert_eq!(error.tags_of::<&str>(), vec![&"store"]);
//! assert_eq!(error.localized_message(), Some("Your order could not be found."));
//! assert!(error.downcast_base_ref::<StoreError>().is_some());
//!
//! // The alternate form renders every attribute with its location.
//! assert!(format!("{error:#}").contains("- Severity:"));
//! ```
//!
//! # Configuration
//!
//! A process-wide [`Attributor`] backs the extension traits. Install one
//! built from a [`KitConfig`](config::KitConfig) at startup to pick the
//! identity generator and description style; otherwise defaults apply.

pub mod attribute;
pub mod config;

mod access;
mod error;
mod result;

pub use errkit_core::{
    AnyTag, Attribute, AttributeKind, AttributedError, Attributes, AttributesOf, Attributor,
    AttributorBuilder, BoxError, DescribeConfig, Entry, ErrorExt, Identifiable, IdentifiableExt,
    Identity, IdentityError, IdentityGenerator, InstallError, Provenance, SequenceGenerator,
    UuidGenerator, attach, attribute_of, attributes, attributes_of, base, describe, envelope,
    identifiable, identity_of, install, register_identifiable,
};

pub use access::AttributeAccess;
pub use error::ConfigError;
pub use result::{IdentifiedResultExt, ResultExt};

/// The traits, macros and attributes most code needs.
pub mod prelude {
    pub use crate::{
        AttributeAccess, AttributedError, ErrorExt, IdentifiableExt, IdentifiedResultExt,
        ResultExt,
        attribute::{DebugInfo, Localization, Rank, Severity, Source, Tag, Trace, UserLevel},
        attributes, debug_info,
    };
}
