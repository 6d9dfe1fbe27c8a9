//! Standard leaf attributes.
//!
//! This module provides a small vocabulary of attributes that most services
//! need:
//! - Classification of how bad an error is, for the system ([`Severity`]) and
//!   for the user ([`UserLevel`])
//! - Priority of the underlying issue ([`Rank`])
//! - The high-level component the error emerged from ([`Source`])
//! - Free-form, typed labels ([`Tag`])
//! - Extra locations and values for debugging ([`Trace`], [`DebugInfo`])
//! - A user-facing message ([`Localization`])
//!
//! # Overview
//!
//! Each attribute carries a short type label and lowercase value strings, so
//! descriptions stay readable. The typed accessors on
//! [`AttributeAccess`](crate::AttributeAccess) read them back.
//!
//! # Example
//!
//! ```
//! use errkit::prelude::*;
//!
//! let error = std::io::Error::other("connection reset").attributes(attributes![
//!     Severity::Error,
//!     UserLevel::Warning,
//!     Source::Io,
//!     Tag::new("checkout"),
//! ]);
//!
//! assert_eq!(error.severity(), Some(Severity::Error));
//! assert_eq!(error.source_kind(), Some(Source::Io));
//! assert_eq!(error.tags_of::<&str>(), vec![&"checkout"]);
//! ```

mod debug_info;
mod localization;
mod rank;
mod severity;
mod source;
mod tag;
mod trace;
mod user_level;

pub use debug_info::DebugInfo;
pub use localization::Localization;
pub use rank::Rank;
pub use severity::Severity;
pub use source::Source;
pub use tag::Tag;
pub use trace::Trace;
pub use user_level::UserLevel;
