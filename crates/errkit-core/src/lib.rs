//! Errkit Core Types and Engine
//!
//! This crate provides the attribution engine behind `errkit`. It includes:
//!
//! - **Attributes**: The [`Attribute`] trait and ordered [`Attributes`] groups
//! - **Provenance**: Source locations captured at each attachment ([`Provenance`])
//! - **Identity**: Type-erased, comparable error identities ([`Identity`]) and
//!   their generators ([`IdentityGenerator`])
//! - **Envelope**: The attributed error itself ([`AttributedError`])
//! - **Attributor**: Envelope construction and identity resolution
//!   ([`Attributor`])
//! - **Queries**: Type-directed, most-recent-first retrieval ([`attribute_of`],
//!   [`attributes_of`])
//!
//! Most users want the `errkit` crate, which adds a standard set of leaf
//! attributes and configuration loading on top of this one.

mod attribute;
mod attributor;
mod describe;
mod envelope;
mod error;
mod ext;
mod identity;
mod provenance;
mod query;

pub use attribute::{AnyTag, Attribute, AttributeKind, Attributes};
pub use attributor::{Attributor, AttributorBuilder, install, register_identifiable};
pub use describe::{DescribeConfig, describe};
pub use envelope::{AttributedError, BoxError, Entry};
pub use error::{IdentityError, InstallError};
pub use ext::{ErrorExt, IdentifiableExt, attach, identifiable, identity_of};
pub use identity::{Identifiable, Identity, IdentityGenerator, SequenceGenerator, UuidGenerator};
pub use provenance::Provenance;
pub use query::{AttributesOf, attribute_of, attributes_of, base, envelope};
