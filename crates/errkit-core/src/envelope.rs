//! The attributed-error envelope.
//!
//! An [`AttributedError`] owns the original (base) error, a stable
//! [`Identity`] and an ordered list of [`Entry`] values, each pairing an
//! attribute with the [`Provenance`] of the call that attached it.
//!
//! Envelopes are never nested: attaching to an envelope produces a new
//! envelope with the same base and identity and a longer entry list.

use std::{error::Error, fmt, sync::Arc};

use crate::{
    attribute::{Attribute, Attributes},
    attributor::Attributor,
    describe,
    identity::{Identifiable, Identity},
    provenance::Provenance,
};

/// A boxed, thread-safe error of any type.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// An attribute together with the location where it was attached.
#[derive(Debug, Clone)]
pub struct Entry {
    attribute: Arc<dyn Attribute>,
    provenance: Provenance,
}

impl Entry {
    /// Returns the attached attribute.
    pub fn attribute(&self) -> &(dyn Attribute + 'static) {
        &*self.attribute
    }

    /// Returns the location of the attaching call.
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }
}

/// An error enriched with attributes.
///
/// Displays as its base error. The alternate form (`{:#}`) renders the full
/// description, see [`AttributedError::describe`].
///
/// # Examples
///
/// ```
/// use errkit_core::{Attribute, ErrorExt};
///
/// #[derive(Debug)]
/// struct Retry(u8);
/// impl Attribute for Retry {}
///
/// let io = std::io::Error::other("disk full");
/// let first = io.attribute(Retry(1));
/// let second = first.clone().attribute(Retry(2));
///
/// assert_eq!(first.identity(), second.identity());
/// assert_eq!(second.to_string(), "disk full");
/// assert_eq!(second.attribute_of::<Retry>().map(|(retry, _)| retry.0), Some(2));
/// ```
#[derive(Clone)]
pub struct AttributedError {
    base: Arc<dyn Error + Send + Sync>,
    base_type: Option<&'static str>,
    identity: Identity,
    entries: Vec<Entry>,
}

impl AttributedError {
    /// Seeds an envelope with no attributes.
    pub(crate) fn seed(base: BoxError, base_type: Option<&'static str>, identity: Identity) -> Self {
        Self {
            base: Arc::from(base),
            base_type,
            identity,
            entries: Vec::new(),
        }
    }

    /// Adds `attributes` as the most recent group, all sharing `provenance`.
    pub(crate) fn with_group(mut self, attributes: Attributes, provenance: Provenance) -> Self {
        self.entries.extend(
            attributes
                .into_inner()
                .into_iter()
                .map(|attribute| Entry {
                    attribute,
                    provenance,
                }),
        );
        self
    }

    /// Returns the original error.
    pub fn base(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.base
    }

    /// Returns the base error if it is of type `E`.
    pub fn downcast_base_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.base.downcast_ref::<E>()
    }

    /// Returns the Rust type name of the base error, as seen when the
    /// envelope was seeded.
    ///
    /// `None` if the base was attached as a [`BoxError`], whose concrete type
    /// is no longer known.
    pub fn base_type(&self) -> Option<&'static str> {
        self.base_type
    }

    /// Returns the identity shared by every envelope of this chain.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Returns all entries in attachment order, oldest first.
    ///
    /// Queries read this list from the end; see
    /// [`attributes_of`](AttributedError::attributes_of).
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the number of attached attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no attribute has been attached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders a multi-line description using the process-wide
    /// [`Attributor`]'s description style.
    pub fn describe(&self) -> String {
        Attributor::global().describe(self)
    }
}

impl fmt::Debug for AttributedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributedError")
            .field("base", &self.base)
            .field("identity", &self.identity)
            .field("entries", &self.entries)
            .finish()
    }
}

impl fmt::Display for AttributedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            let config = Attributor::global().describe_config();
            f.write_str(&describe::describe(self, config))
        } else {
            fmt::Display::fmt(&self.base, f)
        }
    }
}

impl Error for AttributedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.base.source()
    }
}

impl Identifiable for AttributedError {
    fn identity(&self) -> Identity {
        self.identity.clone()
    }
}
