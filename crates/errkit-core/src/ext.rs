//! Extension methods available on every error.
//!
//! [`ErrorExt`] is implemented for all `Error + Send + Sync + 'static` types
//! and routes through the process-wide [`Attributor`].
//! [`IdentifiableExt`] adds attachments that keep an [`Identifiable`] error's
//! own identity without registering its type. Boxed errors
//! ([`BoxError`]) do not implement [`Error`] themselves; use the free
//! functions ([`attach`], [`attribute_of`](crate::attribute_of),
//! [`attributes_of`](crate::attributes_of), [`base`](crate::base),
//! [`identifiable`]) for those.

use std::error::Error;

use crate::{
    attribute::{Attribute, AttributeKind, Attributes},
    attributor::Attributor,
    envelope::{AttributedError, BoxError},
    identity::{Identifiable, Identity},
    provenance::Provenance,
    query,
};

/// Attach and query attributes on any error.
///
/// # Examples
///
/// ```
/// use errkit_core::{Attribute, ErrorExt, attributes};
///
/// #[derive(Debug)]
/// struct Retry(u8);
/// impl Attribute for Retry {}
///
/// #[derive(Debug)]
/// struct Region(&'static str);
/// impl Attribute for Region {}
///
/// let error = std::io::Error::other("timeout")
///     .attributes(attributes![Retry(1), Region("eu")])
///     .attribute(Retry(2));
///
/// let retries: Vec<u8> = error
///     .attributes_of::<Retry>()
///     .into_iter()
///     .map(|(retry, _)| retry.0)
///     .collect();
/// assert_eq!(retries, vec![2, 1]);
/// assert_eq!(error.base().to_string(), "timeout");
/// ```
pub trait ErrorExt: Error + Send + Sync + Sized + 'static {
    /// Attaches a single attribute, recording the caller's location.
    #[track_caller]
    fn attribute(self, attribute: impl Attribute) -> AttributedError {
        Attributor::global().attach(self, attribute, Provenance::caller())
    }

    /// Attaches an ordered group of attributes, recording the caller's
    /// location once for the whole group.
    #[track_caller]
    fn attributes(self, attributes: Attributes) -> AttributedError {
        Attributor::global().attach(self, attributes, Provenance::caller())
    }

    /// Returns the most recently attached attribute of kind `K`.
    fn attribute_of<K: AttributeKind + ?Sized>(&self) -> Option<(&K, &Provenance)> {
        query::attribute_of::<K>(self)
    }

    /// Returns every attribute of kind `K`, most recent first.
    fn attributes_of<K: AttributeKind + ?Sized>(&self) -> Vec<(&K, &Provenance)> {
        query::attributes_of::<K>(self)
    }

    /// Returns the original error.
    fn base(&self) -> &(dyn Error + 'static) {
        query::base(self)
    }

    /// Returns the error as an identifiable error, see
    /// [`Attributor::identifiable`].
    fn identifiable(self) -> Box<dyn Identifiable> {
        Attributor::global().identifiable(self)
    }
}

impl<E: Error + Send + Sync + 'static> ErrorExt for E {}

/// Attach attributes to an error that carries its own identity.
///
/// The envelope takes the error's [`Identifiable::identity`], see
/// [`Attributor::attach_identified`].
///
/// # Examples
///
/// ```
/// use std::fmt;
///
/// use errkit_core::{Attribute, Identifiable, IdentifiableExt, Identity};
///
/// #[derive(Debug)]
/// struct Retry(u8);
/// impl Attribute for Retry {}
///
/// #[derive(Debug)]
/// struct OrderFailed(u64);
///
/// impl fmt::Display for OrderFailed {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "order {} failed", self.0)
///     }
/// }
///
/// impl std::error::Error for OrderFailed {}
///
/// impl Identifiable for OrderFailed {
///     fn identity(&self) -> Identity {
///         Identity::new(self.0)
///     }
/// }
///
/// let error = OrderFailed(42).attribute_identified(Retry(1));
/// assert_eq!(error.identity(), &Identity::new(42_u64));
/// ```
pub trait IdentifiableExt: Identifiable + Sized {
    /// Attaches a single attribute, recording the caller's location.
    #[track_caller]
    fn attribute_identified(self, attribute: impl Attribute) -> AttributedError {
        Attributor::global().attach_identified(self, attribute, Provenance::caller())
    }

    /// Attaches an ordered group of attributes, recording the caller's
    /// location once for the whole group.
    #[track_caller]
    fn attributes_identified(self, attributes: Attributes) -> AttributedError {
        Attributor::global().attach_identified(self, attributes, Provenance::caller())
    }
}

impl<E: Identifiable> IdentifiableExt for E {}

/// Attaches `attributes` to any error, including boxed ones.
#[track_caller]
pub fn attach<E: Into<BoxError>>(error: E, attributes: impl Into<Attributes>) -> AttributedError {
    Attributor::global().attach(error, attributes, Provenance::caller())
}

/// Returns `error` as an identifiable error, see
/// [`Attributor::identifiable`].
pub fn identifiable<E: Into<BoxError>>(error: E) -> Box<dyn Identifiable> {
    Attributor::global().identifiable(error)
}

/// Returns the identity `error` already carries, without generating one.
pub fn identity_of(error: &(dyn Error + Send + Sync + 'static)) -> Option<Identity> {
    Attributor::global().identity_of(error)
}
