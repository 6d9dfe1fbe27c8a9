//! Type-directed attribute queries.
//!
//! Attachment order is a stack: every query reads it top-down, so the most
//! recently attached attribute comes first. Within a single attachment call,
//! later-listed attributes count as more recent.
//!
//! The free functions accept any error. An error that is not an
//! [`AttributedError`] simply has no attributes.

use std::{error::Error, iter::Rev, marker::PhantomData, slice};

use crate::{
    attribute::AttributeKind,
    envelope::{AttributedError, Entry},
    provenance::Provenance,
};

/// Lazy most-recent-first walk over the attributes of one kind.
///
/// Created by [`AttributedError::iter_of`].
pub struct AttributesOf<'a, K: ?Sized> {
    entries: Rev<slice::Iter<'a, Entry>>,
    kind: PhantomData<fn(&K)>,
}

impl<'a, K> Iterator for AttributesOf<'a, K>
where
    K: AttributeKind + ?Sized + 'a,
{
    type Item = (&'a K, &'a Provenance);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.by_ref().find_map(|entry| {
            K::project(entry.attribute()).map(|attribute| (attribute, entry.provenance()))
        })
    }
}

impl AttributedError {
    /// Iterates over the attributes matching `K`, most recent first.
    pub fn iter_of<K: AttributeKind + ?Sized>(&self) -> AttributesOf<'_, K> {
        AttributesOf {
            entries: self.entries().iter().rev(),
            kind: PhantomData,
        }
    }

    /// Returns the most recently attached attribute matching `K`.
    ///
    /// Later attachments are assumed to refine earlier ones, so the latest
    /// wins. Use [`attributes_of`](AttributedError::attributes_of) for the
    /// full history.
    pub fn attribute_of<K: AttributeKind + ?Sized>(&self) -> Option<(&K, &Provenance)> {
        self.iter_of::<K>().next()
    }

    /// Returns every attribute matching `K`, most recent first.
    pub fn attributes_of<K: AttributeKind + ?Sized>(&self) -> Vec<(&K, &Provenance)> {
        self.iter_of::<K>().collect()
    }
}

/// Returns `error` as an envelope, if it is one.
pub fn envelope<'a>(error: &'a (dyn Error + 'static)) -> Option<&'a AttributedError> {
    error.downcast_ref::<AttributedError>()
}

/// Returns the most recently attached attribute of kind `K` on `error`.
///
/// # Examples
///
/// ```
/// use errkit_core::{Attribute, ErrorExt, attribute_of};
///
/// #[derive(Debug)]
/// struct Retry(u8);
/// impl Attribute for Retry {}
///
/// let plain = std::io::Error::other("boom");
/// assert!(attribute_of::<Retry>(&plain).is_none());
///
/// let boxed: errkit_core::BoxError = Box::new(plain.attribute(Retry(3)));
/// let (retry, _) = attribute_of::<Retry>(&*boxed).unwrap();
/// assert_eq!(retry.0, 3);
/// ```
pub fn attribute_of<'a, K: AttributeKind + ?Sized>(
    error: &'a (dyn Error + 'static),
) -> Option<(&'a K, &'a Provenance)> {
    envelope(error).and_then(AttributedError::attribute_of::<K>)
}

/// Returns every attribute of kind `K` on `error`, most recent first.
pub fn attributes_of<'a, K: AttributeKind + ?Sized>(
    error: &'a (dyn Error + 'static),
) -> Vec<(&'a K, &'a Provenance)> {
    envelope(error)
        .map(AttributedError::attributes_of::<K>)
        .unwrap_or_default()
}

/// Returns the original error behind `error`.
///
/// Envelopes are never nested, so a single unwrap reaches the original.
pub fn base<'a>(error: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    match envelope(error) {
        Some(envelope) => envelope.base(),
        None => error,
    }
}
