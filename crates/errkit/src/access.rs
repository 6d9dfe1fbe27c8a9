//! Typed accessors for the standard attributes.

use std::error::Error;

use errkit_core::{AnyTag, Provenance, attribute_of, attributes_of};

use crate::attribute::{DebugInfo, Localization, Rank, Severity, Source, Trace, UserLevel};

/// Reads the standard attributes back from any error.
///
/// Implemented for every `Error + 'static` type and for boxed errors. A
/// plain error answers `None` or an empty list everywhere.
///
/// # Examples
///
/// ```
/// use errkit::prelude::*;
///
/// let error = std::io::Error::other("quota exceeded")
///     .attribute(Severity::Warning)
///     .attribute(Severity::Critical)
///     .attribute(Severity::Error);
///
/// assert_eq!(error.severity(), Some(Severity::Error));
/// assert_eq!(error.highest_severity(), Some(Severity::Critical));
/// ```
pub trait AttributeAccess {
    /// Returns `self` as a plain error reference.
    fn as_error(&self) -> &(dyn Error + 'static);

    /// The most recently attached [`Severity`].
    fn severity(&self) -> Option<Severity> {
        attribute_of::<Severity>(self.as_error()).map(|(severity, _)| *severity)
    }

    /// The highest [`Severity`] attached anywhere along the chain.
    fn highest_severity(&self) -> Option<Severity> {
        attributes_of::<Severity>(self.as_error())
            .into_iter()
            .map(|(severity, _)| *severity)
            .max()
    }

    /// The most recently attached [`Rank`].
    fn rank(&self) -> Option<Rank> {
        attribute_of::<Rank>(self.as_error()).map(|(rank, _)| *rank)
    }

    /// The highest [`Rank`] attached anywhere along the chain.
    fn highest_rank(&self) -> Option<Rank> {
        attributes_of::<Rank>(self.as_error())
            .into_iter()
            .map(|(rank, _)| *rank)
            .max()
    }

    /// The most recently attached [`UserLevel`].
    fn user_level(&self) -> Option<UserLevel> {
        attribute_of::<UserLevel>(self.as_error()).map(|(level, _)| *level)
    }

    /// The most recently attached [`Source`].
    ///
    /// Named to stay clear of [`Error::source`].
    fn source_kind(&self) -> Option<Source> {
        attribute_of::<Source>(self.as_error()).map(|(source, _)| *source)
    }

    /// Every tag, of every payload type, most recent first.
    fn tags(&self) -> Vec<&(dyn AnyTag + 'static)> {
        attributes_of::<dyn AnyTag>(self.as_error())
            .into_iter()
            .map(|(tag, _)| tag)
            .collect()
    }

    /// Every tag payload of type `T`, most recent first.
    fn tags_of<T>(&self) -> Vec<&T>
    where
        T: std::fmt::Debug + Send + Sync + 'static,
    {
        attributes_of::<crate::attribute::Tag<T>>(self.as_error())
            .into_iter()
            .map(|(tag, _)| tag.value())
            .collect()
    }

    /// Every [`Trace`] location, most recent first.
    fn trace(&self) -> Vec<Provenance> {
        attributes_of::<Trace>(self.as_error())
            .into_iter()
            .map(|(trace, _)| trace.provenance())
            .collect()
    }

    /// Every [`DebugInfo`] with the location that attached it, most recent
    /// first.
    fn debug_info(&self) -> Vec<(&DebugInfo, &Provenance)> {
        attributes_of::<DebugInfo>(self.as_error())
    }

    /// The most recently attached [`Localization`].
    fn localization(&self) -> Option<&Localization> {
        attribute_of::<Localization>(self.as_error()).map(|(localization, _)| localization)
    }

    /// The message of the most recently attached [`Localization`].
    fn localized_message(&self) -> Option<&str> {
        self.localization().map(Localization::message)
    }
}

impl<E: Error + 'static> AttributeAccess for E {
    fn as_error(&self) -> &(dyn Error + 'static) {
        self
    }
}

impl AttributeAccess for dyn Error + Send + Sync + 'static {
    fn as_error(&self) -> &(dyn Error + 'static) {
        self
    }
}

impl AttributeAccess for dyn Error + 'static {
    fn as_error(&self) -> &(dyn Error + 'static) {
        self
    }
}
