//! Attaching attributes on the error path of a `Result`.

use errkit_core::{
    Attribute, AttributedError, Attributes, Attributor, BoxError, Identifiable, Provenance,
};

/// Attaches attributes to the error of a `Result`, leaving `Ok` untouched.
///
/// The recorded provenance is the location of the `.attribute(..)` or
/// `.attributes(..)` call, not of the closure that maps the error.
///
/// # Examples
///
/// ```
/// use errkit::prelude::*;
///
/// fn read_profile() -> Result<String, AttributedError> {
///     std::fs::read_to_string("/definitely/missing/profile.toml")
///         .attributes(attributes![Severity::Warning, Source::System])
/// }
///
/// let error = read_profile().unwrap_err();
/// assert_eq!(error.severity(), Some(Severity::Warning));
/// ```
pub trait ResultExt<T> {
    /// Attaches a single attribute to the error, if any.
    #[track_caller]
    fn attribute(self, attribute: impl Attribute) -> Result<T, AttributedError>;

    /// Attaches an ordered group of attributes to the error, if any.
    #[track_caller]
    fn attributes(self, attributes: Attributes) -> Result<T, AttributedError>;
}

impl<T, E: Into<BoxError>> ResultExt<T> for Result<T, E> {
    #[track_caller]
    fn attribute(self, attribute: impl Attribute) -> Result<T, AttributedError> {
        let provenance = Provenance::caller();
        self.map_err(|error| Attributor::global().attach(error, attribute, provenance))
    }

    #[track_caller]
    fn attributes(self, attributes: Attributes) -> Result<T, AttributedError> {
        let provenance = Provenance::caller();
        self.map_err(|error| Attributor::global().attach(error, attributes, provenance))
    }
}

/// Attaches attributes to an error that carries its own identity, see
/// [`IdentifiableExt`](errkit_core::IdentifiableExt).
pub trait IdentifiedResultExt<T> {
    /// Attaches a single attribute to the error, if any.
    #[track_caller]
    fn attribute_identified(self, attribute: impl Attribute) -> Result<T, AttributedError>;

    /// Attaches an ordered group of attributes to the error, if any.
    #[track_caller]
    fn attributes_identified(self, attributes: Attributes) -> Result<T, AttributedError>;
}

impl<T, E: Identifiable> IdentifiedResultExt<T> for Result<T, E> {
    #[track_caller]
    fn attribute_identified(self, attribute: impl Attribute) -> Result<T, AttributedError> {
        let provenance = Provenance::caller();
        self.map_err(|error| Attributor::global().attach_identified(error, attribute, provenance))
    }

    #[track_caller]
    fn attributes_identified(self, attributes: Attributes) -> Result<T, AttributedError> {
        let provenance = Provenance::caller();
        self.map_err(|error| Attributor::global().attach_identified(error, attributes, provenance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AttributeAccess, attribute::Severity, attributes};

    fn failing() -> Result<u8, std::io::Error> {
        Err(std::io::Error::other("failed"))
    }

    #[test]
    fn test_ok_is_untouched() {
        let value: Result<u8, std::io::Error> = Ok(3);

        assert_eq!(value.attribute(Severity::Error).ok(), Some(3));
    }

    #[test]
    fn test_error_records_call_site() {
        let line = line!() + 1;
        let error = failing().attribute(Severity::Error).unwrap_err();

        let (_, provenance) = error.attribute_of::<Severity>().unwrap();
        assert_eq!(provenance.file(), file!());
        assert_eq!(provenance.line(), line);
    }

    #[test]
    fn test_chained_results_keep_identity() {
        let first = failing().attribute(Severity::Warning).unwrap_err();
        let identity = first.identity().clone();

        let second: Result<u8, _> = Err(first);
        let second = second
            .attributes(attributes![Severity::Critical])
            .unwrap_err();

        assert_eq!(second.identity(), &identity);
        assert_eq!(second.severity(), Some(Severity::Critical));
        assert_eq!(second.len(), 2);
    }

    #[derive(Debug)]
    struct Declined {
        order: u64,
    }

    impl std::fmt::Display for Declined {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "order {} declined", self.order)
        }
    }

    impl std::error::Error for Declined {}

    impl Identifiable for Declined {
        fn identity(&self) -> errkit_core::Identity {
            errkit_core::Identity::new(self.order)
        }
    }

    #[test]
    fn test_identified_result_keeps_error_identity() {
        let result: Result<(), Declined> = Err(Declined { order: 7 });

        let line = line!() + 1;
        let error = result.attribute_identified(Severity::Warning).unwrap_err();

        assert_eq!(error.identity(), &errkit_core::Identity::new(7_u64));
        let (_, provenance) = error.attribute_of::<Severity>().unwrap();
        assert_eq!(provenance.line(), line);
    }

    #[test]
    fn test_identified_result_ok_is_untouched() {
        let result: Result<u8, Declined> = Ok(1);

        assert_eq!(result.attributes_identified(attributes![Severity::Error]).ok(), Some(1));
    }

    #[test]
    fn test_string_errors_are_accepted() {
        let result: Result<(), String> = Err("bad input".to_string());

        let error = result.attribute(Severity::Info).unwrap_err();
        assert_eq!(error.to_string(), "bad input");
    }
}
