//! Generic, typed labels.

use std::any::{Any, type_name};

use errkit_core::{AnyTag, Attribute};

/// A typed label for tracking or categorizing errors.
///
/// The payload can be a plain string or a dedicated type that scopes the
/// tag, such as a feature enum. Tags of one payload type are queried with
/// [`tags_of`](crate::AttributeAccess::tags_of); tags of every type with
/// [`tags`](crate::AttributeAccess::tags).
///
/// # Examples
///
/// ```
/// use errkit::{Attribute, attribute::Tag};
///
/// #[derive(Debug)]
/// enum Feature {
///     Checkout,
/// }
///
/// let tag = Tag::new(Feature::Checkout);
/// assert!(tag.type_label().ends_with("Feature>"));
/// assert_eq!(tag.value_strings(), vec!["Checkout"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag<T>(T);

impl<T> Tag<T> {
    /// Creates a new tag.
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Returns the tag payload.
    pub fn value(&self) -> &T {
        &self.0
    }

    /// Consumes the tag, returning its payload.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Attribute for Tag<T>
where
    T: std::fmt::Debug + Send + Sync + 'static,
{
    fn type_label(&self) -> String {
        format!("Tag<{}>", type_name::<T>())
    }

    fn value_strings(&self) -> Vec<String> {
        vec![format!("{:?}", self.0)]
    }

    fn as_tag(&self) -> Option<&(dyn AnyTag + 'static)> {
        Some(self)
    }
}

impl<T> AnyTag for Tag<T>
where
    T: std::fmt::Debug + Send + Sync + 'static,
{
    fn value(&self) -> &(dyn Any + Send + Sync) {
        &self.0
    }

    fn value_type(&self) -> &'static str {
        type_name::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_label_names_payload_type() {
        assert_eq!(Tag::new(3_u8).type_label(), "Tag<u8>");
        assert_eq!(Tag::new("a").type_label(), "Tag<&str>");
    }

    #[test]
    fn test_tag_value_is_debug() {
        assert_eq!(Tag::new("a").value_strings(), vec!["\"a\""]);
        assert_eq!(Tag::new(7_i32).value_strings(), vec!["7"]);
    }

    #[test]
    fn test_tag_erases_to_any_tag() {
        let tag = Tag::new(7_i32);
        let erased = tag.as_tag().unwrap();

        assert_eq!(erased.value_type(), "i32");
        assert_eq!(erased.value().downcast_ref::<i32>(), Some(&7));
    }
}
