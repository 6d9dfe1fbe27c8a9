//! The attribute capability and type-directed projection.
//!
//! Any type that implements [`Attribute`] can be attached to an error. The
//! trait only asks for a human-readable description; everything else about a
//! payload is opaque to the engine, which uses the payload's runtime type to
//! answer queries.
//!
//! Queries are expressed through [`AttributeKind`]. Every concrete attribute
//! type is its own kind (exact runtime type match), `dyn Attribute` matches
//! every attribute, and `dyn AnyTag` matches every tag regardless of its
//! payload type.

use std::{
    any::{Any, type_name},
    fmt::Debug,
    sync::Arc,
};

/// A typed metadata payload that can be attached to an error.
///
/// Both methods have defaults, so opting in can be a one-liner:
///
/// ```
/// use errkit_core::Attribute;
///
/// #[derive(Debug)]
/// struct RequestId(u64);
///
/// impl Attribute for RequestId {}
///
/// let attribute = RequestId(7);
/// assert!(attribute.type_label().ends_with("RequestId"));
/// assert_eq!(attribute.value_strings(), vec!["RequestId(7)".to_string()]);
/// ```
pub trait Attribute: Any + Debug + Send + Sync {
    /// A label describing the attribute type in descriptions.
    ///
    /// Defaults to the Rust type name.
    fn type_label(&self) -> String {
        type_name::<Self>().to_string()
    }

    /// One or more strings describing the attribute value.
    ///
    /// Defaults to the `Debug` rendering of the value.
    fn value_strings(&self) -> Vec<String> {
        vec![format!("{self:?}")]
    }

    /// Exposes the attribute as a type-erased tag.
    ///
    /// Tag attributes override this so that `dyn AnyTag` queries can match
    /// tags of every payload type.
    fn as_tag(&self) -> Option<&(dyn AnyTag + 'static)> {
        None
    }
}

/// A tag attribute with its payload type erased.
pub trait AnyTag: Debug + Send + Sync {
    /// The tag payload.
    fn value(&self) -> &(dyn Any + Send + Sync);

    /// The Rust type name of the tag payload.
    fn value_type(&self) -> &'static str;
}

/// A query target for type-directed attribute lookups.
///
/// Implemented for every concrete [`Attribute`], for `dyn Attribute` and for
/// `dyn AnyTag`.
pub trait AttributeKind {
    /// Projects `attribute` onto this kind, or `None` if it does not match.
    fn project<'a>(attribute: &'a (dyn Attribute + 'static)) -> Option<&'a Self>;
}

impl<T: Attribute> AttributeKind for T {
    fn project<'a>(attribute: &'a (dyn Attribute + 'static)) -> Option<&'a Self> {
        let any: &dyn Any = attribute;
        any.downcast_ref::<T>()
    }
}

impl AttributeKind for dyn Attribute {
    fn project<'a>(attribute: &'a (dyn Attribute + 'static)) -> Option<&'a Self> {
        Some(attribute)
    }
}

impl AttributeKind for dyn AnyTag {
    fn project<'a>(attribute: &'a (dyn Attribute + 'static)) -> Option<&'a Self> {
        attribute.as_tag()
    }
}

/// An ordered group of attributes attached by a single call.
///
/// Build one with the [`attributes!`](crate::attributes) macro or by
/// chaining [`Attributes::with`].
///
/// # Examples
///
/// ```
/// use errkit_core::{Attribute, Attributes};
///
/// #[derive(Debug)]
/// struct Retry(u8);
/// impl Attribute for Retry {}
///
/// let group = Attributes::new().with(Retry(1)).with(Retry(2));
/// assert_eq!(group.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    items: Vec<Arc<dyn Attribute>>,
}

impl Attributes {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an attribute, keeping call order.
    pub fn with(mut self, attribute: impl Attribute) -> Self {
        self.push(attribute);
        self
    }

    /// Appends an attribute, keeping call order.
    pub fn push(&mut self, attribute: impl Attribute) {
        self.items.push(Arc::new(attribute));
    }

    /// Returns the number of attributes in the group.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the group holds no attribute.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn into_inner(self) -> Vec<Arc<dyn Attribute>> {
        self.items
    }
}

impl<A: Attribute> From<A> for Attributes {
    fn from(attribute: A) -> Self {
        Self::new().with(attribute)
    }
}

impl FromIterator<Arc<dyn Attribute>> for Attributes {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Attribute>>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Builds an ordered [`Attributes`] group from heterogeneous attribute values.
///
/// ```
/// use errkit_core::{Attribute, attributes};
///
/// #[derive(Debug)]
/// struct Retry(u8);
/// impl Attribute for Retry {}
///
/// #[derive(Debug)]
/// struct Region(&'static str);
/// impl Attribute for Region {}
///
/// let group = attributes![Retry(3), Region("eu-west-1")];
/// assert_eq!(group.len(), 2);
/// ```
#[macro_export]
macro_rules! attributes {
    ($($attribute:expr),* $(,)?) => {
        <$crate::Attributes as ::core::iter::FromIterator<
            ::std::sync::Arc<dyn $crate::Attribute>,
        >>::from_iter([
            $(::std::sync::Arc::new($attribute) as ::std::sync::Arc<dyn $crate::Attribute>),*
        ])
    };
}
