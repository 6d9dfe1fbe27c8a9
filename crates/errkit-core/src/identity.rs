//! Stable identities for error occurrences.
//!
//! An [`Identity`] distinguishes one logical error occurrence from another
//! and survives any number of attachments. Identities are type-erased so
//! that an error's own identifier type (an integer, a UUID, a string) can be
//! reused as is.
//!
//! Fresh identities come from an [`IdentityGenerator`]. The default
//! [`UuidGenerator`] produces random v4 UUIDs; [`SequenceGenerator`] produces
//! a deterministic `u64` sequence.

use std::{
    any::{Any, type_name},
    error::Error,
    fmt,
    hash::{Hash, Hasher},
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use uuid::Uuid;

use crate::error::IdentityError;

/// A type-erased, comparable identity value.
///
/// Two identities are equal when they hold values of the same type that
/// compare equal.
///
/// # Examples
///
/// ```
/// use errkit_core::Identity;
///
/// let a = Identity::new(42_u64);
/// assert_eq!(a, Identity::new(42_u64));
/// assert_ne!(a, Identity::new(42_i32));
/// assert_eq!(a.downcast_ref::<u64>(), Some(&42));
/// ```
#[derive(Clone)]
pub struct Identity(Arc<dyn IdentityValue>);

impl Identity {
    /// Wraps an identifier value.
    pub fn new<T>(value: T) -> Self
    where
        T: Eq + Hash + fmt::Debug + Send + Sync + 'static,
    {
        Self(Arc::new(value))
    }

    /// Returns `true` if the identity holds a value of type `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// Returns the identity value if it is of type `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        let any: &dyn Any = &*self.0;
        any.downcast_ref::<T>()
    }

    /// Returns the Rust type name of the identity value.
    pub fn type_name(&self) -> &'static str {
        self.0.value_type()
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_dyn(&*other.0)
    }
}

impl Eq for Identity {}

impl Hash for Identity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash_dyn(state);
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Object-safe equality and hashing over erased identity values.
trait IdentityValue: Any + fmt::Debug + Send + Sync {
    fn eq_dyn(&self, other: &dyn IdentityValue) -> bool;
    fn hash_dyn(&self, state: &mut dyn Hasher);
    fn value_type(&self) -> &'static str;
}

impl<T> IdentityValue for T
where
    T: Eq + Hash + fmt::Debug + Send + Sync + 'static,
{
    fn eq_dyn(&self, other: &dyn IdentityValue) -> bool {
        let other: &dyn Any = other;
        other.downcast_ref::<T>().is_some_and(|other| other == self)
    }

    fn hash_dyn(&self, mut state: &mut dyn Hasher) {
        self.type_id().hash(&mut state);
        self.hash(&mut state);
    }

    fn value_type(&self) -> &'static str {
        type_name::<T>()
    }
}

/// An error that carries its own stable identity.
///
/// [`IdentifiableExt`](crate::IdentifiableExt) attachments always reuse the
/// error's identity. For the plain [`ErrorExt`](crate::ErrorExt) path to do
/// the same, register the type on the
/// [`AttributorBuilder`](crate::AttributorBuilder) or at runtime with
/// [`register_identifiable`](crate::register_identifiable).
pub trait Identifiable: Error + Send + Sync + 'static {
    /// The identity of this error occurrence.
    fn identity(&self) -> Identity;
}

/// A source of fresh identities.
///
/// Implementations must be safe to call concurrently and must produce values
/// that do not collide in practice within a process lifetime.
pub trait IdentityGenerator: fmt::Debug + Send + Sync {
    /// Produces a fresh identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] when the underlying source cannot produce a
    /// value. Callers treat this as fatal.
    fn generate(&self) -> Result<Identity, IdentityError>;
}

/// Generates random v4 UUID identities.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdentityGenerator for UuidGenerator {
    fn generate(&self) -> Result<Identity, IdentityError> {
        Ok(Identity::new(Uuid::new_v4()))
    }
}

/// Generates a monotonic `u64` sequence of identities.
///
/// Useful for deterministic tests and reproducible logs.
///
/// # Examples
///
/// ```
/// use errkit_core::{Identity, IdentityGenerator, SequenceGenerator};
///
/// let generator = SequenceGenerator::starting_at(10);
/// assert_eq!(generator.generate().unwrap(), Identity::new(10_u64));
/// assert_eq!(generator.generate().unwrap(), Identity::new(11_u64));
/// ```
#[derive(Debug, Default)]
pub struct SequenceGenerator {
    next: AtomicU64,
}

impl SequenceGenerator {
    /// Creates a generator starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator starting at `start`.
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl IdentityGenerator for SequenceGenerator {
    fn generate(&self) -> Result<Identity, IdentityError> {
        self.next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |value| {
                value.checked_add(1)
            })
            .map(Identity::new)
            .map_err(|_| IdentityError::Exhausted {
                generator: type_name::<Self>(),
            })
    }
}
