//! The attribution engine: envelope construction and identity resolution.
//!
//! An [`Attributor`] bundles everything an attachment needs besides the
//! error and the attributes themselves:
//!
//! - an [`IdentityGenerator`] for errors that have no identity of their own
//! - a registry of [`Identifiable`] error types whose identity is reused
//! - the [`DescribeConfig`] used to render envelopes
//!
//! A process-wide attributor backs [`ErrorExt`](crate::ErrorExt). It can be
//! installed once with [`install`]; otherwise a default one (random UUID
//! identities, no registered types) is used. Identifiable types can be
//! registered on it at any time with [`register_identifiable`].

use std::{
    any::{TypeId, type_name},
    error::Error,
    fmt,
    sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard},
};

use log::{debug, error, trace};

use crate::{
    attribute::Attributes,
    describe::{self, DescribeConfig},
    envelope::{AttributedError, BoxError},
    error::{IdentityError, InstallError},
    identity::{Identifiable, Identity, IdentityGenerator, UuidGenerator},
    provenance::Provenance,
    query,
};

static GLOBAL: OnceLock<Attributor> = OnceLock::new();

/// Installs `attributor` as the process-wide attributor.
///
/// # Errors
///
/// Returns [`InstallError::AlreadyInstalled`] if an attributor was already
/// installed, or if the default one was already put in use.
pub fn install(attributor: Attributor) -> Result<(), InstallError> {
    GLOBAL
        .set(attributor)
        .map_err(|_| InstallError::AlreadyInstalled)?;
    debug!("Installed process-wide attributor");
    Ok(())
}

/// Registers `E` as an identifiable error type on the process-wide
/// attributor, see [`Attributor::register`].
pub fn register_identifiable<E: Identifiable>() {
    Attributor::global().register::<E>();
}

/// Reuses the identity of a registered [`Identifiable`] error type.
#[derive(Clone, Copy)]
struct IdentityResolver {
    type_id: TypeId,
    type_name: &'static str,
    identity: fn(&(dyn Error + Send + Sync + 'static)) -> Option<Identity>,
    promote: fn(BoxError) -> Result<Box<dyn Identifiable>, BoxError>,
}

impl IdentityResolver {
    fn of<E: Identifiable>() -> Self {
        Self {
            type_id: TypeId::of::<E>(),
            type_name: type_name::<E>(),
            identity: identity_of::<E>,
            promote: promote::<E>,
        }
    }
}

impl fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

fn identity_of<E: Identifiable>(error: &(dyn Error + Send + Sync + 'static)) -> Option<Identity> {
    error.downcast_ref::<E>().map(Identifiable::identity)
}

fn promote<E: Identifiable>(error: BoxError) -> Result<Box<dyn Identifiable>, BoxError> {
    error
        .downcast::<E>()
        .map(|error| error as Box<dyn Identifiable>)
}

/// Adds `resolver` unless its type is already registered. Returns whether it
/// was added.
fn insert_resolver(resolvers: &mut Vec<IdentityResolver>, resolver: IdentityResolver) -> bool {
    if resolvers
        .iter()
        .any(|registered| registered.type_id == resolver.type_id)
    {
        return false;
    }
    resolvers.push(resolver);
    true
}

/// The type label recorded for a base of static type `E`.
///
/// A [`BoxError`] input has already erased its concrete type, so no label is
/// recorded for it.
fn base_type_of<E>() -> Option<&'static str> {
    let name = type_name::<E>();
    (name != type_name::<BoxError>()).then_some(name)
}

/// The configured attribution engine.
///
/// # Examples
///
/// ```
/// use errkit_core::{Attribute, Attributor, Identity, Provenance, SequenceGenerator};
///
/// #[derive(Debug)]
/// struct Retry(u8);
/// impl Attribute for Retry {}
///
/// let attributor = Attributor::builder()
///     .generator(SequenceGenerator::starting_at(100))
///     .build();
///
/// let error = std::io::Error::other("boom");
/// let envelope = attributor.attach(error, Retry(1), Provenance::caller());
/// assert_eq!(envelope.identity(), &Identity::new(100_u64));
/// ```
#[derive(Debug)]
pub struct Attributor {
    generator: Arc<dyn IdentityGenerator>,
    resolvers: RwLock<Vec<IdentityResolver>>,
    describe: DescribeConfig,
}

impl Default for Attributor {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Clone for Attributor {
    fn clone(&self) -> Self {
        Self {
            generator: Arc::clone(&self.generator),
            resolvers: RwLock::new(self.read_resolvers().clone()),
            describe: self.describe.clone(),
        }
    }
}

impl Attributor {
    /// Starts building an attributor.
    pub fn builder() -> AttributorBuilder {
        AttributorBuilder::default()
    }

    /// Returns the process-wide attributor, initializing the default one if
    /// none was installed.
    pub fn global() -> &'static Attributor {
        GLOBAL.get_or_init(Attributor::default)
    }

    /// Returns the description style.
    pub fn describe_config(&self) -> &DescribeConfig {
        &self.describe
    }

    /// Returns the identity generator.
    pub fn generator(&self) -> &dyn IdentityGenerator {
        &*self.generator
    }

    /// Registers `E` as an identifiable error type.
    ///
    /// Unlike [`AttributorBuilder::identifiable`], this works on an
    /// attributor that is already in use, including [`Attributor::global`].
    /// Registering the same type twice has no effect.
    pub fn register<E: Identifiable>(&self) {
        let mut resolvers = self
            .resolvers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if insert_resolver(&mut resolvers, IdentityResolver::of::<E>()) {
            debug!(error_type = type_name::<E>(); "Registered identifiable error type");
        }
    }

    /// Attaches `attributes` to `error` as one group sharing `provenance`.
    ///
    /// - An envelope keeps its base and identity; the group becomes the
    ///   most recent one.
    /// - A registered identifiable error seeds an envelope with its own
    ///   identity.
    /// - Any other error seeds an envelope with a freshly generated identity.
    ///
    /// Use [`Attributor::attach_identified`] to keep the identity of an
    /// [`Identifiable`] error whose type is not registered.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] if a fresh identity was needed and the
    /// generator failed.
    pub fn try_attach<E: Into<BoxError>>(
        &self,
        error: E,
        attributes: impl Into<Attributes>,
        provenance: Provenance,
    ) -> Result<AttributedError, IdentityError> {
        let error: BoxError = error.into();
        let envelope = match error.downcast::<AttributedError>() {
            Ok(envelope) => *envelope,
            Err(error) => self.seed(error, base_type_of::<E>())?,
        };
        Ok(self.extend(envelope, attributes.into(), provenance))
    }

    /// Attaches `attributes` to `error`, see [`Attributor::try_attach`].
    ///
    /// # Panics
    ///
    /// Panics if the identity generator fails. A failing identity source is a
    /// fatal configuration error.
    pub fn attach<E: Into<BoxError>>(
        &self,
        error: E,
        attributes: impl Into<Attributes>,
        provenance: Provenance,
    ) -> AttributedError {
        self.try_attach(error, attributes, provenance)
            .unwrap_or_else(|err| fatal(err))
    }

    /// Attaches `attributes` to an error that carries its own identity.
    ///
    /// The envelope is seeded with `error.identity()` whether or not `E` is
    /// registered, so this never generates an identity. An envelope is
    /// extended as with [`Attributor::attach`].
    pub fn attach_identified<E: Identifiable>(
        &self,
        error: E,
        attributes: impl Into<Attributes>,
        provenance: Provenance,
    ) -> AttributedError {
        let identity = error.identity();
        let error: BoxError = Box::new(error);
        let envelope = match error.downcast::<AttributedError>() {
            Ok(envelope) => *envelope,
            Err(error) => {
                trace!(identity:% = identity; "Reusing identity of identifiable error");
                AttributedError::seed(error, Some(type_name::<E>()), identity)
            }
        };
        self.extend(envelope, attributes.into(), provenance)
    }

    /// Returns `error` as an identifiable error.
    ///
    /// Envelopes and registered identifiable errors are returned unchanged.
    /// Any other error is wrapped in an envelope with no attributes and a
    /// freshly generated identity; calling this again on the same raw error
    /// generates a new identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] if a fresh identity was needed and the
    /// generator failed.
    pub fn try_identifiable<E: Into<BoxError>>(
        &self,
        error: E,
    ) -> Result<Box<dyn Identifiable>, IdentityError> {
        let error: BoxError = error.into();
        let mut error = match error.downcast::<AttributedError>() {
            Ok(envelope) => return Ok(envelope as Box<dyn Identifiable>),
            Err(error) => error,
        };

        for resolver in self.read_resolvers().iter() {
            match (resolver.promote)(error) {
                Ok(identifiable) => return Ok(identifiable),
                Err(unmatched) => error = unmatched,
            }
        }

        let identity = self.generator.generate()?;
        debug!(identity:% = identity; "Generated identity for unattributed error");
        let envelope: Box<dyn Identifiable> =
            Box::new(AttributedError::seed(error, base_type_of::<E>(), identity));
        Ok(envelope)
    }

    /// Returns `error` as an identifiable error, see
    /// [`Attributor::try_identifiable`].
    ///
    /// # Panics
    ///
    /// Panics if the identity generator fails.
    pub fn identifiable<E: Into<BoxError>>(&self, error: E) -> Box<dyn Identifiable> {
        self.try_identifiable(error).unwrap_or_else(|err| fatal(err))
    }

    /// Returns the identity `error` already carries, without generating one.
    pub fn identity_of(&self, error: &(dyn Error + Send + Sync + 'static)) -> Option<Identity> {
        match query::envelope(error) {
            Some(envelope) => Some(envelope.identity().clone()),
            None => self.resolve_identity(error),
        }
    }

    /// Renders `envelope` with this attributor's description style.
    pub fn describe(&self, envelope: &AttributedError) -> String {
        describe::describe(envelope, &self.describe)
    }

    fn read_resolvers(&self) -> RwLockReadGuard<'_, Vec<IdentityResolver>> {
        self.resolvers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn resolve_identity(&self, error: &(dyn Error + Send + Sync + 'static)) -> Option<Identity> {
        self.read_resolvers()
            .iter()
            .find_map(|resolver| (resolver.identity)(error))
    }

    fn seed(
        &self,
        error: BoxError,
        base_type: Option<&'static str>,
    ) -> Result<AttributedError, IdentityError> {
        let identity = match self.resolve_identity(&*error) {
            Some(identity) => {
                trace!(identity:% = identity, base_type:? = base_type; "Reusing identity of identifiable error");
                identity
            }
            None => self.generator.generate()?,
        };
        Ok(AttributedError::seed(error, base_type, identity))
    }

    fn extend(
        &self,
        envelope: AttributedError,
        attributes: Attributes,
        provenance: Provenance,
    ) -> AttributedError {
        let count = attributes.len();
        let envelope = envelope.with_group(attributes, provenance);

        trace!(
            identity:% = envelope.identity(),
            count = count,
            total = envelope.len(),
            provenance:% = provenance;
            "Attached attributes"
        );

        envelope
    }
}

fn fatal(err: IdentityError) -> ! {
    error!(error:% = err; "Identity generation failed");
    panic!("identity generation failed: {err}")
}

/// Builder for [`Attributor`].
#[derive(Debug, Default)]
pub struct AttributorBuilder {
    generator: Option<Arc<dyn IdentityGenerator>>,
    resolvers: Vec<IdentityResolver>,
    describe: DescribeConfig,
}

impl AttributorBuilder {
    /// Sets the identity generator. Defaults to [`UuidGenerator`].
    pub fn generator(mut self, generator: impl IdentityGenerator + 'static) -> Self {
        self.generator = Some(Arc::new(generator));
        self
    }

    /// Registers `E` as an identifiable error type.
    ///
    /// Attaching to an `E` reuses `E`'s identity, and
    /// [`Attributor::identifiable`] returns it unchanged.
    pub fn identifiable<E: Identifiable>(mut self) -> Self {
        insert_resolver(&mut self.resolvers, IdentityResolver::of::<E>());
        self
    }

    /// Sets the description style.
    pub fn describe(mut self, config: DescribeConfig) -> Self {
        self.describe = config;
        self
    }

    /// Builds the attributor.
    pub fn build(self) -> Attributor {
        Attributor {
            generator: self.generator.unwrap_or_else(|| Arc::new(UuidGenerator)),
            resolvers: RwLock::new(self.resolvers),
            describe: self.describe,
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::{attribute::Attribute, attributes, identity::SequenceGenerator};

    #[derive(Debug)]
    struct Note(u32);

    impl Attribute for Note {}

    #[derive(Debug)]
    struct Whoops;

    impl fmt::Display for Whoops {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "whoops")
        }
    }

    impl Error for Whoops {}

    #[derive(Debug)]
    struct IdentifiedWhoops {
        id: u32,
    }

    impl fmt::Display for IdentifiedWhoops {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "identified whoops #{}", self.id)
        }
    }

    impl Error for IdentifiedWhoops {}

    impl Identifiable for IdentifiedWhoops {
        fn identity(&self) -> Identity {
            Identity::new(self.id)
        }
    }

    #[derive(Debug)]
    struct FailingGenerator;

    impl IdentityGenerator for FailingGenerator {
        fn generate(&self) -> Result<Identity, IdentityError> {
            Err(IdentityError::Unavailable("entropy exhausted".to_string()))
        }
    }

    fn sequential() -> Attributor {
        Attributor::builder()
            .generator(SequenceGenerator::new())
            .identifiable::<IdentifiedWhoops>()
            .build()
    }

    fn here() -> Provenance {
        Provenance::new("attributor.rs", 1, None)
    }

    #[test]
    fn test_attach_seeds_with_generated_identity() {
        let attributor = sequential();

        let envelope = attributor.attach(Whoops, Note(1), here());

        assert_eq!(envelope.identity(), &Identity::new(0_u64));
        assert_eq!(envelope.len(), 1);
        assert_eq!(envelope.base().to_string(), "whoops");
        assert!(envelope.base_type().is_some_and(|name| name.ends_with("Whoops")));
    }

    #[test]
    fn test_attach_to_envelope_keeps_base_and_identity() {
        let attributor = sequential();

        let first = attributor.attach(Whoops, Note(1), here());
        let second = attributor.attach(first.clone(), attributes![Note(2), Note(3)], here());
        let third = attributor.attach(second.clone(), Note(4), here());

        assert_eq!(first.identity(), second.identity());
        assert_eq!(second.identity(), third.identity());
        assert_eq!(third.base_type(), first.base_type());
        assert!(third.downcast_base_ref::<Whoops>().is_some());
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 3);
        assert_eq!(third.len(), 4);
        assert_eq!(third.attribute_of::<Note>().map(|(note, _)| note.0), Some(4));
    }

    #[test]
    fn test_boxed_base_has_no_type_label() {
        let attributor = sequential();

        let boxed: BoxError = Box::new(std::io::Error::other("disk full"));
        let envelope = attributor.attach(boxed, Note(1), here());

        assert_eq!(envelope.base_type(), None);
        assert!(envelope.downcast_base_ref::<std::io::Error>().is_some());
        assert!(attributor.describe(&envelope).contains("\n    base: disk full\n"));
    }

    #[test]
    fn test_attach_identified_keeps_unregistered_identity() {
        let attributor = Attributor::builder().generator(FailingGenerator).build();

        let first = attributor.attach_identified(IdentifiedWhoops { id: 42 }, Note(1), here());
        let second = attributor.attach(first.clone(), Note(2), here());

        assert_eq!(first.identity(), &Identity::new(42_u32));
        assert_eq!(second.identity(), &Identity::new(42_u32));
        assert!(first.base_type().is_some_and(|name| name.ends_with("IdentifiedWhoops")));
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_attach_identified_extends_envelope() {
        let attributor = sequential();

        let first = attributor.attach(Whoops, Note(1), here());
        let second = attributor.attach_identified(first.clone(), Note(2), here());

        assert_eq!(second.identity(), first.identity());
        assert_eq!(second.len(), 2);
        assert!(second.downcast_base_ref::<Whoops>().is_some());
    }

    #[test]
    fn test_register_after_first_use() {
        let attributor = Attributor::builder().generator(SequenceGenerator::new()).build();

        let before = attributor.attach(IdentifiedWhoops { id: 9 }, Note(1), here());
        attributor.register::<IdentifiedWhoops>();
        let after = attributor.attach(IdentifiedWhoops { id: 9 }, Note(1), here());

        assert_eq!(before.identity(), &Identity::new(0_u64));
        assert_eq!(after.identity(), &Identity::new(9_u32));
        assert_eq!(
            attributor.identity_of(&IdentifiedWhoops { id: 3 }),
            Some(Identity::new(3_u32))
        );
    }

    #[test]
    fn test_register_is_idempotent() {
        let attributor = sequential();

        attributor.register::<IdentifiedWhoops>();
        attributor.register::<IdentifiedWhoops>();

        assert_eq!(attributor.read_resolvers().len(), 1);
    }

    #[test]
    fn test_clone_has_its_own_registry() {
        let original = Attributor::builder().generator(SequenceGenerator::new()).build();
        let copy = original.clone();

        copy.register::<IdentifiedWhoops>();

        assert_eq!(original.identity_of(&IdentifiedWhoops { id: 1 }), None);
        assert_eq!(copy.identity_of(&IdentifiedWhoops { id: 1 }), Some(Identity::new(1_u32)));
    }

    #[test]
    fn test_attributor_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Attributor>();

        let attributor = Arc::new(Attributor::builder().generator(SequenceGenerator::new()).build());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let attributor = Arc::clone(&attributor);
                std::thread::spawn(move || {
                    attributor.register::<IdentifiedWhoops>();
                    attributor.attach(Whoops, Note(1), here()).identity().clone()
                })
            })
            .collect();

        let mut identities: Vec<u64> = handles
            .into_iter()
            .map(|handle| *handle.join().unwrap().downcast_ref::<u64>().unwrap())
            .collect();
        identities.sort_unstable();

        assert_eq!(identities, vec![0, 1, 2, 3]);
        assert_eq!(attributor.read_resolvers().len(), 1);
    }

    #[test]
    fn test_attach_to_boxed_envelope_unwraps_it() {
        let attributor = sequential();

        let boxed: BoxError = Box::new(attributor.attach(Whoops, Note(1), here()));
        let envelope = attributor.attach(boxed, Note(2), here());

        assert_eq!(envelope.len(), 2);
        assert!(envelope.downcast_base_ref::<Whoops>().is_some());
    }

    #[test]
    fn test_attach_reuses_registered_identity() {
        let attributor = sequential();

        let first = attributor.attach(IdentifiedWhoops { id: 77 }, Note(1), here());
        let second = attributor.attach(first.clone(), Note(2), here());

        assert_eq!(first.identity(), &Identity::new(77_u32));
        assert_eq!(second.identity(), &Identity::new(77_u32));
    }

    #[test]
    fn test_unregistered_identifiable_gets_generated_identity() {
        let attributor = Attributor::builder().generator(SequenceGenerator::new()).build();

        let envelope = attributor.attach(IdentifiedWhoops { id: 77 }, Note(1), here());

        assert_eq!(envelope.identity(), &Identity::new(0_u64));
    }

    #[test]
    fn test_attach_empty_group() {
        let attributor = sequential();

        let envelope = attributor.attach(Whoops, attributes![], here());

        assert!(envelope.is_empty());
        assert_eq!(envelope.identity(), &Identity::new(0_u64));
    }

    #[test]
    fn test_try_attach_propagates_generator_failure() {
        let attributor = Attributor::builder().generator(FailingGenerator).build();

        let result = attributor.try_attach(Whoops, Note(1), here());

        assert!(matches!(result, Err(IdentityError::Unavailable(_))));
    }

    #[test]
    fn test_try_attach_to_envelope_never_generates() {
        let working = sequential();
        let failing = Attributor::builder().generator(FailingGenerator).build();

        let envelope = working.attach(Whoops, Note(1), here());
        let result = failing.try_attach(envelope, Note(2), here());

        assert!(result.is_ok());
    }

    #[test]
    #[should_panic(expected = "identity generation failed")]
    fn test_attach_panics_on_generator_failure() {
        let attributor = Attributor::builder().generator(FailingGenerator).build();

        let _ = attributor.attach(Whoops, Note(1), here());
    }

    #[test]
    fn test_identifiable_plain_error_generates_each_time() {
        let attributor = sequential();

        let first = attributor.identifiable(Whoops);
        let second = attributor.identifiable(Whoops);

        assert_eq!(first.identity(), Identity::new(0_u64));
        assert_eq!(second.identity(), Identity::new(1_u64));
        assert_eq!(first.to_string(), "whoops");
    }

    #[test]
    fn test_identifiable_returns_envelope_unchanged() {
        let attributor = sequential();
        let envelope = attributor.attach(Whoops, Note(1), here());
        let identity = envelope.identity().clone();

        let identifiable = attributor.identifiable(envelope);

        assert_eq!(identifiable.identity(), identity);
        let any: &(dyn Error + 'static) = &*identifiable;
        let envelope = any.downcast_ref::<AttributedError>().expect("still an envelope");
        assert_eq!(envelope.len(), 1);
    }

    #[test]
    fn test_identifiable_returns_registered_error_unchanged() {
        let attributor = sequential();

        let identifiable = attributor.identifiable(IdentifiedWhoops { id: 5 });

        assert_eq!(identifiable.identity(), Identity::new(5_u32));
        let any: &(dyn Error + 'static) = &*identifiable;
        assert!(any.downcast_ref::<IdentifiedWhoops>().is_some());
    }

    #[test]
    fn test_identity_of_never_generates() {
        let attributor = sequential();

        assert_eq!(attributor.identity_of(&Whoops), None);
        assert_eq!(
            attributor.identity_of(&IdentifiedWhoops { id: 3 }),
            Some(Identity::new(3_u32))
        );

        let envelope = attributor.attach(Whoops, Note(1), here());
        assert_eq!(attributor.identity_of(&envelope), Some(Identity::new(0_u64)));
    }

    #[test]
    fn test_default_generator_is_uuid() {
        let attributor = Attributor::default();

        let envelope = attributor.attach(Whoops, Note(1), here());

        assert!(envelope.identity().is::<Uuid>());
    }

    #[test]
    fn test_builder_registers_type_once() {
        let attributor = Attributor::builder()
            .identifiable::<IdentifiedWhoops>()
            .identifiable::<IdentifiedWhoops>()
            .build();

        assert_eq!(attributor.read_resolvers().len(), 1);
    }
}
