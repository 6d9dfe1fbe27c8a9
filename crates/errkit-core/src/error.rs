//! Error types for the attribution engine.
//!
//! Attaching, querying and describing never fail. The only failure class is
//! an identity source that cannot produce a value, plus the one-time
//! installation of the process-wide [`Attributor`](crate::Attributor).

use thiserror::Error;

/// Failure to produce a fresh identity.
///
/// This is a fatal configuration problem: the engine never falls back to a
/// different identity source.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity generator `{generator}` is exhausted")]
    Exhausted { generator: &'static str },

    #[error("identity source unavailable: {0}")]
    Unavailable(String),
}

/// Failure to install the process-wide attributor.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("an attributor is already installed for this process")]
    AlreadyInstalled,
}
