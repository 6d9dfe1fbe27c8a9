//! Error types for errkit configuration.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while loading a [`KitConfig`](crate::config::KitConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse toml configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_lowercase() {
        let missing = ConfigError::MissingFile(PathBuf::from("errkit.toml"));
        let invalid = ConfigError::Validation("bad start".to_string());

        assert_eq!(missing.to_string(), "missing configuration file: errkit.toml");
        assert_eq!(invalid.to_string(), "validation error: bad start");
    }

    #[test]
    fn test_io_conversion() {
        let error: ConfigError = io::Error::other("denied").into();

        assert!(matches!(error, ConfigError::Io(_)));
        assert_eq!(error.to_string(), "i/o error: denied");
    }
}
