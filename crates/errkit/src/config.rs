//! Configuration types for the errkit attributor.
//!
//! This module provides configuration structures that control how envelopes
//! get their identities and how they are described. All types implement
//! [`serde::Deserialize`] and can be loaded from TOML.
//!
//! # Overview
//!
//! - [`KitConfig`] - Top-level configuration combining identity and description settings.
//! - [`IdentityConfig`] - Controls which [`IdentityGenerator`](errkit_core::IdentityGenerator) is used.
//! - [`DescribeConfig`] - Controls how [`AttributedError::describe`](errkit_core::AttributedError::describe) renders.
//!
//! # Example
//!
//! ```
//! # use errkit::config::{IdentityKind, KitConfig};
//! let config = KitConfig::from_toml_str(
//!     r#"
//!     [describe]
//!     indent = "  "
//!
//!     [identity]
//!     kind = "sequence"
//!     start = 100
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.describe().indent(), "  ");
//! assert_eq!(config.identity().kind(), IdentityKind::Sequence);
//!
//! // Ready to be installed with `errkit::install`.
//! let attributor = config.build();
//! # let _ = attributor;
//! ```

use std::{fs, path::Path};

use log::{debug, info};
use serde::Deserialize;

use errkit_core::{Attributor, SequenceGenerator, UuidGenerator};

pub use errkit_core::DescribeConfig;

use crate::error::ConfigError;

/// Top-level errkit configuration combining identity and description
/// settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KitConfig {
    /// Description section.
    #[serde(default)]
    describe: DescribeConfig,

    /// Identity section.
    #[serde(default)]
    identity: IdentityConfig,
}

impl KitConfig {
    /// Creates a new [`KitConfig`] with the specified sections.
    ///
    /// # Arguments
    ///
    /// * `describe` - Description style for envelopes.
    /// * `identity` - Identity generation settings.
    pub fn new(describe: DescribeConfig, identity: IdentityConfig) -> Self {
        Self { describe, identity }
    }

    /// Parses and validates a configuration from TOML text.
    ///
    /// Missing sections and fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid TOML for this
    /// schema, or [`ConfigError::Validation`] if the values are inconsistent.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: KitConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File doesn't exist
    /// - File cannot be read
    /// - TOML parsing or validation fails
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading errkit configuration");

        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;

        debug!(identity:? = config.identity.kind; "Configuration loaded");
        Ok(config)
    }

    /// Returns the description section.
    pub fn describe(&self) -> &DescribeConfig {
        &self.describe
    }

    /// Returns the identity section.
    pub fn identity(&self) -> &IdentityConfig {
        &self.identity
    }

    /// Builds an [`Attributor`] from this configuration.
    pub fn build(&self) -> Attributor {
        Attributor::from(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.identity.kind == IdentityKind::Uuid && self.identity.start.is_some() {
            return Err(ConfigError::Validation(
                "`identity.start` only applies to `kind = \"sequence\"`".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<&KitConfig> for Attributor {
    fn from(config: &KitConfig) -> Self {
        let builder = Attributor::builder().describe(config.describe.clone());
        let builder = match config.identity.kind {
            IdentityKind::Uuid => builder.generator(UuidGenerator),
            IdentityKind::Sequence => builder.generator(SequenceGenerator::starting_at(
                config.identity.start.unwrap_or_default(),
            )),
        };
        builder.build()
    }
}

/// The source of identities for errors that have none of their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityKind {
    /// Random version 4 UUIDs.
    #[default]
    Uuid,

    /// Process-local increasing integers.
    Sequence,
}

/// Identity generation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityConfig {
    /// Which generator to use.
    #[serde(default)]
    kind: IdentityKind,

    /// First value of a sequence generator.
    #[serde(default)]
    start: Option<u64>,
}

impl IdentityConfig {
    /// Creates a new [`IdentityConfig`].
    ///
    /// # Arguments
    ///
    /// * `kind` - Which generator to use.
    /// * `start` - First value of a sequence generator.
    pub fn new(kind: IdentityKind, start: Option<u64>) -> Self {
        Self { kind, start }
    }

    /// Returns the generator kind.
    pub fn kind(&self) -> IdentityKind {
        self.kind
    }

    /// Returns the configured sequence start, if any.
    pub fn start(&self) -> Option<u64> {
        self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = KitConfig::from_toml_str("").unwrap();

        assert_eq!(config.describe(), &DescribeConfig::default());
        assert_eq!(config.identity().kind(), IdentityKind::Uuid);
        assert_eq!(config.identity().start(), None);
    }

    #[test]
    fn test_partial_describe_section() {
        let config = KitConfig::from_toml_str("[describe]\nshow_identity = false\n").unwrap();

        assert_eq!(config.describe().indent(), "    ");
        assert!(!config.describe().show_identity());
        assert!(config.describe().show_base());
    }

    #[test]
    fn test_unknown_identity_kind_is_rejected() {
        let error = KitConfig::from_toml_str("[identity]\nkind = \"random\"\n").unwrap_err();

        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn test_start_requires_sequence() {
        let error = KitConfig::from_toml_str("[identity]\nstart = 5\n").unwrap_err();

        assert!(matches!(error, ConfigError::Validation(_)));
    }

    #[test]
    fn test_build_sequence_attributor() {
        let config = KitConfig::new(
            DescribeConfig::new("\t", true, false),
            IdentityConfig::new(IdentityKind::Sequence, Some(41)),
        );

        let attributor = config.build();
        let identity = attributor.generator().generate().unwrap();

        assert_eq!(identity.downcast_ref::<u64>(), Some(&41));
        assert_eq!(attributor.describe_config().indent(), "\t");
    }

    #[test]
    fn test_missing_file() {
        let error = KitConfig::load("/nonexistent/errkit.toml").unwrap_err();

        assert!(matches!(error, ConfigError::MissingFile(_)));
    }
}
