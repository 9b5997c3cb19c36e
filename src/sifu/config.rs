//! Configuration loader for the sifu toolchain.
//!
//! `defaults/sifu.default.toml` is embedded into the library so the documented
//! defaults and runtime behavior stay in sync. Callers layer user files and
//! command-line overrides on top via [`Loader`] before deserializing into
//! [`SifuConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use crate::sifu::parser::ParserConfig;

const DEFAULT_TOML: &str = include_str!("../../defaults/sifu.default.toml");

/// Top-level configuration consumed by sifu applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SifuConfig {
    pub parser: ParserConfig,
    pub output: OutputConfig,
}

/// Controls what the CLI prints.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// A processing format string such as `ast-treeviz`
    pub format: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `parser.newline_is_semicolon`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<SifuConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SifuConfig, ConfigError> {
    Loader::new().build()
}
