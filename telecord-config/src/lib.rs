//! Shared configuration loader for the telecord toolchain.
//!
//! `defaults/telecord.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`TelecordConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use telecord_markup::formats::html::HtmlOptions;
use telecord_markup::ConverterOptions;

const DEFAULT_TOML: &str = include_str!("../defaults/telecord.default.toml");

/// Top-level configuration consumed by telecord applications.
#[derive(Debug, Clone, Deserialize)]
pub struct TelecordConfig {
    pub discord: DiscordConfig,
    pub telegram: TelegramConfig,
    pub html: HtmlConfig,
}

/// Limits applied to messages sent to Discord.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    pub max_message_length: usize,
    pub quote_max_length: usize,
}

impl From<&DiscordConfig> for ConverterOptions {
    fn from(config: &DiscordConfig) -> Self {
        ConverterOptions {
            max_message_length: config.max_message_length,
            quote_max_length: config.quote_max_length,
        }
    }
}

/// Layout of messages sent to Telegram.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    pub inline_header_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub code_class: String,
}

impl From<&HtmlConfig> for HtmlOptions {
    fn from(config: &HtmlConfig) -> Self {
        HtmlOptions {
            code_class: config.code_class.clone(),
        }
    }
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

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<TelecordConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TelecordConfig, ConfigError> {
    Loader::new().build()
}
