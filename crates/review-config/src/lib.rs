//! Layered configuration resolution for the Re:VIEW book toolchain.
//!
//! A build resolves its settings from three layers, lowest priority first:
//!
//! 1. the built-in default catalog
//! 2. the project's settings file (`config.yml`)
//! 3. command-line overrides
//!
//! Obsolete settings are rewritten between layers 2 and 3, and the result is
//! read through a maker-aware accessor so that an output target such as
//! `pdfmaker` or `epubmaker` can shadow individual keys.
//!
//! # Key Features
//!
//! - **Deep merge**: nested mappings merge key by key; everything else is replaced
//! - **Maker scoping**: `config.get(key)` consults the active maker's mapping first
//! - **Migrations**: legacy flags such as `mathml: true` become `math_format: mathml`
//! - **Version checks**: `review_version` is checked against the running toolchain
//!
//! # Example
//!
//! ```rust,no_run
//! use review_config::{Configuration, CreateOptions, OnMismatch, toolchain_version};
//!
//! let config = Configuration::create(
//!     CreateOptions::new()
//!         .with_maker("pdfmaker")
//!         .with_settings_file("config.yml"),
//! )?;
//!
//! config.check_version(toolchain_version(), OnMismatch::Error)?;
//! if let Some(title) = config.get("booktitle") {
//!     println!("Building {}", title);
//! }
//! # Ok::<(), review_config::ConfigError>(())
//! ```

mod configure;
mod convert;
mod defaults;
mod error;
#[cfg(test)]
mod generators;
mod loader;
mod merge;
mod migrate;
mod types;
mod version;

pub use configure::{Configuration, CreateOptions, OnMismatch, VERSION_KEY};

pub use types::{ConfigMap, ConfigValue};

pub use error::{ConfigError, LoadError, Result};

pub use defaults::baseline;

pub use merge::{deep_merge, deep_merged};

pub use migrate::{AppliedMigration, MIGRATIONS, Migration};

pub use loader::{SettingsLoader, YamlLoader, parse_settings};

pub use convert::{config_map_from_yaml, config_value_from_yaml};

pub use version::{VersionNumber, toolchain_version};
