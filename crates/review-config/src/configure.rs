//! The configuration resolver.
//!
//! A [`Configuration`] is built once per build invocation:
//!
//! 1. start from the default catalog ([`crate::defaults::baseline`])
//! 2. deep-merge the settings file, if any
//! 3. rewrite obsolete keys ([`crate::migrate`])
//! 4. deep-merge command-line overrides, if any
//!
//! After that it is read-only apart from the active maker, which the build
//! pipeline switches as it moves between output targets. A `Configuration`
//! holds no interior mutability; share it across threads only for reads and
//! give each concurrent task its own copy if it needs a different maker.
//!
//! # Maker scoping
//!
//! When a maker such as `"pdfmaker"` is active and the configuration has a
//! mapping under that name containing the requested key, [`Configuration::get`]
//! returns the maker's value instead of the top-level one:
//!
//! ```rust
//! use review_config::{ConfigMap, ConfigValue, Configuration};
//!
//! let mut pdf = ConfigMap::new();
//! pdf.insert("toclevel".to_string(), 1.into());
//!
//! let mut config = Configuration::new();
//! config.merge(ConfigMap::from_iter([("pdfmaker".to_string(), pdf.into())]));
//!
//! assert_eq!(config.get("toclevel"), Some(&ConfigValue::Integer(3)));
//! config.set_maker(Some("pdfmaker"));
//! assert_eq!(config.get("toclevel"), Some(&ConfigValue::Integer(1)));
//! ```

use crate::defaults::baseline;
use crate::error::{ConfigError, Result};
use crate::loader::{SettingsLoader, YamlLoader};
use crate::merge::deep_merge;
use crate::migrate::{AppliedMigration, apply_migrations};
use crate::types::{ConfigMap, ConfigValue, serialize_entries};
use crate::version::VersionNumber;
use serde::{Serialize, Serializer};
use std::path::PathBuf;

/// The key carrying a settings file's version marker.
pub const VERSION_KEY: &str = "review_version";

const NAME_KEY: &str = "name";

/// Inputs for [`Configuration::create`].
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    /// Maker active from the start, including during migrations.
    pub maker: Option<String>,

    /// Settings file to overlay on the defaults.
    pub settings_file: Option<PathBuf>,

    /// Command-line overrides, applied last.
    pub overrides: Option<ConfigMap>,
}

impl CreateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_maker(mut self, maker: impl Into<String>) -> Self {
        self.maker = Some(maker.into());
        self
    }

    pub fn with_settings_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_file = Some(path.into());
        self
    }

    pub fn with_overrides(mut self, overrides: ConfigMap) -> Self {
        self.overrides = Some(overrides);
        self
    }
}

/// What [`Configuration::check_version`] does on an incompatible marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnMismatch {
    /// Return the `ConfigError` describing the mismatch.
    #[default]
    Error,
    /// Return `Ok(false)`.
    ReturnFalse,
}

/// A resolved configuration with an optional active maker.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    values: ConfigMap,
    maker: Option<String>,
    migrations: Vec<AppliedMigration>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

impl Configuration {
    /// The default catalog with no maker set.
    pub fn new() -> Self {
        Self::from_map(baseline())
    }

    /// Wrap an already-resolved mapping. No defaults are added.
    pub fn from_map(values: ConfigMap) -> Self {
        Configuration {
            values,
            maker: None,
            migrations: Vec::new(),
        }
    }

    /// Resolve a configuration, reading the settings file as YAML.
    pub fn create(options: CreateOptions) -> Result<Self> {
        Self::create_with(options, &YamlLoader)
    }

    /// Resolve a configuration with a custom settings loader.
    ///
    /// A settings file that fails to load aborts construction with
    /// [`ConfigError::Settings`].
    pub fn create_with<L: SettingsLoader + ?Sized>(
        options: CreateOptions,
        loader: &L,
    ) -> Result<Self> {
        let CreateOptions {
            maker,
            settings_file,
            overrides,
        } = options;

        let mut config = Configuration::new();
        config.maker = maker;

        if let Some(path) = settings_file {
            let settings = loader
                .load_file(&path)
                .map_err(|source| ConfigError::Settings {
                    path: path.clone(),
                    source,
                })?;
            tracing::debug!("applying settings from {}", path.display());
            config.merge(settings);
        }

        config.migrations = apply_migrations(&mut config);

        if let Some(overrides) = overrides {
            tracing::debug!("applying {} command-line override(s)", overrides.len());
            config.merge(overrides);
        }

        Ok(config)
    }

    /// Deep-merge `overrides` on top of the current values.
    pub fn merge(&mut self, overrides: ConfigMap) {
        deep_merge(&mut self.values, overrides);
    }

    pub fn maker(&self) -> Option<&str> {
        self.maker.as_deref()
    }

    pub fn set_maker(&mut self, maker: Option<&str>) {
        self.maker = maker.map(str::to_string);
    }

    pub fn clear_maker(&mut self) {
        self.maker = None;
    }

    /// Migrations performed while this configuration was resolved.
    pub fn migrations(&self) -> &[AppliedMigration] {
        &self.migrations
    }

    /// Look up a key, honoring the active maker.
    ///
    /// The maker's value wins when a maker is set, the top level holds a
    /// mapping under the maker's name, and that mapping contains `key`. The
    /// value is returned even if it is null or false. A maker entry that is
    /// not a mapping never shadows anything.
    ///
    /// This is the read path for consumers; there is no unscoped getter.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        let scoped = self
            .maker
            .as_deref()
            .and_then(|maker| self.values.get(maker))
            .and_then(|scope| scope.get(key));
        scoped.or_else(|| self.values.get(key))
    }

    /// Whether `key` is present at the top level. The maker is not consulted.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub(crate) fn values_mut(&mut self) -> &mut ConfigMap {
        &mut self.values
    }

    /// Check the `review_version` marker against the toolchain version.
    ///
    /// - no marker at all: incompatible
    /// - blank marker: compatible, whatever `required` is
    /// - different major version: incompatible
    /// - marker newer than `required`: incompatible
    /// - otherwise compatible; older minor versions are accepted
    ///
    /// `on_mismatch` picks between an `Err` and `Ok(false)` for the
    /// incompatible cases.
    pub fn check_version(&self, required: &str, on_mismatch: OnMismatch) -> Result<bool> {
        let fail = |err: ConfigError| match on_mismatch {
            OnMismatch::Error => Err(err),
            OnMismatch::ReturnFalse => Ok(false),
        };

        if !self.contains_key(VERSION_KEY) {
            return fail(ConfigError::MissingVersion);
        }
        let Some(marker) = self.get(VERSION_KEY).filter(|marker| !marker.is_blank()) else {
            return Ok(true);
        };

        let config_version = VersionNumber::from_value(marker);
        let toolchain_version = VersionNumber::parse(required);

        if config_version.major != toolchain_version.major {
            return fail(ConfigError::MajorVersionMismatch {
                toolchain: required.to_string(),
                config: marker.to_string(),
            });
        }
        if config_version.numeric > toolchain_version.numeric {
            return fail(ConfigError::NewerVersion {
                toolchain: required.to_string(),
                config: marker.to_string(),
            });
        }
        Ok(true)
    }

    /// Display form of a value that may name one or more people or things.
    ///
    /// Sequences are joined with commas, each element contributing its name
    /// as [`Configuration::names_of`] gives it. Mappings give their `name`
    /// field and anything else is returned as-is. `None` if the key is absent.
    pub fn name_of(&self, key: &str) -> Option<ConfigValue> {
        let value = self.get(key)?;
        Some(match value {
            ConfigValue::Array(items) => ConfigValue::String(
                items
                    .iter()
                    .map(|item| element_name(item).to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            ConfigValue::Map(entries) => name_field(entries),
            other => other.clone(),
        })
    }

    /// Like [`Configuration::name_of`], but keeps each name separate.
    ///
    /// An absent key yields a single `Null`.
    pub fn names_of(&self, key: &str) -> Vec<ConfigValue> {
        match self.get(key) {
            Some(ConfigValue::Array(items)) => items.iter().map(element_name).collect(),
            Some(ConfigValue::Map(entries)) => vec![name_field(entries)],
            Some(other) => vec![other.clone()],
            None => vec![ConfigValue::Null],
        }
    }
}

fn element_name(item: &ConfigValue) -> ConfigValue {
    match item {
        ConfigValue::Map(entries) => name_field(entries),
        other => other.clone(),
    }
}

fn name_field(entries: &ConfigMap) -> ConfigValue {
    entries.get(NAME_KEY).cloned().unwrap_or_default()
}

impl Serialize for Configuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_entries(&self.values, serializer)
    }
}
