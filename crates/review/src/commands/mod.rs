//! Command implementations for the review CLI
//!
//! Each command resolves the configuration from the global flags, then
//! reads from it through the maker-scoped accessor.

pub mod check_version;
pub mod get;
pub mod show;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use review_config::{Configuration, CreateOptions};
use tracing::debug;

use crate::GlobalArgs;
use crate::overrides::parse_overrides;

const DEFAULT_SETTINGS_FILE: &str = "config.yml";

/// Resolve the configuration described by the global flags.
pub fn resolve(global: &GlobalArgs) -> Result<Configuration> {
    resolve_in(global, Path::new("."))
}

fn resolve_in(global: &GlobalArgs, cwd: &Path) -> Result<Configuration> {
    let mut options = CreateOptions::new();

    if let Some(maker) = &global.maker {
        options = options.with_maker(maker.clone());
    }

    if let Some(path) = settings_file(global, cwd) {
        debug!("using settings file {}", path.display());
        options = options.with_settings_file(path);
    }

    if !global.set.is_empty() {
        let overrides = parse_overrides(&global.set).context("Invalid --set argument")?;
        options = options.with_overrides(overrides);
    }

    Configuration::create(options).context("Failed to resolve configuration")
}

fn settings_file(global: &GlobalArgs, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = &global.config {
        return Some(path.clone());
    }
    let default = cwd.join(DEFAULT_SETTINGS_FILE);
    default.is_file().then_some(default)
}
