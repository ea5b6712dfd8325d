//! Error types for configuration resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a settings file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML syntax error, carrying the parser's message.
    #[error("{message}")]
    Syntax { path: PathBuf, message: String },

    #[error("{} must contain a mapping at the top level", path.display())]
    NotAMapping { path: PathBuf },

    #[error("found circular YAML inheritance '{}'", path.display())]
    CircularInherit { path: PathBuf },

    #[error("'inherit' in {} must be a list of file names", path.display())]
    InvalidInherit { path: PathBuf },
}

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings file could not be loaded. Fatal for construction.
    #[error("yaml error {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("configuration file has no review_version property.")]
    MissingVersion,

    #[error("major version of configuration file is different.")]
    MajorVersionMismatch { toolchain: String, config: String },

    /// The settings file was written for a newer toolchain.
    #[error(
        "toolchain version '{toolchain}' is older than configuration file's version '{config}'."
    )]
    NewerVersion { toolchain: String, config: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
