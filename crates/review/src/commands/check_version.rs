//! `review check-version` - compare review_version with a toolchain version.

use std::process::ExitCode;

use anyhow::Result;
use review_config::{Configuration, OnMismatch, toolchain_version};
use tracing::info;

use crate::GlobalArgs;

pub fn execute(global: &GlobalArgs, required: Option<&str>, quiet: bool) -> Result<ExitCode> {
    let config = super::resolve(global)?;
    let compatible = is_compatible(&config, required_version(required), quiet);
    Ok(if compatible {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// The version to check against; this toolchain's own when none is given.
fn required_version(required: Option<&str>) -> &str {
    required.unwrap_or(toolchain_version())
}

fn is_compatible(config: &Configuration, required: &str, quiet: bool) -> bool {
    if quiet {
        return matches!(
            config.check_version(required, OnMismatch::ReturnFalse),
            Ok(true)
        );
    }

    match config.check_version(required, OnMismatch::Error) {
        Ok(_) => {
            info!("configuration is compatible with version {}", required);
            true
        }
        Err(e) => {
            eprintln!("error: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use review_config::ConfigMap;

    fn with_marker(marker: &str) -> Configuration {
        let mut values = ConfigMap::new();
        values.insert("review_version".to_string(), marker.into());
        Configuration::from_map(values)
    }

    #[test]
    fn test_compatible() {
        assert!(is_compatible(&with_marker("5.0"), "5.8.0", false));
        assert!(is_compatible(&with_marker("5.0"), "5.8.0", true));
    }

    #[test]
    fn test_incompatible() {
        assert!(!is_compatible(&with_marker("6.0"), "5.8.0", false));
        assert!(!is_compatible(&with_marker("5.9"), "5.8.0", true));
        assert!(!is_compatible(&Configuration::new(), "5.8.0", true));
    }

    #[test]
    fn test_blank_marker_is_always_compatible() {
        assert!(is_compatible(&with_marker(""), "1.0", true));
    }

    #[test]
    fn test_required_version_defaults_to_toolchain() {
        assert_eq!(required_version(None), toolchain_version());

        // a version borrowed from a short-lived argument is used as given
        let argument = String::from("4.2");
        assert_eq!(required_version(Some(argument.as_str())), "4.2");
    }

    #[test]
    fn test_own_version_is_compatible_with_itself() {
        let config = with_marker(toolchain_version());
        assert!(is_compatible(&config, required_version(None), true));
    }
}
