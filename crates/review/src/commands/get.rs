//! `review get` - print one resolved setting.

use std::process::ExitCode;

use anyhow::{Result, bail};
use review_config::{ConfigValue, Configuration};

use crate::GlobalArgs;

/// How the setting is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Value,
    Name,
    Names,
}

pub fn execute(global: &GlobalArgs, key: &str, mode: Mode) -> Result<ExitCode> {
    let config = super::resolve(global)?;
    for line in render(&config, key, mode)? {
        println!("{}", line);
    }
    Ok(ExitCode::SUCCESS)
}

fn render(config: &Configuration, key: &str, mode: Mode) -> Result<Vec<String>> {
    let Some(value) = config.get(key) else {
        bail!("no setting named '{}'", key);
    };

    Ok(match mode {
        Mode::Value => vec![format_value(value)?],
        Mode::Name => config
            .name_of(key)
            .map(|name| vec![name.to_string()])
            .unwrap_or_default(),
        Mode::Names => config
            .names_of(key)
            .iter()
            .map(ConfigValue::to_string)
            .collect(),
    })
}

/// Scalars print as text, collections as YAML.
fn format_value(value: &ConfigValue) -> Result<String> {
    if value.is_scalar() {
        return Ok(value.to_string());
    }
    Ok(serde_yaml::to_string(value)?.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use review_config::ConfigMap;

    fn sample() -> Configuration {
        let mut config = Configuration::new();
        let mut editor = ConfigMap::new();
        editor.insert("name".to_string(), "Eve".into());
        let mut overrides = ConfigMap::new();
        overrides.insert("aut".to_string(), vec!["Alice", "Bob"].into());
        overrides.insert("edt".to_string(), editor.into());
        config.merge(overrides);
        config
    }

    #[test]
    fn test_scalar_value() {
        let lines = render(&sample(), "toclevel", Mode::Value).unwrap();
        assert_eq!(lines, vec!["3"]);
    }

    #[test]
    fn test_collection_value_prints_yaml() {
        let lines = render(&sample(), "caption_position", Mode::Value).unwrap();
        assert_eq!(
            lines,
            vec!["list: top\nimage: bottom\ntable: top\nequation: top"]
        );
    }

    #[test]
    fn test_name_modes() {
        let config = sample();
        assert_eq!(render(&config, "aut", Mode::Name).unwrap(), vec!["Alice,Bob"]);
        assert_eq!(render(&config, "aut", Mode::Names).unwrap(), vec!["Alice", "Bob"]);
        assert_eq!(render(&config, "edt", Mode::Name).unwrap(), vec!["Eve"]);
    }

    #[test]
    fn test_unknown_key() {
        assert!(render(&sample(), "no_such_setting", Mode::Value).is_err());
    }
}
