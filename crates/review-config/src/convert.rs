//! Conversion from YAML types to ConfigValue.

use crate::types::{ConfigMap, ConfigValue};
use yaml_rust2::Yaml;

/// Convert a parsed YAML node to a `ConfigValue`.
///
/// Reals that fail to parse are kept as their source text. Aliases and bad
/// values become `Null`.
pub fn config_value_from_yaml(yaml: Yaml) -> ConfigValue {
    match yaml {
        Yaml::Null | Yaml::BadValue | Yaml::Alias(_) => ConfigValue::Null,
        Yaml::Boolean(b) => ConfigValue::Bool(b),
        Yaml::Integer(i) => ConfigValue::Integer(i),
        Yaml::Real(ref text) => match yaml.as_f64() {
            Some(x) => ConfigValue::Float(x),
            None => ConfigValue::String(text.clone()),
        },
        Yaml::String(s) => ConfigValue::String(s),
        Yaml::Array(items) => {
            ConfigValue::Array(items.into_iter().map(config_value_from_yaml).collect())
        }
        Yaml::Hash(_) => ConfigValue::Map(config_map_from_yaml(yaml).unwrap_or_default()),
    }
}

/// Convert a YAML hash to a `ConfigMap`. Returns `None` for any other node.
///
/// Scalar keys are stringified (`1: x` becomes `"1"`). Null and collection
/// keys have no string form and are dropped.
pub fn config_map_from_yaml(yaml: Yaml) -> Option<ConfigMap> {
    let Yaml::Hash(hash) = yaml else {
        return None;
    };

    let mut entries = ConfigMap::with_capacity(hash.len());
    for (key, value) in hash {
        match key_to_string(&key) {
            Some(key) => {
                entries.insert(key, config_value_from_yaml(value));
            }
            None => tracing::debug!("dropping settings entry with non-scalar key {:?}", key),
        }
    }
    Some(entries)
}

fn key_to_string(key: &Yaml) -> Option<String> {
    match key {
        Yaml::String(s) | Yaml::Real(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}
