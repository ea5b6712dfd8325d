//! Command-line overrides.
//!
//! Each `--set KEY=VALUE` flag becomes a nested mapping. Dotted keys descend
//! into nested mappings, so `pdfmaker.makeindex=true` only touches
//! `makeindex` inside `pdfmaker`. Values that YAML reads as a boolean,
//! number or null get that type, and values written as a flow collection
//! (`[a, b]`, `{k: v}`) become sequences or mappings. Anything else is kept
//! verbatim as a string, so `Re:VIEW: A Guide` or `Draft 1 # rev` are not
//! reinterpreted. Later flags win over earlier ones.

use anyhow::{Result, bail};
use review_config::{ConfigMap, ConfigValue, config_value_from_yaml, deep_merge};
use yaml_rust2::YamlLoader;

/// Build the override mapping from raw `KEY=VALUE` arguments.
pub fn parse_overrides<S: AsRef<str>>(assignments: &[S]) -> Result<ConfigMap> {
    let mut overrides = ConfigMap::new();
    for assignment in assignments {
        let (path, value) = parse_assignment(assignment.as_ref())?;
        deep_merge(&mut overrides, nest(&path, value));
    }
    Ok(overrides)
}

fn parse_assignment(assignment: &str) -> Result<(Vec<String>, ConfigValue)> {
    let Some((key, raw_value)) = assignment.split_once('=') else {
        bail!("expected KEY=VALUE, got '{}'", assignment);
    };
    let path: Vec<String> = key.trim().split('.').map(str::to_string).collect();
    if path.iter().any(String::is_empty) {
        bail!("invalid key '{}' in '{}'", key, assignment);
    }
    Ok((path, parse_value(raw_value)))
}

fn parse_value(raw: &str) -> ConfigValue {
    let text = ConfigValue::from(raw);
    if raw.trim().is_empty() {
        return text;
    }
    let Some(parsed) = YamlLoader::load_from_str(raw)
        .ok()
        .and_then(|documents| documents.into_iter().next())
        .map(config_value_from_yaml)
    else {
        return text;
    };

    let flow_collection = raw.trim_start().starts_with(['[', '{']);
    match parsed {
        ConfigValue::Bool(_)
        | ConfigValue::Integer(_)
        | ConfigValue::Float(_)
        | ConfigValue::Null => parsed,
        ConfigValue::Array(_) | ConfigValue::Map(_) if flow_collection => parsed,
        _ => text,
    }
}

fn nest(path: &[String], value: ConfigValue) -> ConfigMap {
    let mut nested = value;
    for key in path.iter().skip(1).rev() {
        nested = ConfigValue::Map([(key.clone(), nested)].into_iter().collect());
    }
    let mut root = ConfigMap::new();
    if let Some(first) = path.first() {
        root.insert(first.clone(), nested);
    }
    root
}
