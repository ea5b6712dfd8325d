//! Rewrites of obsolete settings into their current form.
//!
//! Migrations run once per resolution, after the settings file is merged and
//! before command-line overrides, so an override of the current key always
//! beats a migrated legacy value. Rules apply in table order.

use crate::configure::Configuration;
use crate::types::{ConfigMap, ConfigValue};

/// A single obsolete-key rule.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    /// The obsolete key, read through the maker-scoped accessor.
    pub legacy_key: &'static str,
    /// Whether the legacy value calls for a rewrite.
    pub applies: fn(&ConfigValue) -> bool,
    /// Writes the current-form setting at the top level.
    pub apply: fn(&mut ConfigMap),
    pub message: &'static str,
}

/// A migration that was performed during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMigration {
    pub legacy_key: &'static str,
    pub message: &'static str,
}

pub static MIGRATIONS: &[Migration] = &[
    Migration {
        legacy_key: "mathml",
        applies: ConfigValue::is_truthy,
        apply: use_mathml,
        message: r#""mathml: true" is obsoleted. Please use "math_format: mathml""#,
    },
    Migration {
        legacy_key: "imgmath",
        applies: ConfigValue::is_truthy,
        apply: use_imgmath,
        message: r#""imgmath: true" is obsoleted. Please use "math_format: imgmath""#,
    },
];

const MATH_FORMAT: &str = "math_format";

fn use_mathml(values: &mut ConfigMap) {
    values.insert(MATH_FORMAT.to_string(), "mathml".into());
}

fn use_imgmath(values: &mut ConfigMap) {
    values.insert(MATH_FORMAT.to_string(), "imgmath".into());
}

/// Apply every rule in [`MIGRATIONS`], logging a warning for each one used.
pub(crate) fn apply_migrations(config: &mut Configuration) -> Vec<AppliedMigration> {
    let mut applied = Vec::new();
    for rule in MIGRATIONS {
        if !config.get(rule.legacy_key).is_some_and(rule.applies) {
            continue;
        }
        tracing::warn!("{}", rule.message);
        (rule.apply)(config.values_mut());
        applied.push(AppliedMigration {
            legacy_key: rule.legacy_key,
            message: rule.message,
        });
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{gen_key, gen_map};
    use proptest::prelude::*;

    fn config_with(entries: Vec<(&str, ConfigValue)>) -> Configuration {
        let mut config = Configuration::new();
        config.merge(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        );
        config
    }

    #[test]
    fn test_no_legacy_keys_is_a_no_op() {
        let mut config = config_with(vec![("math_format", "mathml".into())]);
        let before = config.clone();

        let applied = apply_migrations(&mut config);

        assert!(applied.is_empty());
        assert_eq!(config.get("math_format"), before.get("math_format"));
    }

    #[test]
    fn test_mathml_flag() {
        let mut config = config_with(vec![("mathml", true.into())]);
        let applied = apply_migrations(&mut config);

        assert_eq!(config.get("math_format"), Some(&ConfigValue::from("mathml")));
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].legacy_key, "mathml");
        assert!(applied[0].message.contains("math_format: mathml"));
    }

    #[test]
    fn test_imgmath_flag() {
        let mut config = config_with(vec![("imgmath", true.into())]);
        apply_migrations(&mut config);
        assert_eq!(config.get("math_format"), Some(&ConfigValue::from("imgmath")));
    }

    #[test]
    fn test_false_flag_is_ignored() {
        let mut config = config_with(vec![("mathml", false.into()), ("imgmath", ConfigValue::Null)]);
        let applied = apply_migrations(&mut config);

        assert!(applied.is_empty());
        assert_eq!(config.get("math_format"), Some(&ConfigValue::Null));
    }

    #[test]
    fn test_imgmath_wins_when_both_are_set() {
        let mut config = config_with(vec![("mathml", true.into()), ("imgmath", true.into())]);
        let applied = apply_migrations(&mut config);

        assert_eq!(applied.len(), 2);
        assert_eq!(config.get("math_format"), Some(&ConfigValue::from("imgmath")));
    }

    #[test]
    fn test_legacy_flag_is_read_through_maker_scope() {
        let mut epub = ConfigMap::new();
        epub.insert("mathml".to_string(), true.into());
        let mut config = config_with(vec![("epubmaker", epub.into())]);
        config.set_maker(Some("epubmaker"));

        apply_migrations(&mut config);

        // the rewrite lands at the top level
        config.clear_maker();
        assert_eq!(config.get("math_format"), Some(&ConfigValue::from("mathml")));
    }

    proptest! {
        #[test]
        fn settings_without_legacy_keys_are_left_alone(
            settings in gen_map(),
            maker in proptest::option::of(gen_key()),
        ) {
            let mut config = Configuration::new();
            config.merge(settings);
            config.set_maker(maker.as_deref());
            let before = config.clone();

            let applied = apply_migrations(&mut config);

            prop_assert!(applied.is_empty());
            prop_assert_eq!(config, before);
        }

        #[test]
        fn truthy_legacy_flag_always_sets_math_format(
            settings in gen_map(),
            flag in prop_oneof![Just("mathml"), Just("imgmath")],
        ) {
            let mut config = Configuration::new();
            config.merge(settings);
            let mut legacy = ConfigMap::new();
            legacy.insert(flag.to_string(), true.into());
            config.merge(legacy);

            let applied = apply_migrations(&mut config);

            prop_assert_eq!(applied.len(), 1);
            prop_assert_eq!(config.get("math_format"), Some(&ConfigValue::from(flag)));
        }
    }
}
