//! Property-based test generators for configuration trees.
//!
//! Keys are drawn from a small alphabet so that generated overrides
//! regularly collide with generated bases, at every depth.

use crate::types::{ConfigMap, ConfigValue};
use proptest::prelude::*;

pub fn gen_key() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

pub fn gen_scalar() -> impl Strategy<Value = ConfigValue> {
    prop_oneof![
        Just(ConfigValue::Null),
        any::<bool>().prop_map(ConfigValue::Bool),
        any::<i64>().prop_map(ConfigValue::Integer),
        (-1.0e6..1.0e6f64).prop_map(ConfigValue::Float),
        "[a-z ]{0,8}".prop_map(ConfigValue::String),
    ]
}

/// Scalars, sequences and mappings nested up to three levels.
pub fn gen_value() -> impl Strategy<Value = ConfigValue> {
    gen_scalar().prop_recursive(3, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(ConfigValue::Array),
            prop::collection::vec((gen_key(), inner), 0..4)
                .prop_map(|entries| ConfigValue::Map(entries.into_iter().collect())),
        ]
    })
}

pub fn gen_map() -> impl Strategy<Value = ConfigMap> {
    prop::collection::vec((gen_key(), gen_value()), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn gen_key_stays_in_alphabet(key in gen_key()) {
            prop_assert!(!key.is_empty());
            prop_assert!(key.chars().all(|c| ('a'..='e').contains(&c)));
        }

        #[test]
        fn gen_scalar_is_scalar(value in gen_scalar()) {
            prop_assert!(value.is_scalar());
        }
    }
}
