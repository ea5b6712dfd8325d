//! Deep merge of configuration layers.
//!
//! Layers are applied one at a time, lowest priority first:
//!
//! 1. the default catalog
//! 2. the settings file
//! 3. command-line overrides
//!
//! # Semantics
//!
//! - When both sides hold a map at the same key, the merge recurses and
//!   sibling keys the override does not mention survive.
//! - Otherwise the override replaces the existing value outright. Arrays are
//!   replaced, never concatenated.
//! - Keys only in the base are kept; keys only in the override are appended.
//!
//! Merging is not commutative; `deep_merge(a, b)` lets `b` win.

use crate::types::{ConfigMap, ConfigValue};

/// Merge `overrides` into `base` in place.
pub fn deep_merge(base: &mut ConfigMap, overrides: ConfigMap) {
    for (key, value) in overrides {
        if let Some(current) = base.get_mut(&key) {
            match (current, value) {
                (ConfigValue::Map(existing), ConfigValue::Map(incoming)) => {
                    deep_merge(existing, incoming);
                }
                (slot, value) => *slot = value,
            }
        } else {
            base.insert(key, value);
        }
    }
}

/// Merge `overrides` onto a copy of `base`.
pub fn deep_merged(base: &ConfigMap, overrides: ConfigMap) -> ConfigMap {
    let mut merged = base.clone();
    deep_merge(&mut merged, overrides);
    merged
}
