//! Property-based tests for the configuration store.
//!
//! These tests focus on the schema-closure and wrapping invariants under
//! arbitrary shapes and override sequences.

use proptest::prelude::*;

use super::{ConfigStore, ConfigValue};
use crate::value::{Scalar, Shape, Value};

// Strategy for generating leaf values (floats kept finite so equality
// comparisons behave)
fn scalar_strategy() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        Just(Scalar::Null),
        any::<bool>().prop_map(Scalar::Bool),
        any::<i64>().prop_map(Scalar::Integer),
        (-1.0e9..1.0e9).prop_map(Scalar::Float),
        "[a-z0-9]{0,12}".prop_map(Scalar::String),
    ]
}

// Strategy for generating values, nesting maps up to three levels deep
fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_map(Value::Scalar).prop_recursive(
        3,  // levels deep
        24, // total nodes
        4,  // entries per map
        |inner| {
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..4)
                .prop_map(|map| Value::Map(map.into_iter().collect()))
        },
    )
}

// Strategy for generating whole shapes
fn shape_strategy() -> impl Strategy<Value = Shape> {
    prop::collection::btree_map("[a-z]{1,8}", value_strategy(), 0..6)
        .prop_map(|map| map.into_iter().collect())
}

proptest! {
    // Every key of the default shape is readable and holds the wrapped
    // form of the value it was declared with
    #[test]
    fn construction_is_faithful(shape in shape_strategy()) {
        let store = ConfigStore::new(shape.clone());

        prop_assert_eq!(store.len(), shape.len());
        for (key, value) in &shape {
            let stored = store.get(key).unwrap();
            prop_assert_eq!(stored, &ConfigValue::from(value.clone()));
        }
    }

    // Reads without an intervening write return the same value
    #[test]
    fn get_is_idempotent(shape in shape_strategy()) {
        let store = ConfigStore::new(shape);

        for key in store.keys() {
            prop_assert_eq!(store.get(key).unwrap(), store.get(key).unwrap());
        }
    }

    // A key outside the default shape can be neither read nor written
    #[test]
    fn unknown_keys_are_rejected(shape in shape_strategy(), key in "[A-Z]{1,8}") {
        // Generated shape keys are lowercase, so this key is never present.
        let mut store = ConfigStore::new(shape);

        prop_assert!(store.get(&key).unwrap_err().is_key_not_found());
        prop_assert!(store.set(&key, 1).unwrap_err().is_key_not_found());
    }

    // No sequence of set/merge calls changes the key set
    #[test]
    fn key_set_is_closed(shape in shape_strategy(), values in prop::collection::vec(scalar_strategy(), 0..8)) {
        let mut store = ConfigStore::new(shape);
        let keys_before: Vec<String> = store.keys().cloned().collect();

        for (index, scalar) in values.into_iter().enumerate() {
            // Alternate valid overwrites with writes to an unknown key.
            if let Some(key) = keys_before.get(index % keys_before.len().max(1)).cloned() {
                let _ = store.set(&key, Value::Scalar(scalar.clone()));
            }
            let _ = store.set("UNKNOWN", Value::Scalar(scalar));
            let _ = store.merge(Shape::new().with("UNKNOWN", 1));
        }

        let keys_after: Vec<String> = store.keys().cloned().collect();
        prop_assert_eq!(keys_after, keys_before);
    }

    // A merge of values for declared keys applies all of them and leaves
    // the rest untouched
    #[test]
    fn merge_of_known_keys_applies(shape in shape_strategy(), replacement in scalar_strategy()) {
        let mut store = ConfigStore::new(shape.clone());

        // Override every other key with the replacement scalar.
        let overrides: Shape = shape
            .keys()
            .enumerate()
            .filter(|(index, _)| index % 2 == 0)
            .map(|(_, key)| (key.clone(), Value::Scalar(replacement.clone())))
            .collect();
        let overridden: Vec<String> = overrides.keys().cloned().collect();

        store.merge(overrides).unwrap();

        for (key, value) in &shape {
            let expected = if overridden.contains(key) {
                ConfigValue::Scalar(replacement.clone())
            } else {
                ConfigValue::from(value.clone())
            };
            prop_assert_eq!(store.get(key).unwrap(), &expected);
        }
    }

    // A merge containing any unknown key changes nothing
    #[test]
    fn failing_merge_is_atomic(shape in shape_strategy(), replacement in scalar_strategy()) {
        let mut store = ConfigStore::new(shape.clone());
        let before = store.clone();

        let mut overrides: Shape = shape
            .keys()
            .map(|key| (key.clone(), Value::Scalar(replacement.clone())))
            .collect();
        overrides.insert("UNKNOWN", 1);

        prop_assert!(store.merge(overrides).unwrap_err().is_key_not_found());
        prop_assert_eq!(store, before);
    }

    // Replacing a nested key with a new map installs exactly the new
    // map's key set, independent of the old child's schema
    #[test]
    fn replaced_child_schema_is_independent(
        old_child in shape_strategy(),
        new_child in shape_strategy(),
    ) {
        let mut store = ConfigStore::new(Shape::new().with("child", old_child));

        store.set("child", new_child.clone()).unwrap();

        let child = store.store("child").unwrap();
        let child_keys: Vec<&String> = child.keys().collect();
        let expected_keys: Vec<&String> = new_child.keys().collect();
        prop_assert_eq!(child_keys, expected_keys);
    }
}
