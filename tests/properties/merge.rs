//! Property tests for the deep-merge algorithm.

use proptest::prelude::*;
use serde_json::{Map, Value};

use localepack::deep_merge;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| Value::from(n)),
        "[a-z]{0,8}".prop_map(Value::String),
        proptest::collection::vec(any::<i32>(), 0..4)
            .prop_map(|v| Value::Array(v.into_iter().map(Value::from).collect())),
    ]
}

fn translation_object() -> impl Strategy<Value = Map<String, Value>> {
    let leaf = scalar();
    let value = leaf.prop_recursive(3, 24, 4, |inner| {
        proptest::collection::btree_map("[a-c]{1,2}", inner, 0..4)
            .prop_map(|m| Value::Object(m.into_iter().collect()))
    });
    proptest::collection::btree_map("[a-c]{1,2}", value, 0..4)
        .prop_map(|m| m.into_iter().collect())
}

fn merged(sources: &[Map<String, Value>]) -> Map<String, Value> {
    let mut target = Map::new();
    for source in sources {
        deep_merge(&mut target, source.clone());
    }
    target
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: merging into an empty target reproduces the source.
    #[test]
    fn property_merge_into_empty_is_identity(source in translation_object()) {
        prop_assert_eq!(merged(&[source.clone()]), source);
    }

    /// PROPERTY: merging the same source twice changes nothing.
    #[test]
    fn property_merge_is_idempotent(source in translation_object()) {
        let once = merged(&[source.clone()]);
        let twice = merged(&[source.clone(), source]);
        prop_assert_eq!(once, twice);
    }

    /// PROPERTY: the last source wins on every top-level non-object key
    /// (right bias).
    #[test]
    fn property_last_source_wins_on_non_object_keys(
        a in translation_object(),
        b in translation_object()
    ) {
        let result = merged(&[a, b.clone()]);
        for (key, value) in &b {
            if !value.is_object() {
                prop_assert_eq!(result.get(key), Some(value));
            }
        }
    }

    /// PROPERTY: every key in any source survives into the result.
    #[test]
    fn property_no_keys_lost(
        a in translation_object(),
        b in translation_object()
    ) {
        let result = merged(&[a.clone(), b.clone()]);
        for key in a.keys().chain(b.keys()) {
            prop_assert!(result.contains_key(key), "lost key {}", key);
        }
    }
}
