//! Property-based tests for the matcher.
//!
//! Any JSON value, turned into a pattern of literals, has to match itself:
//! - with every leaf counted exactly once
//! - echoing the value itself as `matches`
//! - regardless of the order of array elements in the payload
//!
//! and has to read back unchanged after serializing it.

use objectron::*;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        any::<u64>().prop_map(|n| json!(n)),
        (-1e9f64..1e9).prop_map(|f| json!(f)),
        "[a-z ]{0,8}".prop_map(Value::String),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    value_strategy_with_keys("[a-z]{1,4}")
}

fn value_strategy_with_keys(keys: &'static str) -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(4, 48, 6, move |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(keys, inner, 0..6)
                .prop_map(|map| Value::Object(map.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

proptest! {
    #[test]
    fn literal_pattern_matches_itself(value in value_strategy()) {
        let p = Pattern::from(value.clone());
        for matcher in [
            Matcher::default(),
            Matcher::new(MatchOptions::builder().ordered_arrays().reject_extra_keys().build()),
        ] {
            let result = matcher.match_payload(&value, &p);
            prop_assert!(result.is_match, "{:?}", result.mismatch);
            prop_assert_eq!(result.total, p.leaf_count());
            prop_assert_eq!(&result.matches, &value);
            prop_assert!(result.groups.is_empty());
        }
    }

    #[test]
    fn unordered_arrays_ignore_order(values in prop::collection::vec(leaf_strategy(), 0..8).prop_shuffle()) {
        let mut reversed = values.clone();
        reversed.reverse();
        let payload = Value::Array(values);
        let p = Pattern::from(Value::Array(reversed.clone()));

        let result = match_payload(&payload, &p);
        prop_assert!(result.is_match, "{:?}", result.mismatch);
        prop_assert_eq!(result.total, reversed.len());
        prop_assert_eq!(result.matches, Value::Array(reversed));
    }

    #[test]
    fn changed_leaf_is_reported(value in value_strategy(), replacement in "[A-Z]{1,4}") {
        // every string in the payload is lowercase, so an uppercase replacement can never match
        let mut payload = json!({ "wrapped": value.clone() });
        payload["extra"] = Value::String(replacement.clone());
        let p = pattern!({ "wrapped": (value), "extra": (replacement.to_lowercase()) });

        let result = match_payload(&payload, &p);
        prop_assert!(!result.is_match);
        let mismatch = result.mismatch.unwrap();
        prop_assert_eq!(mismatch.path, "/extra");
        prop_assert_eq!(mismatch.kind, MismatchKind::NotEqual);
        prop_assert_eq!(result.total, p.leaf_count());
    }

    #[test]
    fn serialized_pattern_reads_back_unchanged(value in value_strategy_with_keys("[$a-z]{1,4}")) {
        let p = Pattern::from(value.clone());
        let json = serde_json::to_value(&p).unwrap();
        let read: Pattern = serde_json::from_value(json).unwrap();
        prop_assert_eq!(&read, &p);
        prop_assert!(match_payload(&value, &read).is_match);
    }
}
