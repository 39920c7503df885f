use objectron::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn mismatch(path: &str, kind: MismatchKind) -> Option<Mismatch> {
    Some(Mismatch {
        path: path.to_string(),
        kind,
    })
}

#[test]
fn missing_key() {
    let payload = json!({ "type": "message", "text": "hello" });
    let result = match_payload(
        &payload,
        &pattern!({ "type": "message", "user": "U1", "text": "hello" }),
    );

    assert!(!result.is_match);
    assert_eq!(result.total, 2);
    assert_eq!(result.mismatch, mismatch("/user", MismatchKind::MissingKey));
    assert_eq!(result.matches, json!({ "type": "message" }));
}

#[test]
fn counting_stops_at_first_failure() {
    let payload = json!({ "a": 1, "b": { "c": 2, "d": 3 }, "e": 4 });
    let result = match_payload(&payload, &pattern!({ "a": 1, "b": { "c": 2, "d": 30 }, "e": 4 }));

    assert!(!result.is_match);
    assert_eq!(result.total, 3);
    assert_eq!(result.mismatch, mismatch("/b/d", MismatchKind::NotEqual));
    assert_eq!(result.matches, json!({ "a": 1, "b": { "c": 2 } }));
}

#[test]
fn type_mismatches() {
    let cases = [
        (json!({ "a": "1" }), pattern!({ "a": 1 }), "/a", NodeKind::Number, NodeKind::String),
        (json!({ "a": 1 }), pattern!({ "a": /"1"/ }), "/a", NodeKind::String, NodeKind::Number),
        (json!({ "a": [1] }), pattern!({ "a": { "b": 1 } }), "/a", NodeKind::Object, NodeKind::Array),
        (json!({ "a": { "0": 1 } }), pattern!({ "a": [1] }), "/a", NodeKind::Array, NodeKind::Object),
        (json!({ "a": null }), pattern!({ "a": false }), "/a", NodeKind::Bool, NodeKind::Null),
        (json!("text"), pattern!({ "a": 1 }), "", NodeKind::Object, NodeKind::String),
    ];
    for (payload, p, path, expected, found) in cases {
        let result = match_payload(&payload, &p);
        assert!(!result.is_match);
        assert_eq!(result.total, 1);
        assert_eq!(
            result.mismatch,
            mismatch(path, MismatchKind::TypeMismatch { expected, found })
        );
    }
}

#[test]
fn root_failure_has_null_matches() {
    let result = match_payload(&json!(5), &pattern!("5"));
    assert!(!result.is_match);
    assert_eq!(result.matches, json!(null));
    assert_eq!(result.total, 1);
}

#[test]
fn regex_no_match() {
    let payload = json!({ "first": "id=1", "text": "pong", "last": "x" });
    let result = match_payload(
        &payload,
        &pattern!({ "first": /r"id=(?<id>\d)"/, "text": /"ping"/, "last": /"(?<last>x)"/ }),
    );

    assert!(!result.is_match);
    assert_eq!(result.total, 2);
    assert_eq!(result.mismatch, mismatch("/text", MismatchKind::RegexNoMatch));
    // groups captured before the failure are kept, the ones after it are never reached
    assert_eq!(result.group("id"), Some("1"));
    assert_eq!(result.group("last"), None);
}

#[test]
fn array_length_mismatch() {
    let result = match_payload(&json!({ "items": [1, 2, 3] }), &pattern!({ "items": [1, 2] }));
    assert!(!result.is_match);
    assert_eq!(result.total, 1);
    assert_eq!(
        result.mismatch,
        mismatch("/items", MismatchKind::LengthMismatch { expected: 2, found: 3 })
    );
    assert_eq!(result.matches, json!({}));
}

#[test]
fn unordered_without_counterpart() {
    let payload = json!({ "items": [1, 2, 2] });
    let result = match_payload(&payload, &pattern!({ "items": [2, 1, 1] }));

    assert!(!result.is_match);
    // `2` and the first `1` are paired, the second `1` has nothing left
    assert_eq!(result.total, 3);
    assert_eq!(result.mismatch, mismatch("/items/2", MismatchKind::NoCounterpart));
    assert_eq!(result.matches, json!({ "items": [2, 1] }));
}

#[test]
fn unordered_trials_do_not_leak_groups() {
    // the regex also matches "b" through `other`, but is paired with "a=1", so only `a` is kept
    let payload = json!(["b", "a=1"]);
    let result = match_payload(&payload, &pattern!(["b", /r"a=(?<a>\d)|(?<other>b)"/]));
    assert!(result.is_match);
    assert_eq!(result.groups.len(), 1);
    assert_eq!(result.group("a"), Some("1"));
}

#[test]
fn unordered_finds_pairing_that_greedy_would_miss() {
    // the first regex matches both strings, the second only the first one
    let payload = json!(["abc", "ab"]);
    let p = pattern!([/"^ab"/, /"^abc$"/]);
    let result = match_payload(&payload, &p);
    assert!(result.is_match);
    assert_eq!(result.matches, json!(["ab", "abc"]));
}

#[test]
fn ordered_arrays() {
    let ordered = Matcher::new(MatchOptions::builder().ordered_arrays().build());

    let payload = json!({ "items": [0, 1, 2, 3] });
    let result = ordered.match_payload(&payload, &pattern!({ "items": [0, 1, 5, 3] }));
    assert!(!result.is_match);
    assert_eq!(result.total, 3);
    assert_eq!(result.mismatch, mismatch("/items/2", MismatchKind::NotEqual));
    assert_eq!(result.matches, json!({ "items": [0, 1] }));

    assert!(!ordered.is_match(&payload, &pattern!({ "items": [3, 2, 1, 0] })));
    assert!(ordered.is_match(&payload, &pattern!({ "items": [0, 1, 2, 3] })));
}

#[test]
fn extra_keys() {
    let payload = json!({ "type": "message", "nested": { "a": 1, "b": 2 } });
    let p = pattern!({ "type": "message", "nested": { "a": 1 } });

    assert!(match_payload(&payload, &p).is_match);

    let strict = Matcher::new(MatchOptions::builder().reject_extra_keys().build());
    let result = strict.match_payload(&payload, &p);
    assert!(!result.is_match);
    assert_eq!(result.total, 2);
    assert_eq!(
        result.mismatch,
        mismatch("/nested/b", MismatchKind::UnexpectedKey { key: "b".to_string() })
    );
}

#[test]
fn mismatch_paths_are_json_pointers() {
    let payload = json!({ "a/b": { "~c": [{ "d": 1 }] } });
    let result = Matcher::new(MatchOptions::builder().ordered_arrays().build())
        .match_payload(&payload, &pattern!({ "a/b": { "~c": [{ "d": 2 }] } }));
    let mismatch = result.mismatch.unwrap();
    assert_eq!(mismatch.path, "/a~1b/~0c/0/d");
    assert_eq!(mismatch.to_string(), "at /a~1b/~0c/0/d: value is not equal");
    assert_eq!(payload.pointer("/a~1b/~0c/0/d"), Some(&json!(1)));
}

#[test]
fn failing_result_serializes_with_reason() {
    let result = match_payload(&json!({ "a": [1] }), &pattern!({ "a": "x", "b": 1 }));
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "match": false,
            "total": 1,
            "matches": {},
            "groups": {},
            "mismatch": {
                "path": "/a",
                "reason": "type_mismatch",
                "expected": "string",
                "found": "array",
            },
        })
    );

    let result = match_payload(&json!({}), &pattern!({ "b": 1 }));
    assert_eq!(
        serde_json::to_value(&result).unwrap()["mismatch"],
        json!({ "path": "/b", "reason": "missing_key" })
    );
}

#[test]
fn logs_mismatches() {
    // smoke test: matching with an active subscriber at trace level must not change the result
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("objectron=trace"))
        .with_test_writer()
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        let result = match_payload(&json!({ "a": [1, 2] }), &pattern!({ "a": [2, 3] }));
        assert!(!result.is_match);
        assert_eq!(result.mismatch, mismatch("/a/1", MismatchKind::NoCounterpart));
    });
}
