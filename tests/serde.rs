use objectron::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn pattern_to_json() {
    let p = pattern!({
        "type": "message",
        "items": [1, null, 2.5],
        "text": /r"^hi (?<name>\S+)"/i,
        "plain": /"x"/,
    });
    assert_eq!(
        serde_json::to_value(&p).unwrap(),
        json!({
            "type": "message",
            "items": [1, null, 2.5],
            "text": { "$regex": r"^hi (?<name>\S+)", "$flags": "i" },
            "plain": { "$regex": "x" },
        })
    );
}

#[test]
fn pattern_from_json() {
    let p: Pattern = serde_json::from_str(
        r#"{
            "type": "message",
            "blocks": [{ "text": { "$regex": "^ping (?<who>\\w+)", "$flags": "mi" } }]
        }"#,
    )
    .unwrap();
    assert_eq!(
        p,
        pattern!({
            "type": "message",
            "blocks": [{ "text": /r"^ping (?<who>\w+)"/im }],
        })
    );

    // and back again
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(serde_json::from_str::<Pattern>(&json).unwrap(), p);
}

#[test]
fn regex_objects_are_only_interpreted_by_try_from_json() {
    let value = json!({ "$regex": "a+" });
    assert_eq!(Pattern::try_from_json(value.clone()).unwrap(), Pattern::regex("a+").unwrap());

    let Pattern::Object(obj) = Pattern::from(value) else {
        panic!("expected an object");
    };
    assert_eq!(obj.get("$regex"), Some(&Pattern::from("a+")));
}

#[test]
fn invalid_regex_objects() {
    let err = Pattern::try_from_json(json!({ "$regex": "(" })).unwrap_err();
    assert!(matches!(&err, PatternError::InvalidRegex { source_text, .. } if source_text == "("));
    assert!(std::error::Error::source(&err).is_some());

    let err = Pattern::try_from_json(json!({ "$regex": "a", "$flags": "ig" })).unwrap_err();
    assert!(matches!(err, PatternError::UnknownFlag { flag: 'g', .. }));
    assert_eq!(err.to_string(), r#"objectron: unknown regex flag 'g' in "ig""#);

    let err = Pattern::try_from_json(json!({ "$regex": "a", "$flags": 1 })).unwrap_err();
    assert!(matches!(err, PatternError::InvalidFlags { found: "number" }));

    let err = Pattern::try_from_json(json!({ "$regex": 5 })).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"objectron: invalid regex object: "$regex" has to be a string, found number"#
    );

    let err = Pattern::try_from_json(json!({ "$regex": "a", "other": 1 })).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"objectron: invalid regex object: unexpected key "other" next to "$regex""#
    );

    // nested errors are reported as well
    let err = Pattern::try_from_json(json!({ "a": [{ "b": { "$regex": "[" } }] })).unwrap_err();
    assert!(matches!(err, PatternError::InvalidRegex { .. }));

    let err = serde_json::from_value::<Pattern>(json!({ "$regex": "a", "$flags": "q" })).unwrap_err();
    assert!(err.to_string().contains("unknown regex flag 'q'"), "{}", err);
}

#[test]
fn regex_pattern_on_its_own() {
    let regex: RegexPattern = serde_json::from_value(json!({ "$regex": "a+", "$flags": "m" })).unwrap();
    assert_eq!(regex, RegexPattern::with_flag_str("a+", "m").unwrap());
    assert_eq!(regex.to_string(), "/a+/m");
    assert_eq!(serde_json::to_value(&regex).unwrap(), json!({ "$regex": "a+", "$flags": "m" }));

    let err = serde_json::from_value::<RegexPattern>(json!("a+")).unwrap_err();
    assert!(err.to_string().contains("expected a regex object, found string"), "{}", err);
}

#[test]
fn options_from_config() {
    let options: MatchOptions = serde_json::from_str(r#"{ "arrays": "ordered", "extra_keys": "reject" }"#).unwrap();
    assert_eq!(options, MatchOptions::builder().ordered_arrays().reject_extra_keys().build());

    let options: MatchOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options, MatchOptions::default());
    assert_eq!(
        serde_json::to_value(options).unwrap(),
        json!({ "arrays": "unordered", "extra_keys": "ignore" })
    );

    assert!(serde_json::from_str::<MatchOptions>(r#"{ "arrays": "sorted" }"#).is_err());
}

#[test]
fn successful_result_to_json() {
    let payload = json!({ "type": "message", "text": "ping john", "ts": 12 });
    let result = match_payload(&payload, &pattern!({ "type": "message", "text": /r"ping (?<who>\w+)"/ }));
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "match": true,
            "total": 2,
            "matches": { "type": "message", "text": "ping john" },
            "groups": { "who": "john" },
        })
    );
}

#[test]
fn literal_dollar_keys_are_escaped() {
    let value = json!({
        "query": { "$regex": "a+" },
        "$": 1,
        "$$x": [{ "$flags": "i" }],
        "plain": { "$regex": 5 },
    });
    let p = Pattern::from(value.clone());

    let json = serde_json::to_value(&p).unwrap();
    assert_eq!(
        json,
        json!({
            "query": { "$$regex": "a+" },
            "$$": 1,
            "$$$x": [{ "$$flags": "i" }],
            "plain": { "$$regex": 5 },
        })
    );

    let read: Pattern = serde_json::from_value(json).unwrap();
    assert_eq!(read, p);
    assert!(match_payload(&value, &read).is_match);

    // regexes next to escaped keys keep working
    let p = pattern!({ "$$regex": "literal", "text": /"^a"/ });
    let read: Pattern = serde_json::from_value(serde_json::to_value(&p).unwrap()).unwrap();
    assert_eq!(read, p);
}

#[test]
fn single_dollar_keys_are_reserved() {
    let err = Pattern::try_from_json(json!({ "a": { "$other": 1 } })).unwrap_err();
    assert!(matches!(&err, PatternError::ReservedKey { key } if key == "$other"));

    let err = Pattern::try_from_json(json!({ "$flags": "i" })).unwrap_err();
    assert!(matches!(err, PatternError::ReservedKey { .. }));

    assert_eq!(
        Pattern::try_from_json(json!({ "$$other": 1 })).unwrap(),
        Pattern::from(json!({ "$other": 1 }))
    );
}
