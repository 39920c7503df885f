use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::pattern::{escape_key, FLAGS_KEY, REGEX_KEY};
use crate::{ObjectPattern, Pattern, RegexPattern};

/// Regexes are written as `{"$regex": "<source>", "$flags": "<flags>"}`, with `"$flags"` omitted if empty.
/// Everything else is written as the equivalent JSON, except that object keys starting with `$` get an additional
/// `$` (see [`Pattern::try_from_json`]). The result reads back as the same pattern.
impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Pattern::Null => serializer.serialize_unit(),
            Pattern::Bool(b) => serializer.serialize_bool(*b),
            Pattern::Number(n) => n.serialize(serializer),
            Pattern::String(s) => serializer.serialize_str(s),
            Pattern::Regex(regex) => regex.serialize(serializer),
            Pattern::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Pattern::Object(obj) => obj.serialize(serializer),
        }
    }
}

impl Serialize for RegexPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let flags = self.flags();
        let len = if flags.is_empty() { 1 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(REGEX_KEY, self.as_str())?;
        if !flags.is_empty() {
            map.serialize_entry(FLAGS_KEY, &flags.to_string())?;
        }
        map.end()
    }
}

impl Serialize for ObjectPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(&escape_key(key), value)?;
        }
        map.end()
    }
}

/// Reads any JSON-like data and converts it with [`Pattern::try_from_json`].
///
/// ```
/// # use objectron::{match_payload, Pattern};
/// let p: Pattern = serde_json::from_str(r#"{
///     "type": "message",
///     "text": { "$regex": "^deploy (?<service>\\S+)$" }
/// }"#).unwrap();
///
/// let result = match_payload(&serde_json::json!({ "type": "message", "text": "deploy api" }), &p);
/// assert_eq!(result.group("service"), Some("api"));
///
/// let err = serde_json::from_str::<Pattern>(r#"{ "$regex": "(" }"#).unwrap_err();
/// assert!(err.to_string().contains("invalid regex"));
/// ```
impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Pattern::try_from_json(value).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for RegexPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Pattern::deserialize(deserializer)? {
            Pattern::Regex(regex) => Ok(regex),
            other => Err(serde::de::Error::custom(format!(
                "objectron: expected a regex object, found {}",
                other.kind()
            ))),
        }
    }
}
