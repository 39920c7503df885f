use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::NodeKind;

/// The named capture groups collected from all regexes in a pattern, by name.
pub type Groups = BTreeMap<String, String>;

/// The result of matching a payload against a [`Pattern`](crate::Pattern).
///
/// Serializes to `{ "match": .., "total": .., "matches": .., "groups": .. }`, with an additional `"mismatch"` key
/// if the match failed.
///
/// ```
/// use objectron::{match_payload, pattern};
/// use serde_json::json;
///
/// let payload = json!({ "type": "message", "text": "hi smith", "user": "U123" });
/// let result = match_payload(&payload, &pattern!({
///     "type": "message",
///     "text": /r"hi (?<name>\S+)"/,
/// }));
///
/// assert!(result.is_match);
/// assert_eq!(result.total, 2);
/// assert_eq!(result.matches, json!({ "type": "message", "text": "hi smith" }));
/// assert_eq!(result.group("name"), Some("smith"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// `true` if every comparison succeeded.
    #[serde(rename = "match")]
    pub is_match: bool,
    /// The number of comparisons that were made.
    ///
    /// For a successful match, this is the number of leaves in the pattern (see
    /// [`Pattern::leaf_count`](crate::Pattern::leaf_count)). Matching stops at the first failing comparison, which
    /// is counted as well.
    pub total: usize,
    /// The matched part of the payload, in the shape of the pattern.
    ///
    /// Literals appear as written in the pattern, regexes are replaced by the payload string they matched. Payload
    /// keys that the pattern does not mention are not included. If the match failed, this only contains what was
    /// matched before the failure, and is `null` if the root itself failed.
    pub matches: Value,
    /// All named capture groups of all regexes that matched, merged into one map.
    ///
    /// If several regexes capture a group with the same name, the one that was matched last wins. Objects are
    /// visited in the order of the keys in the pattern, arrays from first to last pattern element.
    ///
    /// Groups from regexes that matched before a failure are kept.
    pub groups: Groups,
    /// Where and why the match failed. `None` if it succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<Mismatch>,
}

impl MatchResult {
    /// Returns a captured group by name.
    pub fn group(&self, name: &str) -> Option<&str> {
        self.groups.get(name).map(String::as_str)
    }
}

/// The first comparison that failed during a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    /// A JSON pointer to the failing node, like `/blocks/1/text`. The root is `""`.
    ///
    /// Array indices are positions in the pattern. With [`ArrayPolicy::Unordered`](crate::ArrayPolicy::Unordered)
    /// they don't necessarily correspond to the same position in the payload.
    pub path: String,
    /// Why it failed.
    #[serde(flatten)]
    pub kind: MismatchKind,
}

/// The reason of a [`Mismatch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
#[non_exhaustive]
pub enum MismatchKind {
    /// The key exists in the pattern but not in the payload
    MissingKey,
    /// The payload has a key that the pattern does not have, and [`ExtraKeys::Reject`](crate::ExtraKeys::Reject)
    /// is set
    UnexpectedKey {
        /// The extra key
        key: String,
    },
    /// The payload node has a different type than the pattern node expects
    TypeMismatch {
        /// What the pattern expected. Regexes expect a [`NodeKind::String`].
        expected: NodeKind,
        /// What the payload contains
        found: NodeKind,
    },
    /// A literal has the right type but a different value
    NotEqual,
    /// A regex did not find a match in the payload string
    RegexNoMatch,
    /// An array in the payload has a different length than in the pattern
    LengthMismatch {
        /// Length of the pattern array
        expected: usize,
        /// Length of the payload array
        found: usize,
    },
    /// An element of an unordered array pattern could not be paired with any payload element
    NoCounterpart,
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchKind::MissingKey => write!(f, "key is missing"),
            MismatchKind::UnexpectedKey { key } => write!(f, "unexpected key \"{}\"", key),
            MismatchKind::TypeMismatch { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            MismatchKind::NotEqual => write!(f, "value is not equal"),
            MismatchKind::RegexNoMatch => write!(f, "regex did not match"),
            MismatchKind::LengthMismatch { expected, found } => {
                write!(f, "expected {} elements, found {}", expected, found)
            }
            MismatchKind::NoCounterpart => write!(f, "no matching element in the payload"),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "at the root: {}", self.kind)
        } else {
            write!(f, "at {}: {}", self.path, self.kind)
        }
    }
}
