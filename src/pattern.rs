use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::{PatternError, RegexFlags, RegexPattern};

/// A node of a pattern tree.
///
/// A pattern has the same shape as a JSON value, except that any leaf may also be a [`RegexPattern`]. The variant
/// of every node is decided when the pattern is built, so matching never has to guess what a node is.
///
/// The most convenient way to create a pattern is the [`pattern!`](crate::pattern) macro, which also checks all
/// regexes at compile time:
/// ```
/// use objectron::{pattern, Pattern};
///
/// let p = pattern!({
///     "type": "message",
///     "text": /r"ping (?<who>\S+)"/,
///     "tags": ["a", "b"],
/// });
/// assert_eq!(p.leaf_count(), 4);
/// assert!(matches!(p, Pattern::Object(_)));
/// ```
///
/// Patterns without regexes can be built from any [`serde_json::Value`]:
/// ```
/// # use objectron::Pattern;
/// let p = Pattern::from(serde_json::json!({ "a": [1, 2, { "b": null }] }));
/// assert_eq!(p.leaf_count(), 3);
/// ```
///
/// Two patterns are equal if they match the same payloads: numbers are compared by value like during matching,
/// so `Pattern::from(1) == Pattern::from(1.0)`, and object keys are compared regardless of order.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches `null`
    Null,
    /// Matches exactly this boolean
    Bool(bool),
    /// Matches a number with the same numeric value. `1` and `1.0` are considered equal.
    Number(Number),
    /// Matches exactly this string
    String(String),
    /// Matches any string that the regex finds a match in
    Regex(RegexPattern),
    /// Matches an array of the same length whose elements match these patterns.
    /// See [`ArrayPolicy`](crate::ArrayPolicy) for how elements are paired up.
    Array(Vec<Pattern>),
    /// Matches an object that has all of these keys, with values matching the respective patterns
    Object(ObjectPattern),
}

/// The kind of a node in a pattern or payload tree. Used to report type mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// `null`
    Null,
    /// `true` or `false`
    Bool,
    /// Any number
    Number,
    /// A string
    String,
    /// Only occurs in patterns
    Regex,
    /// An array
    Array,
    /// An object
    Object,
}

impl NodeKind {
    /// The kind of a payload value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => NodeKind::Null,
            Value::Bool(_) => NodeKind::Bool,
            Value::Number(_) => NodeKind::Number,
            Value::String(_) => NodeKind::String,
            Value::Array(_) => NodeKind::Array,
            Value::Object(_) => NodeKind::Object,
        }
    }

    /// The lowercase name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Null => "null",
            NodeKind::Bool => "bool",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Regex => "regex",
            NodeKind::Array => "array",
            NodeKind::Object => "object",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Pattern::Null, Pattern::Null) => true,
            (Pattern::Bool(a), Pattern::Bool(b)) => a == b,
            (Pattern::Number(a), Pattern::Number(b)) => numbers_eq(a, b),
            (Pattern::String(a), Pattern::String(b)) => a == b,
            (Pattern::Regex(a), Pattern::Regex(b)) => a == b,
            (Pattern::Array(a), Pattern::Array(b)) => a == b,
            (Pattern::Object(a), Pattern::Object(b)) => a == b,
            _ => false,
        }
    }
}

/// Compares by value, regardless of whether the numbers are stored as integers or floats.
pub(crate) fn numbers_eq(a: &Number, b: &Number) -> bool {
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
        return a == b;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

impl Pattern {
    /// Creates a regex leaf. Shorthand for `Pattern::Regex(RegexPattern::new(source)?)`.
    pub fn regex(source: &str) -> Result<Self, PatternError> {
        RegexPattern::new(source).map(Pattern::Regex)
    }

    /// Creates a regex leaf with flags like `"i"`. See [`RegexFlags`].
    pub fn regex_with_flags(source: &str, flags: &str) -> Result<Self, PatternError> {
        RegexPattern::with_flag_str(source, flags).map(Pattern::Regex)
    }

    /// Converts a JSON value into a pattern, turning every object of the form
    /// `{"$regex": "<source>", "$flags": "<flags>"}` into a regex leaf (`"$flags"` is optional).
    ///
    /// This is the format used by the [`Deserialize`](serde::Deserialize) implementation of `Pattern`, so that
    /// patterns can be stored in configuration files.
    ///
    /// Keys starting with `$` are reserved for this encoding. A literal key that starts with `$` is written with
    /// one additional `$`, so `"$$regex"` becomes the literal key `"$regex"`. Any other key starting with a single
    /// `$` is a [`PatternError::ReservedKey`]. Serializing a `Pattern` applies the same escaping, so a pattern
    /// always reads back as the same pattern.
    ///
    /// Use [`Pattern::from`] instead to convert a value without interpreting `"$regex"` keys.
    ///
    /// ```
    /// # use objectron::Pattern;
    /// let p = Pattern::try_from_json(serde_json::json!({
    ///     "text": { "$regex": "^hi (?<name>\\w+)", "$flags": "i" },
    /// })).unwrap();
    /// let Pattern::Object(obj) = p else { panic!() };
    /// assert_eq!(obj.get("text"), Some(&Pattern::regex_with_flags("^hi (?<name>\\w+)", "i").unwrap()));
    ///
    /// let err = Pattern::try_from_json(serde_json::json!({ "$regex": "(" })).unwrap_err();
    /// assert!(matches!(err, objectron::PatternError::InvalidRegex { .. }));
    ///
    /// let p = Pattern::try_from_json(serde_json::json!({ "$$regex": "(" })).unwrap();
    /// assert_eq!(p, Pattern::from(serde_json::json!({ "$regex": "(" })));
    /// ```
    pub fn try_from_json(value: Value) -> Result<Self, PatternError> {
        match value {
            Value::Object(map) if map.contains_key(REGEX_KEY) => regex_from_json(map),
            Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| Ok((unescape_key(key)?, Pattern::try_from_json(value)?)))
                .collect::<Result<ObjectPattern, _>>()
                .map(Pattern::Object),
            Value::Array(items) => items
                .into_iter()
                .map(Pattern::try_from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Pattern::Array),
            primitive => Ok(Pattern::from(primitive)),
        }
    }

    /// The kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Pattern::Null => NodeKind::Null,
            Pattern::Bool(_) => NodeKind::Bool,
            Pattern::Number(_) => NodeKind::Number,
            Pattern::String(_) => NodeKind::String,
            Pattern::Regex(_) => NodeKind::Regex,
            Pattern::Array(_) => NodeKind::Array,
            Pattern::Object(_) => NodeKind::Object,
        }
    }

    /// Returns `true` for everything except arrays and objects.
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Pattern::Array(_) | Pattern::Object(_))
    }

    /// The number of leaves in this tree. Arrays and objects are not counted themselves, only their contents.
    ///
    /// This is the [`total`](crate::MatchResult::total) of every successful match against this pattern.
    pub fn leaf_count(&self) -> usize {
        match self {
            Pattern::Array(items) => items.iter().map(Pattern::leaf_count).sum(),
            Pattern::Object(obj) => obj.values().map(Pattern::leaf_count).sum(),
            _ => 1,
        }
    }

    /// The JSON value of a literal leaf. `None` for regexes and containers.
    pub fn as_literal(&self) -> Option<Value> {
        match self {
            Pattern::Null => Some(Value::Null),
            Pattern::Bool(b) => Some(Value::Bool(*b)),
            Pattern::Number(n) => Some(Value::Number(n.clone())),
            Pattern::String(s) => Some(Value::String(s.clone())),
            Pattern::Regex(_) | Pattern::Array(_) | Pattern::Object(_) => None,
        }
    }
}

pub(crate) const REGEX_KEY: &str = "$regex";
pub(crate) const FLAGS_KEY: &str = "$flags";
const RESERVED_PREFIX: char = '$';

/// Literal keys starting with `$` get one more `$`, so that they can't be mistaken for `$regex` or `$flags`.
pub(crate) fn escape_key(key: &str) -> Cow<'_, str> {
    if key.starts_with(RESERVED_PREFIX) {
        Cow::Owned(format!("{}{}", RESERVED_PREFIX, key))
    } else {
        Cow::Borrowed(key)
    }
}

fn unescape_key(mut key: String) -> Result<String, PatternError> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(RESERVED_PREFIX), Some(RESERVED_PREFIX)) => {
            key.remove(0);
            Ok(key)
        }
        (Some(RESERVED_PREFIX), _) => Err(PatternError::ReservedKey { key }),
        _ => Ok(key),
    }
}

fn regex_from_json(map: Map<String, Value>) -> Result<Pattern, PatternError> {
    let mut source = None;
    let mut flags = RegexFlags::default();
    for (key, value) in map {
        match (key.as_str(), value) {
            (REGEX_KEY, Value::String(s)) => source = Some(s),
            (REGEX_KEY, other) => {
                let reason = format!("\"{}\" has to be a string, found {}", REGEX_KEY, NodeKind::of(&other));
                return Err(PatternError::InvalidRegexObject { reason });
            }
            (FLAGS_KEY, Value::String(s)) => flags = RegexFlags::parse(&s)?,
            (FLAGS_KEY, other) => {
                return Err(PatternError::InvalidFlags {
                    found: NodeKind::of(&other).as_str(),
                })
            }
            (key, _) => {
                let reason = format!("unexpected key \"{}\" next to \"{}\"", key, REGEX_KEY);
                return Err(PatternError::InvalidRegexObject { reason });
            }
        }
    }
    // only called if the key exists, and a non-string value already returned above
    let source = source.unwrap_or_default();
    RegexPattern::with_flags(&source, flags).map(Pattern::Regex)
}

/// An object in a pattern tree: a mapping from keys to patterns.
///
/// Keys keep the order in which they were inserted. The order does not influence whether a payload matches, but
/// it is the order in which keys are visited, which decides the key order of
/// [`MatchResult::matches`](crate::MatchResult::matches) and which capture group wins if two regexes use the same
/// group name.
///
/// Two `ObjectPattern`s are equal if they have the same entries, regardless of order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectPattern {
    entries: IndexMap<String, Pattern>,
}

impl ObjectPattern {
    /// Creates an empty object pattern, which matches any object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty object pattern with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserts a key. If the key already exists, its pattern is replaced in place and the old one is returned.
    pub fn insert(&mut self, key: impl Into<String>, pattern: impl Into<Pattern>) -> Option<Pattern> {
        self.entries.insert(key.into(), pattern.into())
    }

    /// Returns the pattern for a key.
    pub fn get(&self, key: &str) -> Option<&Pattern> {
        self.entries.get(key)
    }

    /// Returns `true` if the key exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Pattern)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over all keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over all patterns in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Pattern> + '_ {
        self.entries.values()
    }
}

impl<K: Into<String>, V: Into<Pattern>> FromIterator<(K, V)> for ObjectPattern {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut ret = ObjectPattern::with_capacity(iter.size_hint().0);
        for (k, v) in iter {
            ret.insert(k, v);
        }
        ret
    }
}

impl IntoIterator for ObjectPattern {
    type Item = (String, Pattern);
    type IntoIter = indexmap::map::IntoIter<String, Pattern>;
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Converts a JSON value into a pattern of literals. Objects containing `"$regex"` are **not** interpreted, use
/// [`Pattern::try_from_json`] for that.
impl From<Value> for Pattern {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Pattern::Null,
            Value::Bool(b) => Pattern::Bool(b),
            Value::Number(n) => Pattern::Number(n),
            Value::String(s) => Pattern::String(s),
            Value::Array(items) => Pattern::Array(items.into_iter().map(Pattern::from).collect()),
            Value::Object(map) => Pattern::Object(map.into_iter().collect()),
        }
    }
}

impl From<RegexPattern> for Pattern {
    fn from(regex: RegexPattern) -> Self {
        Pattern::Regex(regex)
    }
}

impl From<ObjectPattern> for Pattern {
    fn from(obj: ObjectPattern) -> Self {
        Pattern::Object(obj)
    }
}

impl<T: Into<Pattern>> From<Vec<T>> for Pattern {
    fn from(items: Vec<T>) -> Self {
        Pattern::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Pattern>> From<Option<T>> for Pattern {
    fn from(value: Option<T>) -> Self {
        value.map_or(Pattern::Null, Into::into)
    }
}

impl From<()> for Pattern {
    fn from(_: ()) -> Self {
        Pattern::Null
    }
}

impl From<bool> for Pattern {
    fn from(b: bool) -> Self {
        Pattern::Bool(b)
    }
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Pattern::String(s.to_owned())
    }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self {
        Pattern::String(s)
    }
}

macro_rules! impl_from_number {
    ($($ty: ty),*) => {
        $(
            impl From<$ty> for Pattern {
                fn from(n: $ty) -> Self {
                    Pattern::Number(Number::from(n))
                }
            }
        )*
    };
}
impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_from_float {
    ($($ty: ty),*) => {
        $(
            /// Non-finite floats have no JSON representation and become [`Pattern::Null`], like in `serde_json`.
            impl From<$ty> for Pattern {
                fn from(f: $ty) -> Self {
                    Number::from_f64(f64::from(f)).map_or(Pattern::Null, Pattern::Number)
                }
            }
        )*
    };
}
impl_from_float!(f32, f64);
