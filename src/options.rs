//! Configuration of a [`Matcher`](crate::Matcher)

use serde::{Deserialize, Serialize};

/// How the elements of an array pattern are paired with the elements of a payload array.
///
/// In both cases the arrays need to have the same length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayPolicy {
    /// Every pattern element has to match a different payload element, in any order.
    ///
    /// `[3, 2, 1, 0]` matches `[0, 1, 2, 3]`. For literals, this is multiset equality. For regexes and
    /// containers, the pairing is chosen so that every pattern element finds a partner if at all possible,
    /// preferring the element at the same position.
    #[default]
    Unordered,
    /// The element at index `i` of the pattern has to match the element at index `i` of the payload.
    Ordered,
}

/// What happens to payload keys that are not mentioned in an object pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraKeys {
    /// Extra keys are ignored.
    #[default]
    Ignore,
    /// Any extra key makes the match fail.
    Reject,
}

/// The options for a [`Matcher`](crate::Matcher).
///
/// Can be deserialized from a configuration file, where all fields are optional:
/// ```
/// # use objectron::{ArrayPolicy, ExtraKeys, MatchOptions};
/// let options: MatchOptions = serde_json::from_str(r#"{ "arrays": "ordered" }"#).unwrap();
/// assert_eq!(options.arrays, ArrayPolicy::Ordered);
/// assert_eq!(options.extra_keys, ExtraKeys::Ignore);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct MatchOptions {
    /// How array elements are paired up. Default: [`ArrayPolicy::Unordered`]
    pub arrays: ArrayPolicy,
    /// How unknown payload keys are treated. Default: [`ExtraKeys::Ignore`]
    pub extra_keys: ExtraKeys,
}

impl MatchOptions {
    /// Creates a builder for the [`MatchOptions`] struct.
    ///
    /// Default settings:
    /// - Arrays: unordered
    /// - Extra keys: ignored
    pub fn builder() -> Builder {
        Builder {
            options: MatchOptions::default(),
        }
    }
}

/// A builder for the [`MatchOptions`] struct, since it is marked as `#[non_exhaustive]` and thus cannot be
/// constructed directly.
///
/// ```
/// # use objectron::{ArrayPolicy, ExtraKeys, MatchOptions};
/// let options = MatchOptions::builder().ordered_arrays().reject_extra_keys().build();
/// assert_eq!(options.arrays, ArrayPolicy::Ordered);
/// assert_eq!(options.extra_keys, ExtraKeys::Reject);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Builder {
    options: MatchOptions,
}

impl Builder {
    /// Sets the array policy.
    pub fn arrays(mut self, policy: ArrayPolicy) -> Self {
        self.options.arrays = policy;
        self
    }
    /// Shorthand for `.arrays(ArrayPolicy::Ordered)`.
    pub fn ordered_arrays(self) -> Self {
        self.arrays(ArrayPolicy::Ordered)
    }
    /// Shorthand for `.arrays(ArrayPolicy::Unordered)` (the default).
    pub fn unordered_arrays(self) -> Self {
        self.arrays(ArrayPolicy::Unordered)
    }

    /// Sets the policy for payload keys that the pattern does not mention.
    pub fn extra_keys(mut self, policy: ExtraKeys) -> Self {
        self.options.extra_keys = policy;
        self
    }
    /// Shorthand for `.extra_keys(ExtraKeys::Reject)`.
    pub fn reject_extra_keys(self) -> Self {
        self.extra_keys(ExtraKeys::Reject)
    }

    /// Builds the [`MatchOptions`] struct.
    pub fn build(self) -> MatchOptions {
        self.options
    }
}
