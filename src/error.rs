//! Error types used by the crate.
//!
//! Note that a payload failing to match a pattern is **not** an error. Matching always returns a
//! [`MatchResult`](crate::MatchResult). The errors in here can only happen while a [`Pattern`](crate::Pattern)
//! is being built.

use thiserror::Error;

/// The Error returned when constructing a [`Pattern`](crate::Pattern) fails.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PatternError {
    /// The source of a regex leaf could not be compiled
    #[error("objectron: invalid regex /{source_text}/: {error}")]
    InvalidRegex {
        /// The regex source as it was given
        source_text: String,
        /// The error reported by the `regex` crate
        #[source]
        error: regex::Error,
    },
    /// A regex flag that is not one of `i`, `m`, `s`, `x`, `U` or `u`
    #[error("objectron: unknown regex flag '{flag}' in \"{flags}\"")]
    UnknownFlag {
        /// The offending flag
        flag: char,
        /// The full flag string
        flags: String,
    },
    /// `$flags` in a JSON-encoded regex object was not a string
    #[error("objectron: \"$flags\" has to be a string, found {found}")]
    InvalidFlags {
        /// JSON type name of the value that was found
        found: &'static str,
    },
    /// An object containing `$regex` was not a valid regex encoding
    #[error("objectron: invalid regex object: {reason}")]
    InvalidRegexObject {
        /// What exactly was wrong
        reason: String,
    },
    /// A key starting with a single `$` that is not part of a regex object. Literal keys starting with `$` have
    /// to be written with an additional `$`
    #[error("objectron: key \"{key}\" is reserved, literal keys starting with '$' are written with an additional '$'")]
    ReservedKey {
        /// The offending key
        key: String,
    },
}
