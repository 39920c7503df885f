#![deny(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    rustdoc::missing_crate_level_docs,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::bare_urls
)]
#![doc = include_str!("../Readme.md")]
//! # Counting and Failures
//!
//! [`MatchResult::total`] counts comparisons. Every leaf (literal or regex) is one comparison, arrays and objects
//! are not counted themselves, no matter how deeply they are nested. So for a successful match, `total` is always
//! [`Pattern::leaf_count`].
//!
//! Matching stops at the first comparison that fails. Structural failures like a missing key or an array of the
//! wrong length count as one comparison as well, so a failed match reports the comparisons up to and including
//! the failing one:
//! ```
//! use objectron::{match_payload, pattern, MismatchKind};
//! use serde_json::json;
//!
//! let payload = json!({ "type": "message", "text": "hello" });
//! let result = match_payload(&payload, &pattern!({
//!     "type": "message",
//!     "user": /"U.*"/,
//!     "text": "hello",
//! }));
//!
//! assert!(!result.is_match);
//! assert_eq!(result.total, 2); // "type" matched, "user" is missing, "text" was never compared
//! let mismatch = result.mismatch.unwrap();
//! assert_eq!(mismatch.path, "/user");
//! assert_eq!(mismatch.kind, MismatchKind::MissingKey);
//! assert_eq!(result.matches, json!({ "type": "message" }));
//! ```
//!
//! # Logging
//!
//! Every call to [`Matcher::match_payload`] opens a `trace` level [`tracing`] span, and every mismatch emits a
//! `trace` event with the path and the reason. No subscriber is installed by this crate.

mod macros;
pub use macros::*;

mod pattern;
pub use pattern::*;

mod regex_pattern;
pub use regex_pattern::*;

mod options;
pub use options::*;

mod match_result;
pub use match_result::*;

mod matcher;
pub use matcher::*;

mod error;
pub use error::*;

mod path;
mod serde_impls;

#[doc(hidden)]
pub mod __macro_utilities;
