//! Utilities for the macros. These elements are public but doc_hidden

use crate::{ObjectPattern, Pattern, RegexFlags, RegexPattern};

#[doc(hidden)]
pub use lazy_static::lazy_static;

#[doc(hidden)]
pub static INVALID_MACRO_REGEX_HINT: &str = r#"objectron: A regex that was validated by `pattern!` failed to compile.
This is either an internal error or the compiled regex exceeds the size limit of the `regex` crate."#;

/// Compiles a regex that `pattern!` already validated at compile time.
///
/// Called exactly once per regex in a `pattern!` invocation, from inside a `lazy_static`.
#[doc(hidden)]
#[track_caller]
pub fn compile_regex(source: &'static str, flags: &'static str) -> RegexPattern {
    let compiled = RegexFlags::parse(flags).and_then(|flags| RegexPattern::with_flags(source, flags));
    match compiled {
        Ok(regex) => regex,
        Err(err) => panic!("{}\n{}", INVALID_MACRO_REGEX_HINT, err),
    }
}

/// Builds an object pattern from the key-value pairs generated by `pattern!`.
#[doc(hidden)]
pub fn object<const N: usize>(entries: [(&'static str, Pattern); N]) -> Pattern {
    Pattern::Object(entries.into_iter().collect::<ObjectPattern>())
}
