//! A file with the macro re-exports to separate the documentation from the crate root docs

/// A Macro to build a [`Pattern`](crate::Pattern) from a JSON-like literal, with regexes checked at compile time
///
/// ## Signature
/// ```ignore
/// pattern!(<value>) -> objectron::Pattern
/// ```
///
/// ## Syntax
/// Values are written like in JSON, with a few additions:
///
/// | Syntax | Result |
/// |--------|--------|
/// | `{ "key": <value>, key2: <value> }` | [`Pattern::Object`](crate::Pattern::Object). Keys are string literals or identifiers. |
/// | `[ <value>, <value> ]` | [`Pattern::Array`](crate::Pattern::Array) |
/// | `"text"`, `1`, `-2.5`, `true`, `null` | the respective literal |
/// | `/"regex"/` or `/r"regex"/` | [`Pattern::Regex`](crate::Pattern::Regex) |
/// | `/"regex"/i` | a regex with flags, see [`RegexFlags`](crate::RegexFlags) |
/// | `(expr)` | any Rust expression whose type implements `Into<Pattern>` |
///
/// Trailing commas are allowed everywhere.
///
/// ## Details
/// Every regex has to be a string literal, because it is parsed by the procedural macro at compile time. Any
/// syntax error in a regex or an unknown flag is reported as a compile error, so building a `Pattern` with this
/// macro can never fail at runtime.
///
/// Each regex is compiled only once, the first time its `pattern!` invocation is evaluated. Evaluating it again
/// only clones the compiled regex.
///
/// ## Examples
/// ```
/// use objectron::{match_payload, pattern};
/// use serde_json::json;
///
/// let channel = "C42";
/// let p = pattern!({
///     "type": "message",
///     "channel": (channel),
///     "text": /r"^invite \((?<name>\S+)\) \((?<email>\S+)\)$"/,
///     "meta": { "retries": 0, "urgent": false, "thread": null },
///     "tags": [/"(?<tag>urgent)"/i, "ops"],
/// });
///
/// let payload = json!({
///     "type": "message",
///     "channel": "C42",
///     "text": "invite (Smith) (john@example.com)",
///     "meta": { "retries": 0, "urgent": false, "thread": null },
///     "tags": ["ops", "URGENT"],
/// });
///
/// let result = match_payload(&payload, &p);
/// assert!(result.is_match);
/// assert_eq!(result.total, 8);
/// assert_eq!(result.group("name"), Some("Smith"));
/// assert_eq!(result.group("email"), Some("john@example.com"));
/// assert_eq!(result.group("tag"), Some("URGENT"));
/// ```
///
/// Invalid regexes are rejected at compile time:
/// ```compile_fail
/// let p = objectron::pattern!({ "text": /"unclosed (group"/ });
/// ```
/// ```compile_fail
/// let p = objectron::pattern!({ "text": /"abc"/g }); // `g` is not a supported flag
/// ```
/// A missing `,` after a regex is reported as such:
/// ```compile_fail
/// let p = objectron::pattern!({ "text": /"abc"/ user: "U1" });
/// ```
/// As are unknown identifiers:
/// ```compile_fail
/// let p = objectron::pattern!({ "thread": nul });
/// ```
pub use objectron_macro::pattern;
