use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::{Groups, PatternError};

/// The flags a [`RegexPattern`] was compiled with.
///
/// Written as a string of single characters behind the regex, like `/abc/i`:
///
/// | Flag | Meaning |
/// |------|---------|
/// | `i`  | case-insensitive |
/// | `m`  | `^` and `$` match at line boundaries |
/// | `s`  | `.` also matches `\n` |
/// | `x`  | whitespace and `#` comments in the regex are ignored |
/// | `U`  | swap the meaning of greedy and lazy repetitions |
/// | `u`  | accepted for compatibility, unicode is always enabled |
///
/// ```
/// # use objectron::RegexFlags;
/// let flags = RegexFlags::parse("si").unwrap();
/// assert!(flags.case_insensitive);
/// assert!(flags.dot_matches_new_line);
/// assert_eq!(flags.to_string(), "is");
///
/// assert!(RegexFlags::parse("g").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RegexFlags {
    /// `i`
    pub case_insensitive: bool,
    /// `m`
    pub multi_line: bool,
    /// `s`
    pub dot_matches_new_line: bool,
    /// `x`
    pub ignore_whitespace: bool,
    /// `U`
    pub swap_greed: bool,
}

impl RegexFlags {
    /// Parses a flag string like `"im"`. Order and repetition don't matter.
    pub fn parse(flags: &str) -> Result<Self, PatternError> {
        let mut ret = RegexFlags::default();
        for flag in flags.chars() {
            match flag {
                'i' => ret.case_insensitive = true,
                'm' => ret.multi_line = true,
                's' => ret.dot_matches_new_line = true,
                'x' => ret.ignore_whitespace = true,
                'U' => ret.swap_greed = true,
                'u' => {}
                flag => {
                    return Err(PatternError::UnknownFlag {
                        flag,
                        flags: flags.to_owned(),
                    })
                }
            }
        }
        Ok(ret)
    }

    /// Returns `true` if no flag is set.
    pub fn is_empty(&self) -> bool {
        *self == RegexFlags::default()
    }

    fn apply<'b>(&self, builder: &'b mut RegexBuilder) -> &'b mut RegexBuilder {
        builder
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .ignore_whitespace(self.ignore_whitespace)
            .swap_greed(self.swap_greed)
    }
}

impl fmt::Display for RegexFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [
            (self.case_insensitive, 'i'),
            (self.multi_line, 'm'),
            (self.dot_matches_new_line, 's'),
            (self.ignore_whitespace, 'x'),
            (self.swap_greed, 'U'),
        ];
        for (set, c) in flags {
            if set {
                fmt::Write::write_char(f, c)?;
            }
        }
        Ok(())
    }
}

/// A regular expression leaf in a [`Pattern`](crate::Pattern).
///
/// The regex is compiled once when the `RegexPattern` is created and reused for every match. Cloning is cheap,
/// since the compiled program is shared.
///
/// When matched against a string, the regex searches anywhere in the string (there are no implicit `^` or `$`),
/// and all named capture groups that participated in the match are collected.
///
/// ```
/// # use objectron::RegexPattern;
/// let regex = RegexPattern::new(r"ping (?<someone>\S+)").unwrap();
/// let groups = regex.named_captures("well, ping john please").unwrap();
/// assert_eq!(groups["someone"], "john");
///
/// assert!(regex.named_captures("pong john").is_none());
/// ```
#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    flags: RegexFlags,
}

impl RegexPattern {
    /// Compiles a regex without any flags.
    pub fn new(source: &str) -> Result<Self, PatternError> {
        Self::with_flags(source, RegexFlags::default())
    }

    /// Compiles a regex with the given flags.
    pub fn with_flags(source: &str, flags: RegexFlags) -> Result<Self, PatternError> {
        let regex = flags
            .apply(&mut RegexBuilder::new(source))
            .build()
            .map_err(|error| PatternError::InvalidRegex {
                source_text: source.to_owned(),
                error,
            })?;
        Ok(Self { regex, flags })
    }

    /// Compiles a regex with flags given as a string like `"i"`. See [`RegexFlags`].
    pub fn with_flag_str(source: &str, flags: &str) -> Result<Self, PatternError> {
        Self::with_flags(source, RegexFlags::parse(flags)?)
    }

    /// The source of the regex, without flags.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// The flags the regex was compiled with.
    pub fn flags(&self) -> RegexFlags {
        self.flags
    }

    /// The underlying compiled regex.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// The names of all named capture groups in the regex, in order of appearance.
    pub fn group_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.regex.capture_names().flatten()
    }

    /// Searches `text` and returns the named captures if the regex matched.
    ///
    /// Groups that exist in the regex but did not participate in the match are not part of the result.
    pub fn named_captures(&self, text: &str) -> Option<Groups> {
        let captures = self.regex.captures(text)?;
        let groups = self
            .regex
            .capture_names()
            .flatten()
            .filter_map(|name| {
                captures
                    .name(name)
                    .map(|m| (name.to_owned(), m.as_str().to_owned()))
            })
            .collect();
        Some(groups)
    }
}

impl PartialEq for RegexPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str() && self.flags == other.flags
    }
}
impl Eq for RegexPattern {}

impl fmt::Debug for RegexPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // manual impl to show the source instead of the internals of `Regex`
        f.debug_tuple("RegexPattern").field(&format_args!("{}", self)).finish()
    }
}

impl fmt::Display for RegexPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.as_str(), self.flags)
    }
}
