//! Glob pattern compilation - one ignore-file pattern to a reusable path matcher
//!
//! Translation table:
//! - `**` matches any sequence of characters, crossing `/` boundaries
//! - `*` matches any sequence of characters within one path segment
//! - `?` makes the preceding element optional (see [`Pattern`] for the caveat)
//! - `[...]` / `[!...]` character classes pass through near-verbatim
//! - everything else matches literally

use crate::{Error, Result};
use regex::Regex;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// A compiled ignore-file glob.
///
/// Compilation never fails: the pattern string is translated token by token
/// into a regular expression, and a pattern whose translation the regex
/// engine rejects (possible with degenerate bracket expressions) simply
/// matches nothing.
///
/// Matching is segment-oriented rather than whole-path: `foo` matches `foo`,
/// `a/foo`, `foo/b`, and `a/foo/b`, but not `foobar`. A leading `/` anchors
/// the pattern to the start of the path. In both cases the matched text must
/// end at a `/` or at the end of the path.
///
/// # Compatibility note
///
/// `?` is emitted as the regex optional quantifier, so it makes the previous
/// element optional instead of consuming exactly one character: `a?c` matches
/// `ac` and `c`, but not `abc`. Existing rule files depend on this, so it is
/// kept as-is.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Option<Regex>,
}

impl Pattern {
    /// Compile a glob pattern. Accepts any string.
    pub fn parse(pattern: &str) -> Self {
        let wrapped = match pattern.strip_prefix('/') {
            Some(rest) => format!("^{}(?:$|/)", glob_to_regex(rest)),
            None => format!("(?:^|/){}(?:$|/)", glob_to_regex(pattern)),
        };

        let regex = match Regex::new(&wrapped) {
            Ok(regex) => Some(regex),
            Err(err) => {
                tracing::debug!(
                    "pattern {:?} translated to unsupported regex {:?} ({}); it will match nothing",
                    pattern,
                    wrapped,
                    err
                );
                None
            }
        };

        Self {
            source: pattern.to_string(),
            regex,
        }
    }

    /// The original pattern string this matcher was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Test a path against the compiled pattern.
    ///
    /// `path` must be relative to the ruleset root, without a leading slash.
    pub fn matches(&self, path: &str) -> Result<bool> {
        if path.starts_with('/') {
            return Err(Error::AbsolutePath(path.to_string()));
        }
        match &self.regex {
            Some(regex) => Ok(regex.is_match(path)),
            None => Ok(false),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Translate a glob body into a regex fragment, scanning longest token first.
fn glob_to_regex(glob: &str) -> String {
    let mut regex = String::new();
    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                regex.push_str(".*");
            }
            '*' => regex.push_str("[^/]*"),
            '?' => regex.push('?'),
            '[' => push_bracket_expression(&mut regex, &mut chars),
            other => regex.push_str(&regex::escape(&other.to_string())),
        }
    }
    regex
}

/// Forward a bracket expression near-verbatim, remapping a leading `!` to the
/// regex negation marker. Contents are not validated; a malformed class is
/// left for the regex engine to accept or reject.
fn push_bracket_expression(regex: &mut String, chars: &mut Peekable<Chars<'_>>) {
    regex.push('[');
    if chars.peek() == Some(&'!') {
        chars.next();
        regex.push('^');
    }
    for c in chars.by_ref() {
        regex.push(c);
        if c == ']' {
            break;
        }
    }
}
