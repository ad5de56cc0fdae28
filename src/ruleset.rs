//! Ordered rule collections with last-match-wins evaluation
//!
//! A [`Ruleset`] is built by appending raw ignore-file lines (or pre-compiled
//! rules) and queried one path at a time. Every rule is consulted in
//! insertion order and the last one with an opinion decides, so later lines
//! override earlier ones just as in an ignore file.

use crate::rule::{Rule, RuleMatch};
use crate::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// An ordered, append-only set of ignore rules.
#[derive(Debug, Clone, Default)]
pub struct Ruleset {
    rules: Vec<Rule>,
}

impl Ruleset {
    /// Create an empty ruleset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one raw ignore-file line.
    ///
    /// Surrounding whitespace is trimmed. Blank lines and `#` comments are
    /// discarded without creating a rule. A line starting with `\#` has the
    /// backslash stripped so the pattern matches a literal leading `#`.
    pub fn add_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return;
        }
        let line = if line.starts_with("\\#") { &line[1..] } else { line };
        self.rules.push(Rule::parse(line));
    }

    /// Append an already-compiled rule.
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Run every rule in insertion order and return the last definitive
    /// answer: `Some(true)` excluded, `Some(false)` re-included, `None` if no
    /// rule applied to the path.
    pub fn evaluate(&self, path: &str) -> Result<Option<bool>> {
        let mut last = None;
        for rule in &self.rules {
            match rule.evaluate(path)? {
                RuleMatch::Exclude => last = Some(true),
                RuleMatch::Include => last = Some(false),
                RuleMatch::NotApplicable => {}
            }
        }
        Ok(last)
    }

    /// Whether the ruleset excludes the path. A path no rule applies to is
    /// not excluded.
    pub fn is_excluded(&self, path: &str) -> Result<bool> {
        Ok(self.evaluate(path)?.unwrap_or(false))
    }

    /// Build a ruleset from an ordered sequence of lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ruleset = Self::new();
        for line in lines {
            ruleset.add_line(line.as_ref());
        }
        ruleset
    }

    /// Build a ruleset from a text buffer, one pattern per line.
    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// Build a ruleset from a line-oriented reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut ruleset = Self::new();
        for line in reader.lines() {
            ruleset.add_line(&line?);
        }
        Ok(ruleset)
    }

    /// Build a ruleset from an ignore file on disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    /// The rules in insertion order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules in the set.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set contains no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::io::Write;

    #[test]
    fn test_no_applicable_rule_means_not_excluded() {
        let ruleset = Ruleset::parse("*.log\ntarget\n");
        assert_eq!(ruleset.evaluate("src/main.rs").unwrap(), None);
        assert!(!ruleset.is_excluded("src/main.rs").unwrap());
    }

    #[test]
    fn test_single_plain_pattern() {
        let mut ruleset = Ruleset::new();
        ruleset.add_line("foo");
        assert!(ruleset.is_excluded("foo").unwrap());
        assert!(ruleset.is_excluded("a/foo").unwrap());
        assert!(!ruleset.is_excluded("foobar").unwrap());
    }

    #[test]
    fn test_later_negation_overrides_earlier_exclusion() {
        let ruleset = Ruleset::from_lines(["foo", "!foo/bar"]);
        assert!(!ruleset.is_excluded("foo/bar").unwrap());
        assert!(ruleset.is_excluded("foo/baz").unwrap());
        assert_eq!(ruleset.evaluate("foo/bar").unwrap(), Some(false));
    }

    #[test]
    fn test_later_exclusion_overrides_earlier_negation() {
        let ruleset = Ruleset::from_lines(["!foo", "foo"]);
        assert!(ruleset.is_excluded("foo").unwrap());
    }

    #[test]
    fn test_anchored_rule() {
        let ruleset = Ruleset::parse("/foo");
        assert!(ruleset.is_excluded("foo").unwrap());
        assert!(ruleset.is_excluded("foo/x").unwrap());
        assert!(!ruleset.is_excluded("a/foo").unwrap());
    }

    #[test]
    fn test_comments_and_blank_lines_are_discarded() {
        let commented = Ruleset::parse("\n# comment\n  \nfoo\n");
        let bare = Ruleset::parse("foo");
        assert_eq!(commented.len(), 1);
        for path in ["foo", "a/foo", "foobar", "other"] {
            assert_eq!(
                commented.is_excluded(path).unwrap(),
                bare.is_excluded(path).unwrap()
            );
        }
    }

    #[test]
    fn test_escaped_hash_is_a_literal_pattern() {
        let mut ruleset = Ruleset::new();
        ruleset.add_line("\\#weird");
        assert_eq!(ruleset.len(), 1);
        assert!(ruleset.is_excluded("#weird").unwrap());
        assert!(!ruleset.is_excluded("weird").unwrap());
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let mut ruleset = Ruleset::new();
        ruleset.add_line("  foo\t\r");
        assert!(ruleset.is_excluded("foo").unwrap());
    }

    #[test]
    fn test_add_rule_appends_in_order() {
        let mut ruleset = Ruleset::new();
        ruleset.add_rule(Rule::parse("*.tmp"));
        ruleset.add_rule(Rule::parse("!keep.tmp"));
        assert_eq!(ruleset.rules().len(), 2);
        assert!(ruleset.is_excluded("a.tmp").unwrap());
        assert!(!ruleset.is_excluded("keep.tmp").unwrap());
    }

    #[test]
    fn test_compilation_is_deterministic() {
        let lines = ["*.log", "!keep.log", "/build", "doc/**"];
        let first = Ruleset::from_lines(lines);
        let second = Ruleset::from_lines(lines);
        for path in ["a.log", "keep.log", "build", "x/build", "doc/a/b", "src/lib.rs"] {
            assert_eq!(
                first.is_excluded(path).unwrap(),
                second.is_excluded(path).unwrap(),
                "diverged on {path}"
            );
        }
    }

    #[test]
    fn test_absolute_path_is_rejected() {
        let ruleset = Ruleset::parse("foo");
        assert!(matches!(
            ruleset.is_excluded("/foo"),
            Err(Error::AbsolutePath(_))
        ));
    }

    #[test]
    fn test_empty_ruleset() {
        let ruleset = Ruleset::new();
        assert!(ruleset.is_empty());
        assert_eq!(ruleset.len(), 0);
        assert!(!ruleset.is_excluded("anything").unwrap());
    }

    #[test]
    fn test_from_file_agrees_with_parse() {
        let text = "*.log\n!keep.log\n# comment\n/build\n";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();

        let from_file = Ruleset::from_file(file.path()).unwrap();
        let from_text = Ruleset::parse(text);
        assert_eq!(from_file.len(), from_text.len());
        for path in ["a.log", "keep.log", "build", "x/build", "src/a.rs"] {
            assert_eq!(
                from_file.is_excluded(path).unwrap(),
                from_text.is_excluded(path).unwrap(),
                "diverged on {path}"
            );
        }
    }

    #[test]
    fn test_from_reader() {
        let ruleset = Ruleset::from_reader("target\n!target/keep\n".as_bytes()).unwrap();
        assert!(ruleset.is_excluded("target").unwrap());
        assert!(!ruleset.is_excluded("target/keep").unwrap());
    }
}
