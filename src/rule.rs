//! Ignore rules - a compiled pattern plus its polarity
//!
//! A plain line excludes the paths its pattern matches; a `!`-prefixed line
//! re-includes them, overriding earlier rules in the same ruleset.

use crate::pattern::Pattern;
use crate::Result;
use std::fmt;

/// Outcome of testing a single rule against a path.
///
/// `NotApplicable` is distinct from `Include`: a rule whose pattern misses
/// says nothing about the path, while a negation rule that hits actively
/// re-includes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMatch {
    /// The pattern matched and the rule excludes the path.
    Exclude,
    /// The pattern matched and the rule re-includes the path.
    Include,
    /// The pattern did not match; the rule has no opinion.
    NotApplicable,
}

/// One ignore rule: a [`Pattern`] and whether the line began with `!`.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Pattern,
    negated: bool,
}

impl Rule {
    /// Parse one non-blank, non-comment line into a rule.
    pub fn parse(line: &str) -> Self {
        match line.strip_prefix('!') {
            Some(rest) => Self::new(Pattern::parse(rest), true),
            None => Self::new(Pattern::parse(line), false),
        }
    }

    /// Build a rule from an already-compiled pattern.
    pub fn new(pattern: Pattern, negated: bool) -> Self {
        Self { pattern, negated }
    }

    /// The rule's compiled pattern.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Whether this is a `!` re-inclusion rule.
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Evaluate the rule against a path.
    pub fn evaluate(&self, path: &str) -> Result<RuleMatch> {
        if self.pattern.matches(path)? {
            if self.negated {
                Ok(RuleMatch::Include)
            } else {
                Ok(RuleMatch::Exclude)
            }
        } else {
            Ok(RuleMatch::NotApplicable)
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!{}", self.pattern)
        } else {
            write!(f, "{}", self.pattern)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_plain_rule_excludes() {
        let rule = Rule::parse("*.tmp");
        assert!(!rule.is_negated());
        assert_eq!(rule.evaluate("a.tmp").unwrap(), RuleMatch::Exclude);
        assert_eq!(rule.evaluate("cache/a.tmp").unwrap(), RuleMatch::Exclude);
        assert_eq!(rule.evaluate("a.rs").unwrap(), RuleMatch::NotApplicable);
    }

    #[test]
    fn test_negated_rule_reincludes() {
        let rule = Rule::parse("!keep.tmp");
        assert!(rule.is_negated());
        assert_eq!(rule.pattern().source(), "keep.tmp");
        assert_eq!(rule.evaluate("keep.tmp").unwrap(), RuleMatch::Include);
        assert_eq!(rule.evaluate("other.tmp").unwrap(), RuleMatch::NotApplicable);
    }

    #[test]
    fn test_rule_propagates_absolute_path_error() {
        let rule = Rule::parse("foo");
        assert!(matches!(
            rule.evaluate("/foo"),
            Err(Error::AbsolutePath(_))
        ));
    }

    #[test]
    fn test_display_restores_the_line() {
        assert_eq!(Rule::parse("!doc/**").to_string(), "!doc/**");
        assert_eq!(Rule::parse("*.log").to_string(), "*.log");
    }
}
