//! Expectation directives - self-testing ruleset files
//!
//! A ruleset file can carry its own test cases as directive comments, which
//! the ruleset parser already discards as ordinary `#` lines:
//!
//! ```text
//! *.log
//! !important.log
//! # should match: build/trace.log
//! # should not match: important.log
//! ```
//!
//! [`verify`] builds the ruleset from the buffer and checks every directive
//! against it.

use crate::ruleset::Ruleset;
use crate::Result;
use serde::Serialize;

const SHOULD_MATCH: &str = "# should match: ";
const SHOULD_NOT_MATCH: &str = "# should not match: ";

/// One expected outcome embedded in a ruleset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expectation {
    /// Path the directive applies to.
    pub path: String,
    /// Whether the ruleset is expected to exclude the path.
    pub excluded: bool,
}

/// A single expectation the ruleset did not meet.
#[derive(Debug, Clone, Serialize)]
pub struct ExpectationFailure {
    pub path: String,
    pub expected_excluded: bool,
    pub actual_excluded: bool,
}

/// Outcome of verifying a ruleset buffer against its embedded expectations.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub passed: usize,
    pub failures: Vec<ExpectationFailure>,
}

impl VerifyReport {
    /// Whether every expectation held.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total number of expectations checked.
    pub fn total(&self) -> usize {
        self.passed + self.failures.len()
    }
}

/// Scan a ruleset buffer for expectation directives, in file order.
pub fn parse_expectations(text: &str) -> Vec<Expectation> {
    let mut expectations = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if let Some(path) = line.strip_prefix(SHOULD_MATCH) {
            expectations.push(Expectation {
                path: path.to_string(),
                excluded: true,
            });
        } else if let Some(path) = line.strip_prefix(SHOULD_NOT_MATCH) {
            expectations.push(Expectation {
                path: path.to_string(),
                excluded: false,
            });
        }
    }
    expectations
}

/// Build the ruleset from `text` and check every embedded expectation.
pub fn verify(text: &str) -> Result<VerifyReport> {
    let ruleset = Ruleset::parse(text);
    let mut report = VerifyReport {
        passed: 0,
        failures: Vec::new(),
    };
    for expectation in parse_expectations(text) {
        let actual = ruleset.is_excluded(&expectation.path)?;
        if actual == expectation.excluded {
            report.passed += 1;
        } else {
            report.failures.push(ExpectationFailure {
                path: expectation.path,
                expected_excluded: expectation.excluded,
                actual_excluded: actual,
            });
        }
    }
    Ok(report)
}
