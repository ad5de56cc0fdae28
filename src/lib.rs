//! # Ignoreset - Gitignore-style exclusion rulesets
//!
//! Ordered glob rules with last-match-wins semantics.
//!
//! Ignoreset provides:
//! - Glob pattern compilation (`**`, `*`, `?`, bracket expressions) into reusable matchers
//! - Negation rules (`!pattern`) that re-include previously excluded paths
//! - Ordered rulesets where the last applicable rule decides
//! - Loaders for line iterators, string buffers, and ruleset files
//! - Expectation directives for self-testing ruleset files

pub mod pattern;
pub mod rule;
pub mod ruleset;
pub mod expectations;

// Re-exports for convenient access
pub use pattern::Pattern;
pub use rule::{Rule, RuleMatch};
pub use ruleset::Ruleset;

/// Result type alias for ignoreset operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ignoreset operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Paths are matched relative to the ruleset root, so a leading slash is
    /// a caller contract violation rather than a pattern-matching question.
    #[error("paths must not start with a slash; given «{0}»")]
    AbsolutePath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
