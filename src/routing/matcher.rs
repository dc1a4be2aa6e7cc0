//! Route matching logic.
//!
//! # Responsibilities
//! - Match the request path against a route condition
//!
//! # Design Decisions
//! - Only the path is inspected (host, method and query are ignored)
//! - Path matching is case-sensitive
//! - No regex to guarantee O(n) matching

/// Trait for matching request paths against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches paths ending with a fixed suffix, so `/convert` and
/// `/v1/lists/convert` both reach the same endpoint.
#[derive(Debug, Clone)]
pub struct PathSuffixMatcher {
    suffix: String,
}

impl PathSuffixMatcher {
    /// Create a new path suffix matcher.
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl Matcher for PathSuffixMatcher {
    fn matches(&self, path: &str) -> bool {
        path.ends_with(&self.suffix)
    }
}
