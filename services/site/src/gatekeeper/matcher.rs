//! services/site/src/gatekeeper/matcher.rs
//!
//! Decides which request paths the gatekeeper handles at all.
//!
//! API routes, framework build artifacts, static images and fonts are served
//! without locale routing or session checks.

use regex::Regex;

/// Everything after the leading slash is checked against this pattern.
/// The extension branch is not anchored at the end, so `/a.png/b` is skipped too.
const EXCLUDED_PATTERN: &str =
    r"^/(?:api|_next/static|_next/image|favicon\.ico|.*\.(?:jpg|jpeg|gif|png|svg|ico|webp|woff2?|ttf|otf))";

#[derive(Debug, Clone)]
pub struct PathMatcher {
    excluded: Regex,
}

impl PathMatcher {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            excluded: Regex::new(EXCLUDED_PATTERN)?,
        })
    }

    /// Returns `true` when the gatekeeper should run for `path`.
    pub fn matches(&self, path: &str) -> bool {
        !self.excluded.is_match(path)
    }
}
