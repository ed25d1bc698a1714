//! Route pattern rewriting.
//!
//! # Responsibilities
//! - Normalize the base domain prepended to root patterns
//! - Join nested patterns onto their parent prefix
//! - Rewrite anchors from the routing dialect into the edge dialect
//! - Wrap the result in a match expression
//!
//! # Design Decisions
//! - Purely textual: patterns are never parsed or validated here
//! - Nested fragments are never independently anchored once prefixed
//! - An empty parent prefix is treated as no parent

/// Start-of-string anchor in both dialects.
pub const START_ANCHOR: &str = "^";

/// End-of-string anchor in the routing dialect.
pub const SOURCE_END_ANCHOR: &str = "\\Z";

/// End-of-string anchor in the edge dialect.
pub const END_ANCHOR: &str = "$";

/// Domain substituted for the start anchor of root patterns.
///
/// A non-empty domain always ends in exactly one `/`. An empty domain stays
/// empty, which yields host-relative patterns such as `admin/$`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BaseDomain(String);

impl BaseDomain {
    pub fn new(domain: impl Into<String>) -> Self {
        let domain = domain.into();
        if domain.is_empty() {
            return Self(domain);
        }
        let trimmed = domain.trim_end_matches('/');
        Self(format!("{}/", trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for BaseDomain {
    fn from(domain: &str) -> Self {
        Self::new(domain)
    }
}

impl From<String> for BaseDomain {
    fn from(domain: String) -> Self {
        Self::new(domain)
    }
}

impl From<Option<String>> for BaseDomain {
    fn from(domain: Option<String>) -> Self {
        Self::new(domain.unwrap_or_default())
    }
}

impl std::fmt::Display for BaseDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turn a route's pattern source into an edge pattern.
///
/// With a parent prefix the source is appended to it. At the root the first
/// start anchor becomes the base domain. Every remaining start anchor is then
/// dropped and every `\Z` becomes `$`.
pub fn fix_regex(pattern: &str, parent: Option<&str>, base_domain: &BaseDomain) -> String {
    let joined = match parent.filter(|p| !p.is_empty()) {
        Some(parent) => format!("{}{}", parent, pattern),
        None => pattern.replacen(START_ANCHOR, base_domain.as_str(), 1),
    };
    joined
        .replace(START_ANCHOR, "")
        .replace(SOURCE_END_ANCHOR, END_ANCHOR)
}

/// Wrap an edge pattern in a URL match expression.
pub fn match_expression(pattern: &str) -> String {
    format!("req.URL.matches('{}')", pattern)
}
