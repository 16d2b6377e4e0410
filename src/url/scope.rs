use url::Url;

/// How a scope prefix is compared against a URL path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeMatch {
    /// Literal string prefix: `/consumers-corner` admits `/consumers-corner2`
    #[default]
    Prefix,

    /// Path-segment aware: the path equals the prefix or continues with `/`
    Segment,
}

/// A path prefix restricting which pages of the origin may be crawled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopePath {
    prefix: String,
    mode: ScopeMatch,
}

impl ScopePath {
    /// Creates a scope with the default (literal prefix) matching mode
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            mode: ScopeMatch::Prefix,
        }
    }

    /// Returns the same scope with a different matching mode
    pub fn with_mode(mut self, mode: ScopeMatch) -> Self {
        self.mode = mode;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn mode(&self) -> ScopeMatch {
        self.mode
    }

    /// Checks a raw URL path against this scope
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_harvest::url::{ScopeMatch, ScopePath};
    ///
    /// let scope = ScopePath::new("/consumers-corner");
    /// assert!(scope.matches_path("/consumers-corner/x"));
    /// assert!(scope.matches_path("/consumers-corner2"));
    ///
    /// let strict = scope.with_mode(ScopeMatch::Segment);
    /// assert!(strict.matches_path("/consumers-corner/x"));
    /// assert!(!strict.matches_path("/consumers-corner2"));
    /// ```
    pub fn matches_path(&self, path: &str) -> bool {
        match self.mode {
            ScopeMatch::Prefix => path.starts_with(&self.prefix),
            ScopeMatch::Segment => {
                let base = self.prefix.trim_end_matches('/');
                if base.is_empty() {
                    return path.starts_with('/');
                }
                match path.strip_prefix(base) {
                    Some(rest) => rest.is_empty() || rest.starts_with('/'),
                    None => false,
                }
            }
        }
    }
}

/// Checks whether a URL's path falls inside the crawl scope
///
/// URLs that cannot carry a hierarchical path (`mailto:`, `javascript:`)
/// are always out of scope.
pub fn in_scope(url: &Url, scope: &ScopePath) -> bool {
    if url.cannot_be_a_base() {
        return false;
    }
    scope.matches_path(url.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_prefix_child_in_scope() {
        let scope = ScopePath::new("/consumers-corner");
        assert!(in_scope(&url("https://x.org/consumers-corner/x"), &scope));
        assert!(in_scope(&url("https://x.org/consumers-corner"), &scope));
    }

    #[test]
    fn test_prefix_sibling_in_scope() {
        // Literal prefix semantics: a sibling sharing the prefix is admitted
        let scope = ScopePath::new("/consumers-corner");
        assert!(in_scope(&url("https://x.org/consumers-corner2"), &scope));
        assert!(in_scope(
            &url("https://x.org/consumers-corner-archive/a"),
            &scope
        ));
    }

    #[test]
    fn test_prefix_other_out_of_scope() {
        let scope = ScopePath::new("/consumers-corner");
        assert!(!in_scope(&url("https://x.org/other"), &scope));
        assert!(!in_scope(&url("https://x.org/"), &scope));
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        let scope = ScopePath::new("/docs");
        assert!(!in_scope(&url("https://x.org/DOCS/a"), &scope));
    }

    #[test]
    fn test_query_ignored() {
        let scope = ScopePath::new("/docs");
        assert!(in_scope(&url("https://x.org/docs?page=2"), &scope));
        assert!(!in_scope(&url("https://x.org/view?path=/docs"), &scope));
    }

    #[test]
    fn test_segment_mode() {
        let scope = ScopePath::new("/consumers-corner").with_mode(ScopeMatch::Segment);
        assert!(in_scope(&url("https://x.org/consumers-corner"), &scope));
        assert!(in_scope(&url("https://x.org/consumers-corner/"), &scope));
        assert!(in_scope(&url("https://x.org/consumers-corner/a/b"), &scope));
        assert!(!in_scope(&url("https://x.org/consumers-corner2"), &scope));
        assert!(!in_scope(
            &url("https://x.org/consumers-corner-archive"),
            &scope
        ));
    }

    #[test]
    fn test_segment_mode_trailing_slash_prefix() {
        let scope = ScopePath::new("/docs/").with_mode(ScopeMatch::Segment);
        assert!(in_scope(&url("https://x.org/docs"), &scope));
        assert!(in_scope(&url("https://x.org/docs/p2"), &scope));
        assert!(!in_scope(&url("https://x.org/docsets"), &scope));
    }

    #[test]
    fn test_root_scope_admits_everything() {
        for mode in [ScopeMatch::Prefix, ScopeMatch::Segment] {
            let scope = ScopePath::new("/").with_mode(mode);
            assert!(in_scope(&url("https://x.org/anything/at/all"), &scope));
        }
    }

    #[test]
    fn test_non_hierarchical_out_of_scope() {
        let scope = ScopePath::new("");
        assert!(!in_scope(&url("mailto:a@x.org"), &scope));
        assert!(!in_scope(&url("javascript:void(0)"), &scope));
    }
}
