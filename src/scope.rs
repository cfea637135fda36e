//! Scope containment between URLs.

use crate::url::UrlValue;

/// Decides whether one URL falls inside the scope of another.
///
/// Schemes and hosts may be registered as equivalent in sets; two values
/// are equivalent when they are equal or appear together in any one set.
/// Register everything first, then compare; comparison reads the sets only.
///
/// # Examples
///
/// ```
/// use url_canon::{ScopeComparer, UrlValue};
///
/// let mut comparer = ScopeComparer::new();
/// comparer.add_equivalent_schemes(["http", "https"]);
///
/// let source = UrlValue::parse("https://example.com/");
/// assert!(comparer.is_in_scope(&source, &UrlValue::parse("http://example.com/docs")));
/// assert!(!comparer.is_in_scope(&source, &UrlValue::parse("http://example.org/")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScopeComparer {
    scheme_sets: Vec<Vec<String>>,
    host_sets: Vec<Vec<String>>,
}

impl ScopeComparer {
    /// Creates a comparer with no equivalences.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a set of mutually equivalent schemes.
    pub fn add_equivalent_schemes<I, S>(&mut self, schemes: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.scheme_sets.push(lowercase_all(schemes));
        self
    }

    /// Registers a set of mutually equivalent hosts.
    pub fn add_equivalent_hosts<I, S>(&mut self, hosts: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.host_sets.push(lowercase_all(hosts));
        self
    }

    /// Returns true if `comparator` is within the scope of `source`.
    ///
    /// Port, user info, query and fragment are ignored. Equal URLs are in
    /// scope, as is any comparator whose serialization starts with the
    /// source's. Otherwise scheme and host must each be equal or
    /// equivalent, and the comparator's path must start with the source's.
    ///
    /// The serialization prefix test does not respect segment boundaries:
    /// `http://e.com/fo` contains `http://e.com/foo`.
    #[must_use]
    pub fn is_in_scope(&self, source: &UrlValue, comparator: &UrlValue) -> bool {
        let source = strip(source);
        let comparator = strip(comparator);
        let source_text = source.to_string();
        let comparator_text = comparator.to_string();

        if source_text == comparator_text {
            tracing::trace!(source = %source_text, "in scope: identical");
            return true;
        }
        if comparator_text.starts_with(&source_text) {
            tracing::trace!(source = %source_text, comparator = %comparator_text, "in scope: prefix");
            return true;
        }

        let in_scope = self.schemes_match(source.scheme(), comparator.scheme())
            && self.hosts_match(&source, &comparator)
            && comparator.path().starts_with(source.path());
        tracing::trace!(
            source = %source_text,
            comparator = %comparator_text,
            in_scope,
            "compared by component"
        );
        in_scope
    }

    fn schemes_match(&self, left: Option<&str>, right: Option<&str>) -> bool {
        match (left, right) {
            (None, None) => true,
            (Some(left), Some(right)) => {
                equivalent(&self.scheme_sets, &left.to_ascii_lowercase(), &right.to_ascii_lowercase())
            }
            _ => false,
        }
    }

    fn hosts_match(&self, left: &UrlValue, right: &UrlValue) -> bool {
        match (left.host(), right.host()) {
            (None, None) => true,
            (Some(left), Some(right)) => equivalent(
                &self.host_sets,
                &left.as_str().to_ascii_lowercase(),
                &right.as_str().to_ascii_lowercase(),
            ),
            _ => false,
        }
    }
}

fn strip(url: &UrlValue) -> UrlValue {
    let mut stripped = url.without_user_info().without_query().without_fragment();
    stripped.port = None;
    stripped
}

fn equivalent(sets: &[Vec<String>], left: &str, right: &str) -> bool {
    left == right
        || sets
            .iter()
            .any(|set| set.iter().any(|v| v == left) && set.iter().any(|v| v == right))
}

fn lowercase_all<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_scope(comparer: &ScopeComparer, source: &str, comparator: &str) -> bool {
        comparer.is_in_scope(&UrlValue::parse(source), &UrlValue::parse(comparator))
    }

    #[test]
    fn subpath_is_in_scope() {
        let comparer = ScopeComparer::new();
        assert!(in_scope(&comparer, "http://example.com/", "http://example.com/foo"));
        assert!(!in_scope(&comparer, "http://example.com/foo", "http://example.com/"));
    }

    #[test]
    fn identical_after_stripping() {
        let comparer = ScopeComparer::new();
        assert!(in_scope(
            &comparer,
            "http://u:p@example.com:8080/a?x=1#f",
            "http://example.com/a"
        ));
    }

    #[test]
    fn scheme_equivalence() {
        let mut comparer = ScopeComparer::new();
        assert!(!in_scope(&comparer, "https://example.com/", "http://example.com/"));
        comparer.add_equivalent_schemes(["http", "https"]);
        assert!(in_scope(&comparer, "https://example.com/", "http://example.com/"));
        assert!(!in_scope(&comparer, "ftp://example.com/", "http://example.com/"));
    }

    #[test]
    fn host_equivalence() {
        let mut comparer = ScopeComparer::new();
        comparer
            .add_equivalent_hosts(["example.com", "www.example.com"])
            .add_equivalent_hosts(["cdn.example.net"]);
        assert!(in_scope(&comparer, "http://example.com/a", "http://WWW.example.com/a/b"));
        assert!(!in_scope(&comparer, "http://example.com/a", "http://cdn.example.net/a"));
    }

    #[test]
    fn case_insensitive_scheme_and_host() {
        let comparer = ScopeComparer::new();
        assert!(in_scope(&comparer, "HTTP://Example.com/a", "http://example.COM/a/b"));
    }

    #[test]
    fn path_must_be_prefix() {
        let mut comparer = ScopeComparer::new();
        comparer.add_equivalent_schemes(["http", "https"]);
        assert!(!in_scope(&comparer, "https://example.com/a", "http://example.com/b"));
        assert!(in_scope(&comparer, "https://example.com", "http://example.com/b"));
    }

    #[test]
    fn prefix_shortcut_crosses_segment_boundaries() {
        let comparer = ScopeComparer::new();
        assert!(in_scope(&comparer, "http://example.com/fo", "http://example.com/foo"));
    }

    #[test]
    fn missing_host_on_one_side() {
        let comparer = ScopeComparer::new();
        assert!(!in_scope(&comparer, "http://example.com/", "mailto:a@example.com"));
    }
}
