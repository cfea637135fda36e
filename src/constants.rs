//! Constants shared by the parser and the normalization pipeline.

/// Scheme prepended to protocol-relative input (`//host/path`) while splitting.
///
/// Uses the reserved `x-` prefix so it cannot be mistaken for a registered
/// scheme; it is stripped again before the parse result is returned.
pub const DUMMY_SCHEME: &str = "x-url-canon-relative";

/// Lowest port accepted by [`filter_port`](crate::filter_port).
pub const MIN_PORT: i64 = 1;

/// Highest port accepted by [`filter_port`](crate::filter_port).
pub const MAX_PORT: i64 = 65_535;

/// Well-known default ports, keyed by lowercase scheme.
pub const DEFAULT_PORTS: &[(&str, u16)] = &[
    ("http", 80),
    ("https", 443),
    ("ftp", 21),
    ("gopher", 70),
    ("nntp", 119),
    ("news", 119),
    ("telnet", 23),
    ("tn3270", 23),
    ("imap", 143),
    ("pop", 110),
    ("ldap", 389),
];

/// Filename patterns dropped by the default-file transform unless the
/// caller supplies its own.
pub const DEFAULT_FILE_PATTERNS: &[&str] = &[r"index\.[^/]*", r"default\.[^/]*"];

/// Query keys treated as session identifiers (compared case-insensitively).
pub const SESSION_ID_PARAMS: &[&str] = &["jsessionid", "phpsessid", "aspsessionid", "sid"];

/// Scheme applied by the default-scheme transform when none is configured.
pub const DEFAULT_SCHEME: &str = "http";

/// Returns the well-known default port for a scheme, if it has one.
///
/// The lookup is ASCII case-insensitive.
#[must_use]
pub fn default_port(scheme: &str) -> Option<u16> {
    DEFAULT_PORTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(scheme))
        .map(|&(_, port)| port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_lookup() {
        assert_eq!(default_port("http"), Some(80));
        assert_eq!(default_port("HTTPS"), Some(443));
        assert_eq!(default_port("news"), Some(119));
        assert_eq!(default_port("tn3270"), Some(23));
        assert_eq!(default_port("mailto"), None);
    }
}
