//! Host model: label access, equivalence and routability.

use std::fmt;
use std::str::FromStr;

use crate::address::parse_address;
use crate::error::IdnaError;

/// Label stripped by [`Host::without_leading_www`].
const WWW: &str = "www";

/// Converts a domain to its ASCII (punycode) form.
///
/// ASCII input passes through, lowercased.
///
/// # Errors
///
/// Returns [`IdnaError::ConversionFailed`] if the domain is rejected by
/// UTS #46 processing.
///
/// # Examples
///
/// ```
/// use url_canon::to_ascii;
///
/// assert_eq!(to_ascii("bücher.example").unwrap(), "xn--bcher-kva.example");
/// assert_eq!(to_ascii("Example.COM").unwrap(), "example.com");
/// ```
pub fn to_ascii(domain: &str) -> Result<String, IdnaError> {
    idna::domain_to_ascii(domain).map_err(|e| IdnaError::ConversionFailed {
        input: domain.to_string(),
        reason: format!("{e:?}"),
    })
}

/// Converts a punycode domain to Unicode.
///
/// # Errors
///
/// Returns [`IdnaError::ConversionFailed`] if any label fails to decode.
pub fn to_unicode(domain: &str) -> Result<String, IdnaError> {
    let (unicode, result) = idna::domain_to_unicode(domain);
    result
        .map(|()| unicode)
        .map_err(|e| IdnaError::ConversionFailed {
            input: domain.to_string(),
            reason: format!("{e:?}"),
        })
}

/// A URL host.
///
/// Wraps the host text exactly as parsed; equality through `==` is case
/// sensitive. Case-insensitive comparisons go through [`Host::to_ascii`] or
/// [`Host::is_equivalent_to`].
///
/// # Examples
///
/// ```
/// use url_canon::Host;
///
/// let host = Host::new("www.example.com");
/// assert_eq!(host.labels(), vec!["www", "example", "com"]);
/// assert!(host.is_equivalent_to(&Host::new("WWW.Example.com"), &[]));
/// assert!(host.is_equivalent_to(&Host::new("example.com"), &[(0, "www")]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Host(String);

impl Host {
    /// Wraps host text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the host text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the host text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the `.`-separated labels; an empty host has none.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        if self.0.is_empty() {
            Vec::new()
        } else {
            self.0.split('.').collect()
        }
    }

    /// Compares host text exactly, without case folding.
    #[must_use]
    pub fn equals_case_sensitive(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    /// Returns the ASCII (punycode) form, lowercased.
    ///
    /// Falls back to the lowercased text when IDNA conversion fails.
    #[must_use]
    pub fn to_ascii(&self) -> Self {
        if self.0.is_empty() {
            return self.clone();
        }
        match to_ascii(&self.0) {
            Ok(ascii) => Self(ascii),
            Err(err) => {
                tracing::debug!(host = %self.0, error = %err, "keeping host text after IDNA failure");
                Self(self.0.to_ascii_lowercase())
            }
        }
    }

    /// Returns the Unicode display form.
    ///
    /// Falls back to the text unchanged when decoding fails.
    #[must_use]
    pub fn to_unicode(&self) -> Self {
        match to_unicode(&self.0) {
            Ok(unicode) => Self(unicode),
            Err(err) => {
                tracing::debug!(host = %self.0, error = %err, "keeping host text after IDNA failure");
                self.clone()
            }
        }
    }

    /// Compares two hosts label by label in ASCII form.
    ///
    /// Each `(position, label)` in `excluded` drops the label at that index
    /// from either side, but only where that side's label equals the
    /// excluded value. It is a positional filter, not a prefix strip.
    #[must_use]
    pub fn is_equivalent_to(&self, other: &Self, excluded: &[(usize, &str)]) -> bool {
        let left = self.to_ascii();
        let right = other.to_ascii();
        filtered_labels(&left, excluded) == filtered_labels(&right, excluded)
    }

    /// Returns true if the host is an IPv4 or bracketed IPv6 literal.
    #[must_use]
    pub fn is_ip_address(&self) -> bool {
        parse_address(&self.0).is_ok()
    }

    /// Returns true unless the host is an address in private-use, loopback
    /// or IANA special-purpose space.
    ///
    /// Anything that is not an address literal is a domain name and counts
    /// as routable.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_canon::Host;
    ///
    /// assert!(Host::new("1.2.3.4").is_publicly_routable());
    /// assert!(!Host::new("10.0.0.1").is_publicly_routable());
    /// assert!(Host::new("intranet").is_publicly_routable());
    /// ```
    #[must_use]
    pub fn is_publicly_routable(&self) -> bool {
        match parse_address(&self.0) {
            Ok(addr) => !(addr.is_private_use() || addr.is_loopback() || addr.is_special_purpose()),
            Err(err) => {
                tracing::trace!(host = %self.0, reason = %err, "treating host as a domain name");
                true
            }
        }
    }

    /// Stricter than [`is_publicly_routable`](Self::is_publicly_routable):
    /// the host must also be non-empty, contain a `.` and neither start nor
    /// end with one.
    #[must_use]
    pub fn is_publicly_addressable(&self) -> bool {
        !self.0.is_empty()
            && self.0.contains('.')
            && !self.0.starts_with('.')
            && !self.0.ends_with('.')
            && self.is_publicly_routable()
    }

    /// Strips leading `www` labels while at least two labels would remain.
    #[must_use]
    pub fn without_leading_www(&self) -> Self {
        let labels = self.labels();
        let mut skip = 0;
        while labels.len() - skip > 2 && labels[skip].eq_ignore_ascii_case(WWW) {
            skip += 1;
        }
        if skip == 0 {
            self.clone()
        } else {
            Self(labels[skip..].join("."))
        }
    }
}

fn filtered_labels<'a>(host: &'a Host, excluded: &[(usize, &str)]) -> Vec<&'a str> {
    host.labels()
        .into_iter()
        .enumerate()
        .filter(|(i, label)| {
            !excluded
                .iter()
                .any(|(pos, value)| pos == i && value.eq_ignore_ascii_case(label))
        })
        .map(|(_, label)| label)
        .collect()
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Host {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Host {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for Host {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
