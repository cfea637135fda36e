//! The URL value type and its serialization.

use std::fmt;
use std::str::FromStr;

use crate::codec::{encode_query_or_fragment, filter_port};
use crate::constants::default_port;
use crate::error::UrlError;
use crate::host::Host;
use crate::options::NormalizationOptions;
use crate::parser::parse;
use crate::path::Path;
use crate::query::{Query, QueryEncoding, QueryValue};

/// Scheme whose URLs always serialize an authority marker.
const FILE_SCHEME: &str = "file";

/// The port component of a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    /// A `:` with no digits after it.
    Empty,
    /// A numeric port.
    ///
    /// Parsing keeps any value that fits in 32 bits; only
    /// [`UrlValue::with_port`] restricts ports to `1..=65535`.
    Number(u32),
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// An immutable URL.
///
/// Every component is optional; `None` means the component is absent, while
/// `Some` of an empty value means it was present but empty (a bare `?`, a
/// trailing `#`, an `@` with nothing before it). The path is always present
/// but may be empty.
///
/// Values are built by [`parse`](crate::parse) (or [`FromStr`]) and changed
/// through the `with_*`/`without_*` methods, each of which returns a new
/// value. [`Display`](fmt::Display) renders the URL string.
///
/// # Examples
///
/// ```
/// use url_canon::UrlValue;
///
/// let url = UrlValue::parse("http://example.com/docs");
/// let moved = url.with_host("example.org").with_path("/guide");
/// assert_eq!(moved.to_string(), "http://example.org/guide");
/// assert_eq!(url.to_string(), "http://example.com/docs");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UrlValue {
    pub(crate) scheme: Option<String>,
    pub(crate) user: Option<String>,
    pub(crate) pass: Option<String>,
    pub(crate) host: Option<Host>,
    pub(crate) port: Option<Port>,
    pub(crate) path: Path,
    pub(crate) query: Option<Query>,
    pub(crate) fragment: Option<String>,
}

impl UrlValue {
    /// Parses a URL string; never fails.
    ///
    /// See [`parse`](crate::parse).
    #[must_use]
    pub fn parse(input: &str) -> Self {
        parse(input)
    }

    /// Returns the scheme.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Returns the user name.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Returns the password.
    #[must_use]
    pub fn pass(&self) -> Option<&str> {
        self.pass.as_deref()
    }

    /// Returns the host.
    #[must_use]
    pub const fn host(&self) -> Option<&Host> {
        self.host.as_ref()
    }

    /// Returns the numeric port, if one is present.
    #[must_use]
    pub const fn port(&self) -> Option<u32> {
        match self.port {
            Some(Port::Number(n)) => Some(n),
            Some(Port::Empty) | None => None,
        }
    }

    /// Returns the port component, distinguishing an empty port from none.
    #[must_use]
    pub const fn port_component(&self) -> Option<Port> {
        self.port
    }

    /// Returns the explicit port, or the scheme's default port.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_canon::UrlValue;
    ///
    /// assert_eq!(UrlValue::parse("https://example.com/").effective_port(), Some(443));
    /// assert_eq!(UrlValue::parse("https://example.com:8443/").effective_port(), Some(8443));
    /// assert_eq!(UrlValue::parse("x-custom://example.com/").effective_port(), None);
    /// ```
    #[must_use]
    pub fn effective_port(&self) -> Option<u32> {
        self.port()
            .or_else(|| self.scheme().and_then(default_port).map(u32::from))
    }

    /// Returns the path.
    #[must_use]
    pub const fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the encoded query text.
    #[must_use]
    pub const fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// Returns the decoded query parameters; empty when there is no query.
    #[must_use]
    pub fn query_params(&self) -> QueryValue {
        self.query.as_ref().map(Query::params).unwrap_or_default()
    }

    /// Returns the encoded fragment.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Returns true if the URL serializes with a `//` authority marker.
    ///
    /// That is the case when a host is present or the scheme is `file`.
    #[must_use]
    pub fn has_authority(&self) -> bool {
        self.host.is_some() || self.scheme.as_deref() == Some(FILE_SCHEME)
    }

    /// Returns true if the URL has a scheme.
    #[must_use]
    pub const fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }

    /// Returns the authority text (`[user[:pass]@]host[:port]`).
    #[must_use]
    pub fn authority(&self) -> Option<String> {
        if !self.has_authority() {
            return None;
        }
        let mut out = String::new();
        self.write_authority(&mut out).ok()?;
        Some(out)
    }

    /// Returns `scheme://host[:port]`, the URL with user info, path, query
    /// and fragment removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_canon::UrlValue;
    ///
    /// let url = UrlValue::parse("https://u@example.com:8443/a?b#c");
    /// assert_eq!(url.root().as_deref(), Some("https://example.com:8443"));
    /// ```
    #[must_use]
    pub fn root(&self) -> Option<String> {
        let host = self.host.as_ref()?;
        let mut out = String::new();
        if let Some(scheme) = &self.scheme {
            out.push_str(scheme);
            out.push(':');
        }
        out.push_str("//");
        out.push_str(host.as_str());
        if let Some(port) = self.port {
            out.push(':');
            out.push_str(&port.to_string());
        }
        Some(out)
    }

    /// Returns a copy with the given scheme.
    #[must_use]
    pub fn with_scheme(&self, scheme: &str) -> Self {
        Self {
            scheme: Some(scheme.to_string()),
            ..self.clone()
        }
    }

    /// Returns a copy without a scheme.
    #[must_use]
    pub fn without_scheme(&self) -> Self {
        Self {
            scheme: None,
            ..self.clone()
        }
    }

    /// Returns a copy with the given user name.
    #[must_use]
    pub fn with_user(&self, user: &str) -> Self {
        Self {
            user: Some(user.to_string()),
            ..self.clone()
        }
    }

    /// Returns a copy with the given password.
    #[must_use]
    pub fn with_pass(&self, pass: &str) -> Self {
        Self {
            pass: Some(pass.to_string()),
            ..self.clone()
        }
    }

    /// Returns a copy without user name and password.
    #[must_use]
    pub fn without_user_info(&self) -> Self {
        Self {
            user: None,
            pass: None,
            ..self.clone()
        }
    }

    /// Returns a copy with the given host.
    #[must_use]
    pub fn with_host(&self, host: &str) -> Self {
        Self {
            host: Some(Host::new(host)),
            ..self.clone()
        }
    }

    /// Returns a copy without a host.
    #[must_use]
    pub fn without_host(&self) -> Self {
        Self {
            host: None,
            ..self.clone()
        }
    }

    /// Returns a copy with the given port; `None` removes the port.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::InvalidPort`] if the port is outside `1..=65535`.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_canon::UrlValue;
    ///
    /// let url = UrlValue::parse("http://example.com/");
    /// assert_eq!(url.with_port(Some(8080)).unwrap().to_string(), "http://example.com:8080/");
    /// assert!(url.with_port(Some(0)).is_err());
    /// ```
    pub fn with_port(&self, port: Option<i64>) -> Result<Self, UrlError> {
        let port = filter_port(port)?.map(|n| Port::Number(u32::from(n)));
        Ok(Self {
            port,
            ..self.clone()
        })
    }

    /// Returns a copy with the given path, percent-encoded as needed.
    #[must_use]
    pub fn with_path(&self, path: &str) -> Self {
        Self {
            path: Path::new(path),
            ..self.clone()
        }
    }

    /// Returns a copy with the given query text, percent-encoded as needed.
    #[must_use]
    pub fn with_query(&self, query: &str) -> Self {
        Self {
            query: Some(Query::new(query)),
            ..self.clone()
        }
    }

    /// Returns a copy whose query is serialized from `params`.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_canon::{QueryEncoding, QueryValue, UrlValue};
    ///
    /// let mut params = QueryValue::new();
    /// params.add("q", Some("a b".to_string()));
    /// params.add("flag", None);
    /// let url = UrlValue::parse("http://example.com/search");
    /// let url = url.with_query_value(&params, QueryEncoding::Full);
    /// assert_eq!(url.to_string(), "http://example.com/search?q=a%20b&flag");
    /// ```
    #[must_use]
    pub fn with_query_value(&self, params: &QueryValue, encoding: QueryEncoding) -> Self {
        Self {
            query: Some(Query::from_value(params, encoding)),
            ..self.clone()
        }
    }

    /// Returns a copy without a query.
    #[must_use]
    pub fn without_query(&self) -> Self {
        Self {
            query: None,
            ..self.clone()
        }
    }

    /// Returns a copy with the given fragment, percent-encoded as needed.
    #[must_use]
    pub fn with_fragment(&self, fragment: &str) -> Self {
        Self {
            fragment: Some(encode_query_or_fragment(fragment)),
            ..self.clone()
        }
    }

    /// Returns a copy without a fragment.
    #[must_use]
    pub fn without_fragment(&self) -> Self {
        Self {
            fragment: None,
            ..self.clone()
        }
    }

    /// Returns the normalized form of this URL.
    ///
    /// Shorthand for [`normalize`](crate::normalize).
    #[must_use]
    pub fn normalized(&self, options: &NormalizationOptions) -> Self {
        crate::normalize::normalize(self, options)
    }

    fn write_authority(&self, out: &mut impl fmt::Write) -> fmt::Result {
        if self.user.is_some() || self.pass.is_some() {
            out.write_str(self.user.as_deref().unwrap_or_default())?;
            if let Some(pass) = &self.pass {
                out.write_char(':')?;
                out.write_str(pass)?;
            }
            out.write_char('@')?;
        }
        if let Some(host) = &self.host {
            out.write_str(host.as_str())?;
        }
        if let Some(port) = self.port {
            write!(out, ":{port}")?;
        }
        Ok(())
    }
}

impl fmt::Display for UrlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}:")?;
        }

        let authority = self.has_authority();
        if authority {
            f.write_str("//")?;
            self.write_authority(f)?;
        }

        let path = self.path.as_str();
        if authority && !path.is_empty() && !path.starts_with('/') {
            write!(f, "/{path}")?;
        } else if !authority && path.starts_with("//") {
            // would otherwise read back as an authority
            write!(f, "/{}", path.trim_start_matches('/'))?;
        } else {
            f.write_str(path)?;
        }

        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

impl FromStr for UrlValue {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse(s))
    }
}

impl From<&str> for UrlValue {
    fn from(s: &str) -> Self {
        parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UrlValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UrlValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(parse(&s))
    }
}
