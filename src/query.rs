//! Query model: the raw encoded query and its key/value view.

use std::fmt;
use std::str::FromStr;

use crate::codec::{
    decode_component, encode_query_component, encode_query_minimal, encode_query_or_fragment,
};

/// How [`QueryValue::serialize`] escapes keys and values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueryEncoding {
    /// Escape everything outside the unreserved set.
    #[default]
    Full,
    /// Keep keys and values decoded, escaping only `&` and `#`.
    Minimal,
}

/// Ordered mapping of decoded query keys to optional decoded values.
///
/// Keys are unique. On parse the last occurrence of a key wins but keeps
/// the position of the first. A key without `=` has no value, which is
/// distinct from an empty value.
///
/// # Examples
///
/// ```
/// use url_canon::{QueryEncoding, QueryValue};
///
/// let query = QueryValue::parse("b=2&a&c=%20");
/// assert_eq!(query.get("b"), Some(Some("2")));
/// assert_eq!(query.get("a"), Some(None));
/// assert_eq!(query.get("c"), Some(Some(" ")));
/// assert_eq!(query.serialize(QueryEncoding::Full), "b=2&a&c=%20");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryValue {
    pairs: Vec<(String, Option<String>)>,
}

impl QueryValue {
    /// Creates an empty query value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses query text (without the leading `?`).
    ///
    /// Empty pieces between `&` separators are skipped.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut query = Self::new();
        for piece in input.split('&').filter(|piece| !piece.is_empty()) {
            let (key, value) = split_piece(piece);
            query.set(decode_component(key), value.map(decode_component));
        }
        query
    }

    /// Returns the pairs in order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, Option<String>)] {
        &self.pairs
    }

    /// Returns an iterator over keys and optional values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    /// Returns the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(key, _)| key.as_str())
    }

    /// Returns `Some(value)` if the key is present; the inner option is the value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.position(key).map(|i| self.pairs[i].1.as_deref())
    }

    /// Returns true if the key is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Returns the number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if there are no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Appends a pair unless the key is already present.
    ///
    /// Returns true if the pair was added.
    pub fn add(&mut self, key: impl Into<String>, value: Option<String>) -> bool {
        let key = key.into();
        if self.contains(&key) {
            return false;
        }
        self.pairs.push((key, value));
        true
    }

    /// Replaces the value of an existing key in place, or appends the pair.
    pub fn set(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match self.position(&key) {
            Some(i) => self.pairs[i].1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Removes a key, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Option<String>> {
        self.position(key).map(|i| self.pairs.remove(i).1)
    }

    /// Keeps only the pairs for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, Option<&str>) -> bool) {
        self.pairs
            .retain(|(key, value)| keep(key.as_str(), value.as_deref()));
    }

    /// Sorts pairs by key; the sort is stable.
    pub fn sort_by_key(&mut self) {
        self.pairs.sort_by(|(a, _), (b, _)| a.cmp(b));
    }

    /// Serializes the pairs joined with `&`.
    ///
    /// A pair without a value, or with an empty one, renders as a bare key.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_canon::{QueryEncoding, QueryValue};
    ///
    /// let mut query = QueryValue::new();
    /// query.add("a/a", Some("1".to_string()));
    /// query.add("b?b", Some("2".to_string()));
    /// assert_eq!(query.serialize(QueryEncoding::Minimal), "a/a=1&b?b=2");
    /// assert_eq!(query.serialize(QueryEncoding::Full), "a%2Fa=1&b%3Fb=2");
    /// ```
    #[must_use]
    pub fn serialize(&self, encoding: QueryEncoding) -> String {
        let encode: fn(&str) -> String = match encoding {
            QueryEncoding::Full => encode_query_component,
            QueryEncoding::Minimal => encode_query_minimal,
        };

        self.pairs
            .iter()
            .map(|(key, value)| match value.as_deref() {
                Some(value) if !value.is_empty() => format!("{}={}", encode(key), encode(value)),
                _ => encode(key),
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.pairs.iter().position(|(k, _)| k == key)
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.serialize(QueryEncoding::Full))
    }
}

impl FromStr for QueryValue {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for QueryValue {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (key, value) in iter {
            query.set(key, value);
        }
        query
    }
}

/// The query component of a URL, as encoded text.
///
/// Kept verbatim (after the query codec) so duplicate keys and the original
/// escapes survive; [`Query::params`] gives the decoded view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Query(String);

impl Query {
    /// Creates a query, percent-encoding characters outside the query class.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self(encode_query_or_fragment(text))
    }

    /// Serializes a key/value view into a query.
    #[must_use]
    pub fn from_value(value: &QueryValue, encoding: QueryEncoding) -> Self {
        Self::new(&value.serialize(encoding))
    }

    /// Returns the encoded query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the query text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the decoded key/value view.
    #[must_use]
    pub fn params(&self) -> QueryValue {
        QueryValue::parse(&self.0)
    }

    /// Returns the raw `&`-separated pieces, skipping empty ones.
    pub fn pieces(&self) -> impl Iterator<Item = &str> {
        self.0.split('&').filter(|piece| !piece.is_empty())
    }

    /// Returns the query with its pieces stably sorted by decoded key.
    ///
    /// Pieces are kept verbatim, so duplicate keys survive.
    #[must_use]
    pub fn sorted_by_key(&self) -> Self {
        let mut pieces: Vec<(String, &str)> = self
            .pieces()
            .map(|piece| (decode_component(split_piece(piece).0), piece))
            .collect();
        pieces.sort_by(|(a, _), (b, _)| a.cmp(b));
        Self(
            pieces
                .into_iter()
                .map(|(_, piece)| piece)
                .collect::<Vec<_>>()
                .join("&"),
        )
    }

    /// Keeps only the pieces for which `keep` returns true.
    ///
    /// `keep` receives the decoded key and decoded value. Returns `None` if
    /// a non-empty query loses every piece.
    #[must_use]
    pub fn retain_pieces(&self, mut keep: impl FnMut(&str, Option<&str>) -> bool) -> Option<Self> {
        let kept: Vec<&str> = self
            .pieces()
            .filter(|piece| {
                let (key, value) = split_piece(piece);
                let value = value.map(decode_component);
                keep(&decode_component(key), value.as_deref())
            })
            .collect();

        if kept.is_empty() && !self.0.is_empty() {
            None
        } else {
            Some(Self(kept.join("&")))
        }
    }

    pub(crate) const fn from_encoded(text: String) -> Self {
        Self(text)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn split_piece(piece: &str) -> (&str, Option<&str>) {
    match piece.split_once('=') {
        Some((key, value)) => (key, Some(value)),
        None => (piece, None),
    }
}
