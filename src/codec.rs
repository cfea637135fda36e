//! Percent-encoding codec for URL components (RFC 3986 §2).
//!
//! The encoders leave every well-formed `%XX` escape untouched and encode
//! everything else outside the component's character class, including a `%`
//! that does not start a valid escape. Encoding is therefore idempotent.
//! Multi-byte UTF-8 is encoded byte by byte.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::constants::{MAX_PORT, MIN_PORT};
use crate::error::UrlError;

/// Bytes escaped in a query parameter key or value under full encoding:
/// everything but the unreserved set.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Bytes escaped in a path: unreserved, sub-delims, `:`, `@` and `/` pass.
const PATH: &AsciiSet = &UNRESERVED
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@')
    .remove(b'/');

/// Bytes escaped in a query or fragment: the path class plus `?`.
const QUERY_OR_FRAGMENT: &AsciiSet = &PATH.remove(b'?');

/// Encodes text for use as a URL path.
///
/// # Examples
///
/// ```
/// use url_canon::encode_path;
///
/// assert_eq!(encode_path("/a b/c%2Fd"), "/a%20b/c%2Fd");
/// assert_eq!(encode_path("/100%"), "/100%25");
/// ```
#[must_use]
pub fn encode_path(text: &str) -> String {
    encode_preserving_escapes(text, PATH)
}

/// Encodes text for use as a URL query or fragment.
///
/// # Examples
///
/// ```
/// use url_canon::encode_query_or_fragment;
///
/// assert_eq!(encode_query_or_fragment("q=a b&x=?"), "q=a%20b&x=?");
/// ```
#[must_use]
pub fn encode_query_or_fragment(text: &str) -> String {
    encode_preserving_escapes(text, QUERY_OR_FRAGMENT)
}

/// Decodes escapes of unreserved characters (`ALPHA / DIGIT / - . _ ~`).
///
/// All other escapes are kept as they are, so the result identifies the same
/// resource.
///
/// # Examples
///
/// ```
/// use url_canon::decode_unreserved;
///
/// assert_eq!(decode_unreserved("%7Euser/%41%2F"), "~user/A%2F");
/// ```
#[must_use]
pub fn decode_unreserved(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut run_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match escape_at(bytes, i) {
            Some(byte) if is_unreserved(byte) => {
                out.push_str(&text[run_start..i]);
                out.push(char::from(byte));
                i += 3;
                run_start = i;
            }
            Some(_) => i += 3,
            None => i += 1,
        }
    }

    out.push_str(&text[run_start..]);
    out
}

/// Rewrites the hex digits of every `%xx` escape in uppercase.
///
/// # Examples
///
/// ```
/// use url_canon::uppercase_escapes;
///
/// assert_eq!(uppercase_escapes("/a%2fb%c3%a9"), "/a%2Fb%C3%A9");
/// ```
#[must_use]
pub fn uppercase_escapes(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut run_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if escape_at(bytes, i).is_some() {
            out.push_str(&text[run_start..i]);
            out.push('%');
            out.push(char::from(bytes[i + 1].to_ascii_uppercase()));
            out.push(char::from(bytes[i + 2].to_ascii_uppercase()));
            i += 3;
            run_start = i;
        } else {
            i += 1;
        }
    }

    out.push_str(&text[run_start..]);
    out
}

/// Validates a port number.
///
/// `None` passes through; a value in `1..=65535` is returned as `u16`.
///
/// # Errors
///
/// Returns [`UrlError::InvalidPort`] for any other value.
///
/// # Examples
///
/// ```
/// use url_canon::filter_port;
///
/// assert_eq!(filter_port(Some(8080)), Ok(Some(8080)));
/// assert_eq!(filter_port(None), Ok(None));
/// assert!(filter_port(Some(0)).is_err());
/// ```
pub fn filter_port(value: Option<i64>) -> Result<Option<u16>, UrlError> {
    match value {
        None => Ok(None),
        Some(port) if (MIN_PORT..=MAX_PORT).contains(&port) => u16::try_from(port)
            .map(Some)
            .map_err(|_| UrlError::invalid_port(port)),
        Some(port) => Err(UrlError::invalid_port(port)),
    }
}

/// Fully percent-encodes a decoded query key or value.
///
/// Everything outside the unreserved set is escaped, including `/` and `?`.
#[must_use]
pub fn encode_query_component(text: &str) -> String {
    utf8_percent_encode(text, UNRESERVED).to_string()
}

/// Minimally encodes a decoded query key or value.
///
/// Only `&` and `#` are escaped, since they would split the pair or start a
/// fragment. A `%` that would read back as an escape is escaped as well so
/// the text decodes to itself.
#[must_use]
pub fn encode_query_minimal(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());

    for (i, c) in text.char_indices() {
        match c {
            '&' => out.push_str("%26"),
            '#' => out.push_str("%23"),
            '%' if escape_at(bytes, i).is_some() => out.push_str("%25"),
            _ => out.push(c),
        }
    }

    out
}

/// Percent-decodes a query key or value, replacing invalid UTF-8 with U+FFFD.
#[must_use]
pub fn decode_component(text: &str) -> String {
    percent_decode_str(text).decode_utf8_lossy().into_owned()
}

/// Returns true for `ALPHA / DIGIT / "-" / "." / "_" / "~"`.
#[must_use]
pub const fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

/// Returns the decoded byte if a well-formed `%XX` escape starts at `i`.
pub(crate) fn escape_at(bytes: &[u8], i: usize) -> Option<u8> {
    if bytes.get(i) != Some(&b'%') {
        return None;
    }
    let high = hex_value(*bytes.get(i + 1)?)?;
    let low = hex_value(*bytes.get(i + 2)?)?;
    Some((high << 4) | low)
}

const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

fn encode_preserving_escapes(text: &str, set: &'static AsciiSet) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut run_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if escape_at(bytes, i).is_some() {
            out.extend(utf8_percent_encode(&text[run_start..i], set));
            out.push_str(&text[i..i + 3]);
            i += 3;
            run_start = i;
        } else {
            i += 1;
        }
    }

    out.extend(utf8_percent_encode(&text[run_start..], set));
    out
}
