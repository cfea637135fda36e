//! The normalization pipeline.
//!
//! Enabled transforms run in [`Transform`] declaration order. Each one is a
//! small rewrite of a single component; the sequence as a whole is
//! idempotent, so normalizing a normalized URL changes nothing.

use crate::codec::{decode_unreserved, uppercase_escapes};
use crate::constants::{SESSION_ID_PARAMS, default_port};
use crate::host::Host;
use crate::options::NormalizationOptions;
use crate::parser::parse;
use crate::path::{Path, collapse_slashes, remove_dot_segments};
use crate::query::Query;
use crate::transform::Transform;
use crate::url::{Port, UrlValue};

/// Path parameter carrying a servlet session id.
const JSESSIONID_PARAM: &str = ";jsessionid=";

/// Schemes whose empty path means `/`.
const HTTP_SCHEMES: &[&str] = &["http", "https"];

/// Normalizes a URL with the enabled transforms.
///
/// # Examples
///
/// ```
/// use url_canon::{NormalizationOptions, Transform, UrlValue, normalize};
///
/// let options = NormalizationOptions::builder()
///     .enable(Transform::RemoveDotSegments)
///     .enable(Transform::RemoveDefaultPort)
///     .enable(Transform::RemoveWww)
///     .enable(Transform::LowercaseSchemeHost)
///     .build()
///     .unwrap();
/// let url = UrlValue::parse("http://www.EXAMPLE.com:80/a/./b/../c");
/// assert_eq!(normalize(&url, &options).to_string(), "http://example.com/a/c");
/// ```
#[must_use]
pub fn normalize(url: &UrlValue, options: &NormalizationOptions) -> UrlValue {
    let mut current = url.clone();
    for transform in options.transforms() {
        apply(&mut current, transform, options);
        tracing::trace!(%transform, url = %current, "applied transform");
    }
    current
}

/// Parses and normalizes a URL string, returning the normalized string.
#[must_use]
pub fn normalize_str(input: &str, options: &NormalizationOptions) -> String {
    normalize(&parse(input), options).to_string()
}

fn apply(url: &mut UrlValue, transform: Transform, options: &NormalizationOptions) {
    match transform {
        Transform::AddDefaultScheme => add_default_scheme(url, options.default_scheme()),
        Transform::RemoveUserInfo => {
            url.user = None;
            url.pass = None;
        }
        Transform::RemoveFragment => url.fragment = None,
        Transform::RemoveEmptyFragment => {
            if url.fragment.as_deref() == Some("") {
                url.fragment = None;
            }
        }
        Transform::RemoveSessionIds => remove_session_ids(url),
        Transform::LowercaseSchemeHost => {
            if let Some(scheme) = &mut url.scheme {
                scheme.make_ascii_lowercase();
            }
            if let Some(host) = &url.host {
                url.host = Some(Host::new(host.as_str().to_ascii_lowercase()));
            }
        }
        Transform::HostToPunycode => url.host = url.host.as_ref().map(Host::to_ascii),
        Transform::RemoveWww => url.host = url.host.as_ref().map(Host::without_leading_www),
        Transform::RemoveDotSegments => {
            url.path = Path::from_encoded(remove_dot_segments(url.path.as_str()));
        }
        Transform::RemoveDuplicateSlashes => {
            url.path = Path::from_encoded(collapse_slashes(url.path.as_str()));
        }
        Transform::AddTrailingSlash => add_trailing_slash(url),
        Transform::SortQueryParameters => url.query = url.query.as_ref().map(Query::sorted_by_key),
        Transform::DecodeUnreserved => {
            url.path = Path::from_encoded(decode_unreserved(url.path.as_str()));
            url.query = url
                .query
                .as_ref()
                .map(|q| Query::from_encoded(decode_unreserved(q.as_str())));
        }
        Transform::RemoveDefaultPort => remove_default_port(url),
        Transform::UppercaseEscapes => {
            url.path = Path::from_encoded(uppercase_escapes(url.path.as_str()));
            url.query = url
                .query
                .as_ref()
                .map(|q| Query::from_encoded(uppercase_escapes(q.as_str())));
            url.fragment = url.fragment.as_deref().map(uppercase_escapes);
        }
        Transform::EmptyHttpPathToSlash => {
            let http = url
                .scheme
                .as_deref()
                .is_some_and(|s| HTTP_SCHEMES.iter().any(|h| s.eq_ignore_ascii_case(h)));
            if http && url.path.is_empty() {
                url.path = Path::from_encoded("/".to_string());
            }
        }
        Transform::RemoveFileLocalhost => {
            let file = url.scheme.as_deref() == Some("file");
            if file && url.host.as_ref().is_some_and(|h| h.as_str() == "localhost") {
                // `file:` always serializes `//`, so an empty host reads back the same
                url.host = Some(Host::default());
            }
        }
        Transform::RemoveDefaultFile => remove_default_file(url, options),
        Transform::RemoveQueryParameters => {
            retain_query(url, |key, _| !options.is_removed_query_key(key));
        }
        Transform::RemoveEmptyParameters => {
            retain_query(url, |_, value| value.is_some_and(|v| !v.is_empty()));
        }
        Transform::RemoveEmptyQuery => {
            if url.query.as_ref().is_some_and(Query::is_empty) {
                url.query = None;
            }
        }
    }
}

fn add_default_scheme(url: &mut UrlValue, scheme: &str) {
    if url.scheme.is_some() {
        return;
    }
    if url.host.is_none() && !url.path.is_empty() && url.path.is_relative() {
        // `example.com/a` parsed as a path; read it again with an authority
        *url = parse(&format!("{scheme}://{url}"));
    } else {
        url.scheme = Some(scheme.to_string());
    }
}

fn add_trailing_slash(url: &mut UrlValue) {
    let path = &url.path;
    if (url.host.is_some() || path.is_absolute()) && !path.has_trailing_slash() && !path.has_filename()
    {
        url.path = Path::from_encoded(format!("{}/", path.as_str()));
    }
}

fn remove_default_port(url: &mut UrlValue) {
    let default = url.scheme.as_deref().and_then(default_port).map(u32::from);
    match url.port {
        Some(Port::Empty) => url.port = None,
        Some(Port::Number(n)) if Some(n) == default => url.port = None,
        _ => {}
    }
}

fn remove_default_file(url: &mut UrlValue, options: &NormalizationOptions) {
    let Some(name) = url.path.filename() else {
        return;
    };
    let directory = url.path.directory();
    // a bare relative filename has no directory to fall back to
    if directory.is_empty() || !options.is_default_file(name) {
        return;
    }
    url.path = Path::from_encoded(directory.to_string());
}

fn remove_session_ids(url: &mut UrlValue) {
    retain_query(url, |key, _| {
        !SESSION_ID_PARAMS.iter().any(|id| key.eq_ignore_ascii_case(id))
    });
    url.path = Path::from_encoded(strip_session_path_params(url.path.as_str()));
}

fn strip_session_path_params(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            // match through escaped unreserved characters too
            let decoded = decode_unreserved(segment);
            match decoded.to_ascii_lowercase().find(JSESSIONID_PARAM) {
                Some(at) => decoded[..at].to_string(),
                None => segment.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn retain_query(url: &mut UrlValue, keep: impl FnMut(&str, Option<&str>) -> bool) {
    if let Some(query) = &url.query {
        url.query = query.retain_pieces(keep);
    }
}
