//! Path model: percent-encoded path text and its pure derivations.

use std::fmt;

use crate::codec::{encode_path, escape_at};

/// A percent-encoded URL path.
///
/// Construction applies the path codec; everything else is derived from the
/// current text.
///
/// # Examples
///
/// ```
/// use url_canon::Path;
///
/// let path = Path::new("/docs/guide.html");
/// assert!(path.is_absolute());
/// assert!(path.has_filename());
/// assert_eq!(path.filename(), Some("guide.html"));
/// assert_eq!(path.directory(), "/docs/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(String);

impl Path {
    /// Creates a path, percent-encoding characters outside the path class.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self(encode_path(text))
    }

    /// Returns an empty path.
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Returns the encoded path text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the path is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the path starts with `/`.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.0.starts_with('/')
    }

    /// Returns true if the path does not start with `/`; an empty path is relative.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        !self.is_absolute()
    }

    /// Returns true if the path ends with `/`.
    #[must_use]
    pub fn has_trailing_slash(&self) -> bool {
        self.0.ends_with('/')
    }

    /// Returns true if the last segment contains a `.`.
    ///
    /// Always false for an empty path or one ending in `/`.
    #[must_use]
    pub fn has_filename(&self) -> bool {
        self.filename().is_some()
    }

    /// Returns the last segment when it is a filename.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        if self.0.is_empty() || self.has_trailing_slash() {
            return None;
        }
        let last = self.last_segment();
        last.contains('.').then_some(last)
    }

    /// Returns the path without its filename segment.
    ///
    /// A path without a filename is returned unchanged.
    #[must_use]
    pub fn directory(&self) -> &str {
        match self.filename() {
            Some(name) => &self.0[..self.0.len() - name.len()],
            None => &self.0,
        }
    }

    /// Returns the segments between `/` separators, ignoring a leading one.
    #[must_use]
    pub fn segments(&self) -> Vec<&str> {
        let body = self.0.strip_prefix('/').unwrap_or(&self.0);
        if body.is_empty() {
            Vec::new()
        } else {
            body.split('/').collect()
        }
    }

    /// Returns true if `prefix` is a literal prefix of this path.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.starts_with(&prefix.0)
    }

    fn last_segment(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub(crate) const fn from_encoded(text: String) -> Self {
        Self(text)
    }
}

/// Removes `.` and `..` segments (RFC 3986 §5.2.4).
///
/// `..` pops the last retained segment and never climbs above the root.
/// A path ending in a dot segment keeps a trailing `/`. Percent-encoded
/// dots (`%2E`) count as dots.
///
/// # Examples
///
/// ```
/// use url_canon::remove_dot_segments;
///
/// assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
/// assert_eq!(remove_dot_segments("/mid/content=5/../6"), "/mid/6");
/// assert_eq!(remove_dot_segments("/.."), "/");
/// assert_eq!(remove_dot_segments("/."), "/");
/// ```
#[must_use]
pub fn remove_dot_segments(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let absolute = path.starts_with('/');
    let body = if absolute { &path[1..] } else { path };
    let segments: Vec<&str> = body.split('/').collect();
    let last = segments.len() - 1;

    let mut output: Vec<&str> = Vec::with_capacity(segments.len());
    let mut ends_in_dot = false;

    for (i, segment) in segments.iter().enumerate() {
        match dot_segment(segment) {
            Some(DotSegment::Current) => ends_in_dot = i == last,
            Some(DotSegment::Parent) => {
                output.pop();
                ends_in_dot = i == last;
            }
            None => output.push(segment),
        }
    }

    let mut result = String::with_capacity(path.len());
    if absolute {
        result.push('/');
    }
    result.push_str(&output.join("/"));
    if ends_in_dot && !output.is_empty() && !result.ends_with('/') {
        result.push('/');
    }
    result
}

/// Collapses every run of consecutive `/` into one.
///
/// # Examples
///
/// ```
/// use url_canon::collapse_slashes;
///
/// assert_eq!(collapse_slashes("//a///b//"), "/a/b/");
/// ```
#[must_use]
pub fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !previous_slash {
                out.push(c);
            }
            previous_slash = true;
        } else {
            out.push(c);
            previous_slash = false;
        }
    }
    out
}

enum DotSegment {
    Current,
    Parent,
}

fn dot_segment(segment: &str) -> Option<DotSegment> {
    let bytes = segment.as_bytes();
    let mut dots = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'.' {
            i += 1;
        } else if escape_at(bytes, i) == Some(b'.') {
            i += 3;
        } else {
            return None;
        }
        dots += 1;
    }
    match dots {
        1 => Some(DotSegment::Current),
        2 => Some(DotSegment::Parent),
        _ => None,
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
