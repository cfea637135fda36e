//! The normalization transforms and their presets.

use std::fmt;
use std::str::FromStr;

use crate::error::OptionsError;

/// A single normalization step.
///
/// Variants are declared in application order; the derived `Ord` is that
/// order, so a sorted set of transforms iterates in the order the pipeline
/// applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Transform {
    /// Give a scheme-less URL the configured default scheme.
    AddDefaultScheme,
    /// Drop user and password.
    RemoveUserInfo,
    /// Drop the fragment.
    RemoveFragment,
    /// Drop a fragment that is present but empty (a trailing `#`).
    RemoveEmptyFragment,
    /// Drop well-known session id query parameters and `;jsessionid=` path parameters.
    RemoveSessionIds,
    /// Lowercase scheme and host.
    LowercaseSchemeHost,
    /// Convert the host to ASCII (punycode).
    HostToPunycode,
    /// Strip leading `www` host labels.
    RemoveWww,
    /// Resolve `.` and `..` path segments.
    RemoveDotSegments,
    /// Collapse runs of `/` in the path.
    RemoveDuplicateSlashes,
    /// Append `/` to a path without filename or trailing slash.
    AddTrailingSlash,
    /// Stably sort query parameters by decoded key.
    SortQueryParameters,
    /// Decode escapes of unreserved characters in path and query.
    DecodeUnreserved,
    /// Drop a port equal to the scheme's default.
    RemoveDefaultPort,
    /// Uppercase the hex digits of remaining escapes.
    UppercaseEscapes,
    /// Give an `http`/`https` URL with an empty path the path `/`.
    EmptyHttpPathToSlash,
    /// Drop the host `localhost` from a `file` URL.
    RemoveFileLocalhost,
    /// Drop a filename matching a default-file pattern.
    RemoveDefaultFile,
    /// Drop query parameters whose key matches a removal pattern.
    RemoveQueryParameters,
    /// Drop query parameters with an absent or empty value.
    RemoveEmptyParameters,
    /// Drop a query that is present but empty (a trailing `?`).
    RemoveEmptyQuery,
}

impl Transform {
    /// Every transform, in application order.
    pub const ALL: &'static [Self] = &[
        Self::AddDefaultScheme,
        Self::RemoveUserInfo,
        Self::RemoveFragment,
        Self::RemoveEmptyFragment,
        Self::RemoveSessionIds,
        Self::LowercaseSchemeHost,
        Self::HostToPunycode,
        Self::RemoveWww,
        Self::RemoveDotSegments,
        Self::RemoveDuplicateSlashes,
        Self::AddTrailingSlash,
        Self::SortQueryParameters,
        Self::DecodeUnreserved,
        Self::RemoveDefaultPort,
        Self::UppercaseEscapes,
        Self::EmptyHttpPathToSlash,
        Self::RemoveFileLocalhost,
        Self::RemoveDefaultFile,
        Self::RemoveQueryParameters,
        Self::RemoveEmptyParameters,
        Self::RemoveEmptyQuery,
    ];

    /// Transforms that never change the identified resource.
    pub const PRESERVING: &'static [Self] = &[
        Self::RemoveEmptyFragment,
        Self::LowercaseSchemeHost,
        Self::HostToPunycode,
        Self::RemoveDotSegments,
        Self::DecodeUnreserved,
        Self::RemoveDefaultPort,
        Self::UppercaseEscapes,
        Self::EmptyHttpPathToSlash,
        Self::RemoveFileLocalhost,
    ];

    /// Transforms that may change the identified resource; opt-in only.
    pub const LOSSY: &'static [Self] = &[
        Self::AddDefaultScheme,
        Self::RemoveUserInfo,
        Self::RemoveFragment,
        Self::RemoveSessionIds,
        Self::RemoveWww,
        Self::RemoveDuplicateSlashes,
        Self::AddTrailingSlash,
        Self::SortQueryParameters,
        Self::RemoveDefaultFile,
        Self::RemoveQueryParameters,
        Self::RemoveEmptyParameters,
        Self::RemoveEmptyQuery,
    ];

    /// Returns the kebab-case name used in configuration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AddDefaultScheme => "add-default-scheme",
            Self::RemoveUserInfo => "remove-user-info",
            Self::RemoveFragment => "remove-fragment",
            Self::RemoveEmptyFragment => "remove-empty-fragment",
            Self::RemoveSessionIds => "remove-session-ids",
            Self::LowercaseSchemeHost => "lowercase-scheme-host",
            Self::HostToPunycode => "host-to-punycode",
            Self::RemoveWww => "remove-www",
            Self::RemoveDotSegments => "remove-dot-segments",
            Self::RemoveDuplicateSlashes => "remove-duplicate-slashes",
            Self::AddTrailingSlash => "add-trailing-slash",
            Self::SortQueryParameters => "sort-query-parameters",
            Self::DecodeUnreserved => "decode-unreserved",
            Self::RemoveDefaultPort => "remove-default-port",
            Self::UppercaseEscapes => "uppercase-escapes",
            Self::EmptyHttpPathToSlash => "empty-http-path-to-slash",
            Self::RemoveFileLocalhost => "remove-file-localhost",
            Self::RemoveDefaultFile => "remove-default-file",
            Self::RemoveQueryParameters => "remove-query-parameters",
            Self::RemoveEmptyParameters => "remove-empty-parameters",
            Self::RemoveEmptyQuery => "remove-empty-query",
        }
    }

    /// Returns true if the transform belongs to the preserving preset.
    #[must_use]
    pub fn is_preserving(self) -> bool {
        Self::PRESERVING.contains(&self)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Transform {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| OptionsError::UnknownTransform {
                name: s.to_string(),
            })
    }
}
