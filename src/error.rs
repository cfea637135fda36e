//! Error types for URL handling.
//!
//! Parsing and normalization are total: malformed input degrades to a
//! partial component set instead of failing. The only error surfaced by URL
//! operations is [`UrlError::InvalidPort`]. [`AddressError`] and
//! [`IdnaError`] come from the collaborator routines and are absorbed by
//! their callers with a fallback.

use thiserror::Error;

/// Errors raised by URL value operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// Port outside `1..=65535`.
    #[error("invalid port {value}; port must be between 1 and 65535")]
    InvalidPort {
        /// The rejected value
        value: i64,
    },
}

impl UrlError {
    /// Creates an `InvalidPort` error.
    #[must_use]
    pub const fn invalid_port(value: i64) -> Self {
        Self::InvalidPort { value }
    }
}

/// Errors raised while building [`NormalizationOptions`](crate::NormalizationOptions).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// A default-file or query-removal pattern is not a valid regular expression.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as supplied
        pattern: String,
        /// Compiler diagnostic
        reason: String,
    },
    /// A transform name in a configuration record is not recognized.
    #[error("unknown transform '{name}'")]
    UnknownTransform {
        /// The unrecognized name
        name: String,
    },
}

/// Errors from the IP-address classifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Text is not an IPv4 or IPv6 literal.
    #[error("'{input}' is not an IP address")]
    NotAnAddress {
        /// The text that failed to parse
        input: String,
    },
}

/// Errors from the IDNA routine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdnaError {
    /// The domain could not be converted.
    #[error("IDNA conversion of '{input}' failed: {reason}")]
    ConversionFailed {
        /// The domain as supplied
        input: String,
        /// Diagnostic from the IDNA implementation
        reason: String,
    },
}
