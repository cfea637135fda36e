//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use url_canon::prelude::*;
//!
//! let url = UrlValue::parse("http://example.com/a/../b");
//! let options = NormalizationOptions::preserving();
//! assert_eq!(normalize(&url, &options).to_string(), "http://example.com/b");
//! ```
//!
//! The codec functions and address classifier stay at the crate root.

pub use crate::{
    // Core types
    Host, Path, Port, Query, QueryEncoding, QueryValue, UrlValue,
    // Normalization
    NormalizationConfig, NormalizationOptions, NormalizationOptionsBuilder, Transform, normalize,
    normalize_str, parse,
    // Scope
    ScopeComparer,
    // Errors
    AddressError, IdnaError, OptionsError, UrlError,
};
