//! URL parsing, normalization and scope comparison.
//!
//! This crate splits URL strings into their RFC 3986 components, rewrites
//! them with a configurable set of normalization transforms, and decides
//! whether one URL lies within the scope of another.
//!
//! # Overview
//!
//! Parsing is lenient and never fails: any string yields a [`UrlValue`],
//! possibly with most components absent. A component can be absent, present
//! but empty, or present with content, and serialization keeps the three
//! apart:
//!
//! ```text
//! [scheme ":"] ["//" [user[":" pass] "@"] host [":" port]] path ["?" query] ["#" fragment]
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use url_canon::{NormalizationOptions, Transform, UrlValue};
//!
//! let url = UrlValue::parse("HTTP://www.Example.com:80/a/./b/../c?b=2&a=1#");
//! assert_eq!(url.host().map(|h| h.as_str()), Some("www.Example.com"));
//!
//! // Transforms that never change the identified resource
//! let preserving = NormalizationOptions::preserving();
//! assert_eq!(
//!     url.normalized(&preserving).to_string(),
//!     "http://www.example.com/a/c?b=2&a=1"
//! );
//!
//! // Opt in to lossy transforms one by one
//! let aggressive = NormalizationOptions::builder()
//!     .enable_all(Transform::PRESERVING.iter().copied())
//!     .enable(Transform::RemoveWww)
//!     .enable(Transform::SortQueryParameters)
//!     .build()
//!     .unwrap();
//! assert_eq!(
//!     url.normalized(&aggressive).to_string(),
//!     "http://example.com/a/c?a=1&b=2"
//! );
//! ```
//!
//! # Scope
//!
//! ```rust
//! use url_canon::{ScopeComparer, UrlValue};
//!
//! let mut comparer = ScopeComparer::new();
//! comparer.add_equivalent_schemes(["http", "https"]);
//! assert!(comparer.is_in_scope(
//!     &UrlValue::parse("https://example.com/docs"),
//!     &UrlValue::parse("http://example.com/docs/intro"),
//! ));
//! ```
//!
//! # Transforms
//!
//! | Transform | Preserving |
//! |-----------|------------|
//! | `add-default-scheme` | no |
//! | `remove-user-info` | no |
//! | `remove-fragment` | no |
//! | `remove-empty-fragment` | yes |
//! | `remove-session-ids` | no |
//! | `lowercase-scheme-host` | yes |
//! | `host-to-punycode` | yes |
//! | `remove-www` | no |
//! | `remove-dot-segments` | yes |
//! | `remove-duplicate-slashes` | no |
//! | `add-trailing-slash` | no |
//! | `sort-query-parameters` | no |
//! | `decode-unreserved` | yes |
//! | `remove-default-port` | yes |
//! | `uppercase-escapes` | yes |
//! | `empty-http-path-to-slash` | yes |
//! | `remove-file-localhost` | yes |
//! | `remove-default-file` | no |
//! | `remove-query-parameters` | no |
//! | `remove-empty-parameters` | no |
//! | `remove-empty-query` | no |
//!
//! Transforms run in the order listed.
//!
//! # Features
//!
//! - `serde`: string (de)serialization for [`UrlValue`], and serde support
//!   for [`Transform`] and [`NormalizationConfig`].

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod address;
mod codec;
mod constants;
mod error;
mod host;
#[cfg(kani)]
mod kani_impls;
mod normalize;
mod options;
mod parser;
mod path;
pub mod prelude;
mod query;
mod scope;
mod transform;
mod url;

pub use address::{Address, Ipv4Cidr, SPECIAL_PURPOSE_RANGES, parse_address};
pub use codec::{
    decode_component, decode_unreserved, encode_path, encode_query_component,
    encode_query_minimal, encode_query_or_fragment, filter_port, is_unreserved, uppercase_escapes,
};
pub use constants::{
    DEFAULT_FILE_PATTERNS, DEFAULT_PORTS, DEFAULT_SCHEME, DUMMY_SCHEME, MAX_PORT, MIN_PORT,
    SESSION_ID_PARAMS, default_port,
};
pub use error::{AddressError, IdnaError, OptionsError, UrlError};
pub use host::{Host, to_ascii, to_unicode};
pub use normalize::{normalize, normalize_str};
pub use options::{NormalizationConfig, NormalizationOptions, NormalizationOptionsBuilder};
pub use parser::parse;
pub use path::{Path, collapse_slashes, remove_dot_segments};
pub use query::{Query, QueryEncoding, QueryValue};
pub use scope::ScopeComparer;
pub use transform::Transform;
pub use url::{Port, UrlValue};
