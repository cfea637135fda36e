//! Normalization options: the enabled transform set and its parameters.
//!
//! Options are built once, through [`NormalizationOptionsBuilder`] or from a
//! [`NormalizationConfig`] record, and are immutable afterwards. Patterns are
//! compiled at build time so a bad pattern is reported before any URL is
//! normalized.

use std::collections::BTreeSet;

use regex::Regex;

use crate::constants::{DEFAULT_FILE_PATTERNS, DEFAULT_SCHEME};
use crate::error::OptionsError;
use crate::transform::Transform;

/// Configuration name for [`Transform::PRESERVING`].
const PRESERVING_PRESET: &str = "preserving";

/// Configuration name for [`Transform::LOSSY`].
const LOSSY_PRESET: &str = "lossy";

/// A validated set of normalization transforms and their parameters.
///
/// # Examples
///
/// ```
/// use url_canon::{NormalizationOptions, Transform, UrlValue};
///
/// let options = NormalizationOptions::builder()
///     .enable_all(Transform::PRESERVING.iter().copied())
///     .enable(Transform::RemoveDefaultFile)
///     .build()
///     .unwrap();
/// let url = UrlValue::parse("HTTP://Example.COM:80/a/./index.html");
/// assert_eq!(url.normalized(&options).to_string(), "http://example.com/a/");
/// ```
#[derive(Debug, Clone)]
pub struct NormalizationOptions {
    transforms: BTreeSet<Transform>,
    default_scheme: String,
    default_file_patterns: Vec<Regex>,
    query_removal_patterns: Vec<Regex>,
}

impl NormalizationOptions {
    /// Starts building options with no transforms enabled.
    #[must_use]
    pub fn builder() -> NormalizationOptionsBuilder {
        NormalizationOptionsBuilder::new()
    }

    /// Returns options enabling exactly the preserving preset.
    #[must_use]
    pub fn preserving() -> Self {
        Self {
            transforms: Transform::PRESERVING.iter().copied().collect(),
            default_scheme: DEFAULT_SCHEME.to_string(),
            default_file_patterns: Vec::new(),
            query_removal_patterns: Vec::new(),
        }
    }

    /// Returns the enabled transforms in application order.
    pub fn transforms(&self) -> impl Iterator<Item = Transform> + '_ {
        self.transforms.iter().copied()
    }

    /// Returns true if `transform` is enabled.
    #[must_use]
    pub fn is_enabled(&self, transform: Transform) -> bool {
        self.transforms.contains(&transform)
    }

    /// Returns the scheme used by [`Transform::AddDefaultScheme`].
    #[must_use]
    pub fn default_scheme(&self) -> &str {
        &self.default_scheme
    }

    /// Returns true if `filename` fully matches a default-file pattern.
    #[must_use]
    pub fn is_default_file(&self, filename: &str) -> bool {
        self.default_file_patterns
            .iter()
            .any(|pattern| pattern.is_match(filename))
    }

    /// Returns true if the decoded query `key` fully matches a removal pattern.
    #[must_use]
    pub fn is_removed_query_key(&self, key: &str) -> bool {
        self.query_removal_patterns
            .iter()
            .any(|pattern| pattern.is_match(key))
    }
}

/// Builder for [`NormalizationOptions`].
///
/// Default-file patterns start as
/// [`DEFAULT_FILE_PATTERNS`](crate::DEFAULT_FILE_PATTERNS); query-removal
/// patterns start empty. Patterns must match the whole filename or key.
#[derive(Debug, Clone)]
pub struct NormalizationOptionsBuilder {
    transforms: BTreeSet<Transform>,
    default_scheme: String,
    default_file_patterns: Vec<String>,
    query_removal_patterns: Vec<String>,
}

impl NormalizationOptionsBuilder {
    /// Creates a builder with no transforms enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transforms: BTreeSet::new(),
            default_scheme: DEFAULT_SCHEME.to_string(),
            default_file_patterns: DEFAULT_FILE_PATTERNS.iter().map(ToString::to_string).collect(),
            query_removal_patterns: Vec::new(),
        }
    }

    /// Enables one transform.
    #[must_use]
    pub fn enable(mut self, transform: Transform) -> Self {
        self.transforms.insert(transform);
        self
    }

    /// Enables every transform in `transforms`.
    #[must_use]
    pub fn enable_all(mut self, transforms: impl IntoIterator<Item = Transform>) -> Self {
        self.transforms.extend(transforms);
        self
    }

    /// Disables one transform.
    #[must_use]
    pub fn disable(mut self, transform: Transform) -> Self {
        self.transforms.remove(&transform);
        self
    }

    /// Sets the scheme used by [`Transform::AddDefaultScheme`].
    #[must_use]
    pub fn default_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.default_scheme = scheme.into();
        self
    }

    /// Replaces the default-file patterns.
    #[must_use]
    pub fn default_file_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_file_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the query-removal patterns.
    #[must_use]
    pub fn query_removal_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query_removal_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Compiles the patterns and returns the options.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::InvalidPattern`] for the first pattern that is
    /// not a valid regular expression.
    pub fn build(self) -> Result<NormalizationOptions, OptionsError> {
        let default_file_patterns = compile_all(&self.default_file_patterns)?;
        let query_removal_patterns = compile_all(&self.query_removal_patterns)?;
        tracing::debug!(
            transforms = self.transforms.len(),
            default_files = default_file_patterns.len(),
            query_removals = query_removal_patterns.len(),
            "built normalization options"
        );
        Ok(NormalizationOptions {
            transforms: self.transforms,
            default_scheme: self.default_scheme,
            default_file_patterns,
            query_removal_patterns,
        })
    }
}

impl Default for NormalizationOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>, OptionsError> {
    patterns.iter().map(|p| compile(p)).collect()
}

fn compile(pattern: &str) -> Result<Regex, OptionsError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|e| OptionsError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// A plain configuration record for [`NormalizationOptions`].
///
/// Transform entries are kebab-case transform names or the preset names
/// `preserving` and `lossy`. Unset fields take the builder defaults. With
/// the `serde` feature the record deserializes from any serde format.
///
/// # Examples
///
/// ```
/// use url_canon::{NormalizationConfig, NormalizationOptions, Transform};
///
/// let config = NormalizationConfig {
///     transforms: vec!["preserving".into(), "remove-www".into()],
///     ..NormalizationConfig::default()
/// };
/// let options = NormalizationOptions::try_from(config).unwrap();
/// assert!(options.is_enabled(Transform::RemoveWww));
/// assert!(options.is_enabled(Transform::RemoveDotSegments));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct NormalizationConfig {
    /// Transform or preset names to enable.
    pub transforms: Vec<String>,
    /// Scheme for [`Transform::AddDefaultScheme`].
    pub default_scheme: Option<String>,
    /// Replacement default-file patterns.
    pub default_file_patterns: Option<Vec<String>>,
    /// Query-removal patterns.
    pub query_removal_patterns: Vec<String>,
}

impl TryFrom<NormalizationConfig> for NormalizationOptions {
    type Error = OptionsError;

    fn try_from(config: NormalizationConfig) -> Result<Self, Self::Error> {
        let mut builder = Self::builder();
        for name in &config.transforms {
            builder = match name.as_str() {
                PRESERVING_PRESET => builder.enable_all(Transform::PRESERVING.iter().copied()),
                LOSSY_PRESET => builder.enable_all(Transform::LOSSY.iter().copied()),
                other => builder.enable(other.parse()?),
            };
        }
        if let Some(scheme) = config.default_scheme {
            builder = builder.default_scheme(scheme);
        }
        if let Some(patterns) = config.default_file_patterns {
            builder = builder.default_file_patterns(patterns);
        }
        builder
            .query_removal_patterns(config.query_removal_patterns)
            .build()
    }
}
