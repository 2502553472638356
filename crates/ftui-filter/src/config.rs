#![forbid(unsafe_code)]

//! Tunables for the filter pipeline.
//!
//! [`FilterConfig::default()`] reproduces the stock behavior: a depth limit of
//! 100, `@each` as the wildcard segment and the query used verbatim as a
//! pattern.
//!
//! # Loading
//!
//! ```toml
//! # ftui-filter.toml
//! max_depth = 32
//! wildcard = "@each"
//! escape_query = true
//! ```
//!
//! ```rust,ignore
//! let config = FilterConfig::from_toml_file("ftui-filter.toml")?;
//! let config = FilterConfig::from_json_str(r#"{"escape_query": true}"#)?;
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default recursion limit for path resolution.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Default wildcard segment.
pub const DEFAULT_WILDCARD: &str = "@each";

/// Filter pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Resolution fails once the walk goes deeper than this.
    pub max_depth: usize,
    /// Segment that fans out over the elements of a collection.
    pub wildcard: String,
    /// Treat the query as literal text instead of a pattern.
    pub escape_query: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            wildcard: DEFAULT_WILDCARD.to_owned(),
            escape_query: false,
        }
    }
}

impl FilterConfig {
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_wildcard(mut self, wildcard: impl Into<String>) -> Self {
        self.wildcard = wildcard.into();
        self
    }

    #[must_use]
    pub fn with_escape_query(mut self, escape_query: bool) -> Self {
        self.escape_query = escape_query;
        self
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, FilterConfigError> {
        let config: Self = toml::from_str(s).map_err(FilterConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-toml")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, FilterConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(FilterConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, FilterConfigError> {
        let config: Self = serde_json::from_str(s).map_err(FilterConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FilterConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(FilterConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_depth == 0 {
            errors.push("max_depth must be > 0".into());
        }

        if self.wildcard.is_empty() {
            errors.push("wildcard must not be empty".into());
        } else if !self
            .wildcard
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '-'))
        {
            // Property specs lose every other character during normalization.
            errors.push(format!(
                "wildcard may only contain ASCII letters, digits, '_', '@' or '-', got {:?}",
                self.wildcard
            ));
        }

        errors
    }

    fn validated(self) -> Result<Self, FilterConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(FilterConfigError::Validation(errors))
        }
    }
}

/// Errors from loading a [`FilterConfig`].
#[derive(Debug)]
pub enum FilterConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config-toml")]
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl fmt::Display for FilterConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config-toml")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errs) => write!(f, "validation errors: {}", errs.join("; ")),
        }
    }
}

impl std::error::Error for FilterConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config-toml")]
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
