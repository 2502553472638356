#![forbid(unsafe_code)]

//! Error taxonomy for the filter pipeline.
//!
//! Two classes of failure exist:
//!
//! - [`FilterError::RecursionLimit`] aborts a single path resolution and is
//!   always reported back to the caller through [`FilterReport`].
//! - [`FilterError::MalformedInput`] is *soft*: the offending item, path or
//!   value contributes nothing to the result and the pass continues.
//!
//! Neither class ever aborts a whole filter pass.
//!
//! [`FilterReport`]: crate::FilterReport

use std::fmt;

/// Soft failure causes. Each one degrades to "no contribution".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedInput {
    /// A wildcard segment was applied to a value that cannot be iterated.
    NotIterable { segment: String },
    /// The query could not be compiled as a pattern.
    InvalidPattern { pattern: String, message: String },
    /// An item could not be converted into a filterable value.
    Conversion { message: String },
}

impl fmt::Display for MalformedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotIterable { segment } => {
                write!(f, "wildcard segment {segment:?} applied to a non-iterable value")
            }
            Self::InvalidPattern { pattern, message } => {
                write!(f, "query {pattern:?} is not a valid pattern: {message}")
            }
            Self::Conversion { message } => write!(f, "item conversion failed: {message}"),
        }
    }
}

/// Errors produced while normalizing, resolving or matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Path resolution went deeper than the configured limit.
    RecursionLimit { depth: usize, limit: usize },
    /// Input had an unexpected shape; treated as no contribution.
    MalformedInput(MalformedInput),
}

impl FilterError {
    /// Soft errors are logged and dropped; hard errors are worth surfacing.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::MalformedInput(_))
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecursionLimit { depth, limit } => write!(
                f,
                "path resolution exceeded recursion limit (depth={depth}, limit={limit})"
            ),
            Self::MalformedInput(inner) => write!(f, "malformed input: {inner}"),
        }
    }
}

impl std::error::Error for FilterError {}

impl From<MalformedInput> for FilterError {
    fn from(err: MalformedInput) -> Self {
        Self::MalformedInput(err)
    }
}

/// An error tied to the item and path it arose from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemError {
    /// Index of the item in the content slice, `None` for pass-level errors.
    pub index: Option<usize>,
    /// Dot-joined path being resolved, if any.
    pub path: Option<String>,
    pub error: FilterError,
}

impl fmt::Display for ItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.index, &self.path) {
            (Some(index), Some(path)) => write!(f, "item {index}, path {path:?}: {}", self.error),
            (Some(index), None) => write!(f, "item {index}: {}", self.error),
            (None, _) => write!(f, "{}", self.error),
        }
    }
}

impl std::error::Error for ItemError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
