#![forbid(unsafe_code)]

//! Query matching against resolved values.
//!
//! The query is compiled as a regular expression and searched for
//! (unanchored, case-sensitive) in the display form of a scalar candidate.
//! Metacharacters typed by the user keep their pattern meaning unless the
//! matcher is built with escaping enabled.
//!
//! # Example
//! ```
//! use ftui_filter::matcher::Matcher;
//! use serde_json::json;
//!
//! let m = Matcher::new("re.").unwrap();
//! assert!(m.matches(&json!("tired")));
//! assert!(!m.matches(&json!("Red")));
//! ```

use regex::Regex;

use crate::error::{FilterError, MalformedInput};
use crate::item::{Item, Scalar};

/// A compiled query.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    /// Compile `query` verbatim as a pattern.
    pub fn new(query: &str) -> Result<Self, FilterError> {
        Self::with_escape(query, false)
    }

    /// Compile `query`, escaping it first when `escape` is set.
    pub fn with_escape(query: &str, escape: bool) -> Result<Self, FilterError> {
        let pattern = if escape {
            regex::escape(query)
        } else {
            query.to_owned()
        };
        let regex = Regex::new(&pattern).map_err(|err| MalformedInput::InvalidPattern {
            pattern: query.to_owned(),
            message: err.to_string(),
        })?;
        Ok(Self { regex })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether a candidate value contains the query.
    ///
    /// Only boolean, number and string candidates can match.
    #[must_use]
    pub fn matches<T: Item + ?Sized>(&self, candidate: &T) -> bool {
        candidate
            .scalar()
            .is_some_and(|scalar| self.matches_scalar(scalar))
    }

    #[must_use]
    pub fn matches_scalar(&self, scalar: Scalar<'_>) -> bool {
        match scalar {
            Scalar::Str(s) => self.regex.is_match(s),
            other => self.regex.is_match(&other.to_string()),
        }
    }
}

/// One-shot match. An uncompilable query never matches.
#[must_use]
pub fn matches<T: Item + ?Sized>(candidate: &T, query: &str) -> bool {
    match Matcher::new(query) {
        Ok(matcher) => matcher.matches(candidate),
        Err(err) => {
            tracing::debug!(%err, "query rejected, treating as no match");
            false
        }
    }
}
