#![forbid(unsafe_code)]

//! The filter pass.
//!
//! [`FilterEngine`] is built once from a raw property spec and a raw query and
//! can then be applied to any number of content slices. Building is
//! infallible: a query that does not compile simply matches nothing, and the
//! reason is carried in every [`FilterReport`].
//!
//! # Invariants
//!
//! 1. Empty paths, empty query or empty content return the content as-is.
//! 2. Accepted items keep their original relative order.
//! 3. An error in one item never affects another item.
//! 4. Applying the same engine to its own output returns that output.

use serde::Serialize;
use tracing::{debug, debug_span, trace, warn};

use crate::config::FilterConfig;
use crate::error::{FilterError, ItemError, MalformedInput};
use crate::item::Item;
use crate::matcher::Matcher;
use crate::normalize::{PropertyPath, normalize, normalize_query};
use crate::resolve::Resolver;

#[derive(Debug, Clone)]
enum Plan {
    /// Nothing to filter on; every item passes.
    Passthrough,
    Search(Matcher),
    /// The query could not be compiled; no item can pass.
    Unmatchable(FilterError),
}

/// Outcome of a filter pass with every error that was contained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterReport {
    /// Indices of accepted items, ascending.
    pub indices: Vec<usize>,
    pub errors: Vec<ItemError>,
}

impl FilterReport {
    /// Borrow the accepted items out of the slice the pass ran over.
    #[must_use]
    pub fn items<'a, T>(&self, content: &'a [T]) -> Vec<&'a T> {
        self.indices.iter().filter_map(|&i| content.get(i)).collect()
    }

    /// `true` when no error of any kind was recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors that are not soft, e.g. recursion-limit failures.
    pub fn hard_errors(&self) -> impl Iterator<Item = &ItemError> {
        self.errors.iter().filter(|e| !e.error.is_soft())
    }
}

/// A reusable, compiled filter.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    paths: Vec<PropertyPath>,
    query: String,
    plan: Plan,
    config: FilterConfig,
}

impl FilterEngine {
    /// Build from a raw property spec and raw query with default settings.
    #[must_use]
    pub fn new(properties: &str, query: &str) -> Self {
        Self::with_config(properties, query, FilterConfig::default())
    }

    #[must_use]
    pub fn with_config(properties: &str, query: &str, config: FilterConfig) -> Self {
        let paths = normalize(properties);
        let query = normalize_query(query);
        let plan = if paths.is_empty() || query.is_empty() {
            Plan::Passthrough
        } else {
            match Matcher::with_escape(&query, config.escape_query) {
                Ok(matcher) => Plan::Search(matcher),
                Err(err) => {
                    warn!(%err, "query does not compile, nothing will match");
                    Plan::Unmatchable(err)
                }
            }
        };
        Self {
            paths,
            query,
            plan,
            config,
        }
    }

    #[must_use]
    pub fn paths(&self) -> &[PropertyPath] {
        &self.paths
    }

    /// The query after backslash stripping.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Whether every item passes regardless of content.
    #[must_use]
    pub fn is_passthrough(&self) -> bool {
        matches!(self.plan, Plan::Passthrough)
    }

    /// Accepted items, in order.
    #[must_use]
    pub fn filter<'a, T: Item>(&self, content: &'a [T]) -> Vec<&'a T> {
        self.filter_with_report(content).items(content)
    }

    /// Indices of accepted items, ascending.
    #[must_use]
    pub fn filter_indices<T: Item>(&self, content: &[T]) -> Vec<usize> {
        self.filter_with_report(content).indices
    }

    /// Run a pass and keep every contained error.
    #[must_use]
    pub fn filter_with_report<T: Item>(&self, content: &[T]) -> FilterReport {
        self.run(content.iter().enumerate(), content.len())
    }

    /// Filter any serializable content by converting each item to JSON.
    ///
    /// Items that fail to convert are excluded and reported as soft errors.
    #[must_use]
    pub fn filter_serialize_with_report<T: Serialize>(&self, content: &[T]) -> FilterReport {
        if content.is_empty() || self.is_passthrough() {
            return FilterReport {
                indices: (0..content.len()).collect(),
                errors: Vec::new(),
            };
        }

        let mut errors = Vec::new();
        let mut converted = Vec::with_capacity(content.len());
        for (index, item) in content.iter().enumerate() {
            match serde_json::to_value(item) {
                Ok(value) => converted.push((index, value)),
                Err(err) => {
                    let error = FilterError::from(MalformedInput::Conversion {
                        message: err.to_string(),
                    });
                    debug!(index, %error, "item skipped");
                    errors.push(ItemError {
                        index: Some(index),
                        path: None,
                        error,
                    });
                }
            }
        }

        let mut report = self.run(
            converted.iter().map(|(index, value)| (*index, value)),
            converted.len(),
        );
        errors.append(&mut report.errors);
        report.errors = errors;
        report
    }

    fn run<'a, T, I>(&self, items: I, len: usize) -> FilterReport
    where
        T: Item + ?Sized + 'a,
        I: IntoIterator<Item = (usize, &'a T)>,
    {
        let _span = debug_span!(
            "ftui.filter.pass",
            items = len,
            paths = self.paths.len()
        )
        .entered();

        let mut report = FilterReport::default();
        match &self.plan {
            _ if len == 0 => {}
            Plan::Passthrough => report.indices = items.into_iter().map(|(i, _)| i).collect(),
            Plan::Unmatchable(err) => report.errors.push(ItemError {
                index: None,
                path: None,
                error: err.clone(),
            }),
            Plan::Search(matcher) => {
                for (index, item) in items {
                    if self.accepts(index, item, matcher, &mut report.errors) {
                        trace!(index, "item accepted");
                        report.indices.push(index);
                    }
                }
            }
        }

        debug!(
            accepted = report.indices.len(),
            errors = report.errors.len(),
            "filter pass complete"
        );
        report
    }

    fn accepts<T: Item + ?Sized>(
        &self,
        index: usize,
        item: &T,
        matcher: &Matcher,
        errors: &mut Vec<ItemError>,
    ) -> bool {
        let resolver = Resolver::new(&self.config);
        for path in &self.paths {
            match resolver.resolve(item, path) {
                Ok(values) => {
                    if values.into_iter().any(|v| matcher.matches(v)) {
                        return true;
                    }
                }
                Err(error) => {
                    if error.is_soft() {
                        debug!(index, %path, %error, "path skipped");
                    } else {
                        warn!(index, %path, %error, "path resolution aborted");
                    }
                    errors.push(ItemError {
                        index: Some(index),
                        path: Some(path.to_string()),
                        error,
                    });
                }
            }
        }
        false
    }
}

/// Filter `content` by `query` over the paths named in `properties`.
///
/// # Example
/// ```
/// use serde_json::json;
///
/// let content = vec![json!({"tags": ["red", "blue"]}), json!({"tags": ["green"]})];
/// let hits = ftui_filter::filter(&content, "tags.@each", "red");
/// assert_eq!(hits, [&content[0]]);
/// ```
#[must_use]
pub fn filter<'a, T: Item>(content: &'a [T], properties: &str, query: &str) -> Vec<&'a T> {
    FilterEngine::new(properties, query).filter(content)
}

/// Like [`filter`], for any `Serialize` content.
#[must_use]
pub fn filter_serialize<'a, T: Serialize>(
    content: &'a [T],
    properties: &str,
    query: &str,
) -> Vec<&'a T> {
    FilterEngine::new(properties, query)
        .filter_serialize_with_report(content)
        .items(content)
}
