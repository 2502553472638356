#![forbid(unsafe_code)]

//! Cached filter result with manual invalidation.
//!
//! A list widget keeps one [`FilteredView`] next to its content. Changing the
//! query or the property spec marks the view dirty; so does a change in
//! content length. Content edits that keep the length must be signalled with
//! [`FilteredView::invalidate`]. [`FilteredView::refresh`] recomputes only
//! when something is dirty and bumps [`FilteredView::generation`] each time
//! it does.
//!
//! Debouncing is up to the caller: call `set_query` on every keystroke and
//! `refresh` whenever the widget decides it is time.

use tracing::debug;

use crate::config::FilterConfig;
use crate::engine::FilterEngine;
use crate::error::ItemError;
use crate::item::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MissReason {
    Empty,
    Dirty,
    LengthChanged,
}

/// Caller-owned cache of the last filter pass.
#[derive(Debug, Clone)]
pub struct FilteredView {
    properties: String,
    query: String,
    config: FilterConfig,
    engine: Option<FilterEngine>,
    indices: Vec<usize>,
    errors: Vec<ItemError>,
    last_len: Option<usize>,
    dirty: bool,
    generation: u64,
}

impl Default for FilteredView {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl FilteredView {
    #[must_use]
    pub fn new(properties: impl Into<String>, query: impl Into<String>) -> Self {
        Self::with_config(properties, query, FilterConfig::default())
    }

    #[must_use]
    pub fn with_config(
        properties: impl Into<String>,
        query: impl Into<String>,
        config: FilterConfig,
    ) -> Self {
        Self {
            properties: properties.into(),
            query: query.into(),
            config,
            engine: None,
            indices: Vec::new(),
            errors: Vec::new(),
            last_len: None,
            dirty: true,
            generation: 0,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn properties(&self) -> &str {
        &self.properties
    }

    /// Replace the query. Returns `true` if it changed.
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if query == self.query {
            return false;
        }
        self.query = query;
        self.engine = None;
        self.dirty = true;
        true
    }

    /// Replace the property spec. Returns `true` if it changed.
    pub fn set_properties(&mut self, properties: impl Into<String>) -> bool {
        let properties = properties.into();
        if properties == self.properties {
            return false;
        }
        self.properties = properties;
        self.engine = None;
        self.dirty = true;
        true
    }

    /// Force the next [`refresh`](Self::refresh) to recompute.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of completed recomputations.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Recompute if stale. Returns `true` if a new pass ran.
    pub fn refresh<T: Item>(&mut self, content: &[T]) -> bool {
        let Some(reason) = self.miss_reason(content.len()) else {
            return false;
        };
        debug!(?reason, generation = self.generation, "filtered view recompute");

        let engine = self.engine.get_or_insert_with(|| {
            FilterEngine::with_config(&self.properties, &self.query, self.config.clone())
        });
        let report = engine.filter_with_report(content);
        self.indices = report.indices;
        self.errors = report.errors;
        self.last_len = Some(content.len());
        self.dirty = false;
        self.generation += 1;
        true
    }

    /// Indices into the content of the last refresh.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Errors contained during the last refresh.
    #[must_use]
    pub fn errors(&self) -> &[ItemError] {
        &self.errors
    }

    /// Borrow the visible items from `content`.
    ///
    /// Indices that fall outside `content` are skipped.
    #[must_use]
    pub fn visible<'a, T>(&self, content: &'a [T]) -> Vec<&'a T> {
        self.indices.iter().filter_map(|&i| content.get(i)).collect()
    }

    fn miss_reason(&self, len: usize) -> Option<MissReason> {
        match self.last_len {
            None => Some(MissReason::Empty),
            _ if self.dirty => Some(MissReason::Dirty),
            Some(last) if last != len => Some(MissReason::LengthChanged),
            Some(_) => None,
        }
    }
}
