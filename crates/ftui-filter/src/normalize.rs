#![forbid(unsafe_code)]

//! Normalization of user-authored property specs and queries.
//!
//! A property spec is free text such as `"first.name, last..name tags.@each"`.
//! Normalization turns it into an ordered list of [`PropertyPath`]s:
//!
//! 1. Drop every character that is not an ASCII word character, whitespace,
//!    `@`, `.` or `-`.
//! 2. Collapse runs of periods.
//! 3. Merge `. `-style separators (optional period, whitespace, optional
//!    period) into a single space.
//! 4. Split on whitespace, then split each path on periods.
//!
//! Empty segments and empty paths never survive.
//!
//! # Example
//! ```
//! use ftui_filter::normalize::normalize;
//!
//! let paths = normalize("first.name  last..name");
//! let rendered: Vec<String> = paths.iter().map(ToString::to_string).collect();
//! assert_eq!(rendered, ["first.name", "last.name"]);
//! ```

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use smallvec::SmallVec;

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_\s@.\-]").expect("disallowed chars regex"))
}

fn period_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.{2,}").expect("period runs regex"))
}

fn separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.?\s\.?").expect("separator regex"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"))
}

/// A cleaned, dot-notated property path.
///
/// # Invariants
///
/// 1. At least one segment.
/// 2. No segment is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    segments: SmallVec<[String; 4]>,
}

impl PropertyPath {
    /// Split a raw path on runs of periods.
    ///
    /// Returns `None` when nothing but periods remain.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let segments: SmallVec<[String; 4]> = raw
            .split('.')
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

/// Normalize a free-form property spec into ordered paths.
#[must_use]
pub fn normalize(raw: &str) -> Vec<PropertyPath> {
    if raw.is_empty() {
        return Vec::new();
    }

    let cleaned = disallowed_chars().replace_all(raw, "");
    let collapsed = period_runs().replace_all(&cleaned, ".");
    let separated = separators().replace_all(&collapsed, " ");

    whitespace_runs()
        .split(&separated)
        .filter(|s| !s.is_empty())
        .filter_map(PropertyPath::parse)
        .collect()
}

/// Strip every backslash from a query.
#[must_use]
pub fn normalize_query(raw: &str) -> String {
    raw.replace('\\', "")
}
