#![forbid(unsafe_code)]

//! Property-path query filtering for FrankenTUI list widgets.
//!
//! Given content, a free-form property spec such as `"name tags.@each"` and a
//! query, return the items where any value reachable through any of the paths
//! contains the query.
//!
//! ```
//! use serde_json::json;
//!
//! let content = vec![
//!     json!({"name": "Ada", "tags": ["math", "engines"]}),
//!     json!({"name": "Grace", "tags": ["navy", "compilers"]}),
//! ];
//! let hits = ftui_filter::filter(&content, "name tags.@each", "eng");
//! assert_eq!(hits, [&content[0]]);
//! ```
//!
//! The query is a regular expression; set [`FilterConfig::escape_query`] to
//! treat it as literal text.

pub mod config;
pub mod engine;
pub mod error;
pub mod item;
pub mod matcher;
pub mod normalize;
pub mod resolve;
pub mod view;

pub use config::{FilterConfig, FilterConfigError};
pub use engine::{FilterEngine, FilterReport, filter, filter_serialize};
pub use error::{FilterError, ItemError, MalformedInput};
pub use item::{Item, Scalar};
pub use matcher::{Matcher, matches};
pub use normalize::{PropertyPath, normalize, normalize_query};
pub use resolve::{Resolver, resolve};
pub use view::FilteredView;
