#![forbid(unsafe_code)]

//! Path resolution with one-level wildcard fan-out.
//!
//! Walking `owner.pets.@each.name` against an item looks up `owner`, then
//! `pets`, then iterates the pets and continues with `name` on each one. The
//! result is always flat, in element order.
//!
//! # Failure Modes
//!
//! - **Missing property**: contributes nothing, not an error.
//! - **Wildcard on a non-collection**: soft [`MalformedInput::NotIterable`].
//! - **Too deep**: [`FilterError::RecursionLimit`] once the walk passes
//!   `max_depth` levels. The whole resolution is abandoned.

use crate::config::{DEFAULT_MAX_DEPTH, DEFAULT_WILDCARD, FilterConfig};
use crate::error::{FilterError, MalformedInput};
use crate::item::Item;
use crate::normalize::PropertyPath;

/// Resolve `path` against `item` with the default depth limit and wildcard.
pub fn resolve<'a, T: Item + ?Sized>(
    item: &'a T,
    path: &PropertyPath,
) -> Result<Vec<&'a T>, FilterError> {
    Resolver::default().resolve(item, path)
}

/// Path walker parameterized by wildcard marker and depth limit.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'c> {
    wildcard: &'c str,
    max_depth: usize,
}

impl Default for Resolver<'static> {
    fn default() -> Self {
        Self {
            wildcard: DEFAULT_WILDCARD,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl<'c> Resolver<'c> {
    #[must_use]
    pub fn new(config: &'c FilterConfig) -> Self {
        Self {
            wildcard: &config.wildcard,
            max_depth: config.max_depth,
        }
    }

    /// Resolve a whole path starting at depth zero.
    pub fn resolve<'a, T: Item + ?Sized>(
        &self,
        item: &'a T,
        path: &PropertyPath,
    ) -> Result<Vec<&'a T>, FilterError> {
        self.resolve_from(item, path.segments(), 0)
    }

    /// Resolve `segments` against `item` as if already `depth` levels deep.
    pub fn resolve_from<'a, T: Item + ?Sized>(
        &self,
        item: &'a T,
        segments: &[String],
        depth: usize,
    ) -> Result<Vec<&'a T>, FilterError> {
        let mut out = Vec::new();
        self.walk(item, segments, depth, &mut out)?;
        Ok(out)
    }

    fn walk<'a, T: Item + ?Sized>(
        &self,
        item: &'a T,
        segments: &[String],
        depth: usize,
        out: &mut Vec<&'a T>,
    ) -> Result<(), FilterError> {
        if depth > self.max_depth {
            return Err(FilterError::RecursionLimit {
                depth,
                limit: self.max_depth,
            });
        }
        let Some((head, rest)) = segments.split_first() else {
            return Ok(());
        };

        if head == self.wildcard {
            let elements = item.elements().ok_or_else(|| MalformedInput::NotIterable {
                segment: head.clone(),
            })?;
            for element in elements {
                if rest.is_empty() {
                    out.push(element);
                } else {
                    self.walk(element, rest, depth + 1, out)?;
                }
            }
            return Ok(());
        }

        match item.property(head) {
            None => Ok(()),
            Some(value) if rest.is_empty() => {
                out.push(value);
                Ok(())
            }
            Some(value) => self.walk(value, rest, depth + 1, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use serde_json::{Value, json};

    fn path(raw: &str) -> PropertyPath {
        PropertyPath::parse(raw).unwrap()
    }

    #[test]
    fn plain_property() {
        let item = json!({"name": "ada"});
        assert_eq!(resolve(&item, &path("name")).unwrap(), [&json!("ada")]);
    }

    #[test]
    fn nested_property() {
        let item = json!({"owner": {"name": {"first": "grace"}}});
        assert_eq!(
            resolve(&item, &path("owner.name.first")).unwrap(),
            [&json!("grace")]
        );
    }

    #[test]
    fn missing_property_is_empty() {
        let item = json!({"x": 1});
        assert!(resolve(&item, &path("a.b.c")).unwrap().is_empty());
        assert!(resolve(&item, &path("x.y")).unwrap().is_empty());
    }

    #[test]
    fn non_scalar_leaf_is_returned_as_is() {
        let item = json!({"meta": {"k": "v"}});
        assert_eq!(resolve(&item, &path("meta")).unwrap(), [&json!({"k": "v"})]);
    }

    #[test]
    fn wildcard_at_end_yields_elements() {
        let item = json!({"tags": ["red", "blue"]});
        assert_eq!(
            resolve(&item, &path("tags.@each")).unwrap(),
            [&json!("red"), &json!("blue")]
        );
    }

    #[test]
    fn wildcard_then_property() {
        let item = json!({"pets": [{"name": "rex"}, {"age": 3}, {"name": "tom"}]});
        assert_eq!(
            resolve(&item, &path("pets.@each.name")).unwrap(),
            [&json!("rex"), &json!("tom")]
        );
    }

    #[test]
    fn nested_wildcards_flatten() {
        let item = json!({"groups": [{"ids": [1, 2]}, {"ids": []}, {"ids": [3]}]});
        let values = resolve(&item, &path("groups.@each.ids.@each")).unwrap();
        assert_eq!(values, [&json!(1), &json!(2), &json!(3)]);
    }

    #[test]
    fn wildcard_on_top_level_collection() {
        let item = json!(["a", "b"]);
        assert_eq!(resolve(&item, &path("@each")).unwrap().len(), 2);
    }

    #[test]
    fn wildcard_on_scalar_is_soft_error() {
        let item = json!({"tags": "red"});
        let err = resolve(&item, &path("tags.@each")).unwrap_err();
        assert!(err.is_soft());
        assert_eq!(
            err,
            FilterError::MalformedInput(MalformedInput::NotIterable {
                segment: "@each".into()
            })
        );
    }

    #[test]
    fn wildcard_on_missing_property_is_empty() {
        let item = json!({});
        assert!(resolve(&item, &path("tags.@each")).unwrap().is_empty());
    }

    #[test]
    fn index_segment() {
        let item = json!({"tags": ["red", "blue"]});
        assert_eq!(resolve(&item, &path("tags.1")).unwrap(), [&json!("blue")]);
    }

    #[test]
    fn empty_segments_yield_nothing() {
        let item = json!({"a": 1});
        assert!(Resolver::default().resolve_from(&item, &[], 0).unwrap().is_empty());
    }

    fn nested_arrays(levels: usize) -> Value {
        let mut value = json!("leaf");
        for _ in 0..levels {
            value = Value::Array(vec![value]);
        }
        value
    }

    fn each_path(levels: usize) -> PropertyPath {
        path(&vec!["@each"; levels].join("."))
    }

    #[test]
    fn deep_wildcards_within_limit() {
        let item = nested_arrays(101);
        let values = resolve(&item, &each_path(101)).unwrap();
        assert_eq!(values, [&json!("leaf")]);
    }

    #[test]
    fn recursion_limit_trips_past_one_hundred() {
        let item = nested_arrays(102);
        let err = resolve(&item, &each_path(102)).unwrap_err();
        assert_eq!(err, FilterError::RecursionLimit { depth: 101, limit: 100 });
        assert!(!err.is_soft());
    }

    #[test]
    fn starting_depth_counts() {
        let item = json!({"a": 1});
        let segments = path("a").segments().to_vec();
        let err = Resolver::default()
            .resolve_from(&item, &segments, 101)
            .unwrap_err();
        assert!(matches!(err, FilterError::RecursionLimit { depth: 101, .. }));
    }

    #[test]
    fn custom_wildcard_and_depth() {
        let config = FilterConfig::default().with_wildcard("@all").with_max_depth(1);
        let resolver = Resolver::new(&config);
        let item = json!({"tags": ["x", "y"]});
        assert_eq!(resolver.resolve(&item, &path("tags.@all")).unwrap().len(), 2);
        // `@each` is an ordinary property name under a custom wildcard.
        assert!(resolver.resolve(&item, &path("tags.@each")).unwrap().is_empty());

        let deep = json!({"a": {"b": {"c": 1}}});
        assert!(matches!(
            resolver.resolve(&deep, &path("a.b.c")),
            Err(FilterError::RecursionLimit { depth: 2, limit: 1 })
        ));
    }

    #[test]
    fn normalized_paths_resolve() {
        let item = json!({"first": {"name": "ada"}, "last": {"name": "lovelace"}});
        let values: Vec<&Value> = normalize("first.name last..name")
            .iter()
            .flat_map(|p| resolve(&item, p).unwrap())
            .collect();
        assert_eq!(values, [&json!("ada"), &json!("lovelace")]);
    }
}
