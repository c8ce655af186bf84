//! Builds the nested group structure for a `domain.name` path.

use serde_json::{Map, Value};

use super::Document;

/// Wraps `leaf` in one group per domain segment plus one for `name`.
///
/// `nest("legal.copyright", "notice", v)` yields
/// `{"legal": {"copyright": {"notice": v}}}`. Segments are not validated.
pub fn nest(domain: &str, name: &str, leaf: Value) -> Document {
    let mut root = Map::new();
    root.insert(name.to_string(), leaf);

    for segment in domain.split('.').rev() {
        let mut outer = Map::new();
        outer.insert(segment.to_string(), Value::Object(root));
        root = outer;
    }

    root
}

/// Splits `domain` and `name` into the full list of path segments.
pub fn entry_segments<'a>(domain: &'a str, name: &'a str) -> Vec<&'a str> {
    domain.split('.').chain(std::iter::once(name)).collect()
}
