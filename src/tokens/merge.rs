//! Additive deep merge and tree inspection helpers.
//!
//! A node is a token leaf when it is an object carrying the `$type` marker.
//! Every other object is a group. Arrays and scalars are leaves too, so they
//! are never merged into.

use serde_json::{Map, Value};

use super::nested::entry_segments;
use super::Document;

/// Marker key that identifies a token leaf.
pub const TYPE_MARKER: &str = "$type";

/// Returns true if `value` is a token leaf.
pub fn is_token(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.contains_key(TYPE_MARKER))
}

/// Returns the group mapping if `value` is a group (an object without the marker).
fn as_group(value: &Value) -> Option<&Map<String, Value>> {
    value.as_object().filter(|obj| !obj.contains_key(TYPE_MARKER))
}

/// Deep-merges `source` into `target`, returning a new document.
///
/// Groups present on both sides are merged recursively. Keys missing from
/// `target` are inserted. Keys already present in `target` are kept as they
/// are whenever either side is a leaf: existing values are never overwritten.
pub fn merge(target: &Document, source: &Document) -> Document {
    let mut result = target.clone();

    for (key, source_val) in source {
        let merged = match (result.get(key), source_val) {
            (Some(target_val), source_val) => match (as_group(target_val), as_group(source_val)) {
                (Some(t), Some(s)) => Some(Value::Object(merge(t, s))),
                _ => None,
            },
            (None, source_val) => Some(source_val.clone()),
        };

        if let Some(value) = merged {
            result.insert(key.clone(), value);
        }
    }

    result
}

/// Returns true if `domain.name` already resolves in the Language document.
///
/// Each segment must be a member of the object reached by the previous one.
/// The final value may be anything; its presence alone occupies the path.
pub fn entry_exists(language: &Document, domain: &str, name: &str) -> bool {
    let mut current = Some(language);
    for segment in entry_segments(domain, name) {
        let Some(obj) = current else {
            return false;
        };
        match obj.get(segment) {
            Some(next) => current = next.as_object(),
            None => return false,
        }
    }
    true
}

/// Counts token leaves in a tree.
pub fn count_tokens(tree: &Document) -> usize {
    tree.values()
        .map(|value| {
            if is_token(value) {
                1
            } else if let Some(group) = value.as_object() {
                count_tokens(group)
            } else {
                0
            }
        })
        .sum()
}

/// Flattens a tree to `(dot.path, $value)` pairs in document order.
pub fn flatten(tree: &Document) -> Vec<(String, String)> {
    let mut out = Vec::new();
    flatten_into(tree, "", &mut out);
    out
}

fn flatten_into(tree: &Document, prefix: &str, out: &mut Vec<(String, String)>) {
    for (key, value) in tree {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        if is_token(value) {
            let token_value = match value.get("$value") {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            };
            out.push((path, token_value));
        } else if let Some(group) = value.as_object() {
            flatten_into(group, &path, out);
        }
    }
}

/// Resolves a dot-separated path against a document.
pub fn lookup<'a>(doc: &'a Document, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = doc.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Extracts `a.b.c` from a `{a.b.c}` reference value.
pub fn reference_target(value: &str) -> Option<&str> {
    value.strip_prefix('{')?.strip_suffix('}')
}
