//! Flattening of nested objects into dotted-path leaf entries.
//!
//! Nested objects are walked recursively; every other value (scalars, `null`,
//! arrays) becomes a single leaf. Arrays are never descended into.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Dotted-path view of a nested object, borrowing its leaves.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlatMapping<'a> {
    entries: BTreeMap<String, &'a Value>,
}

impl<'a> FlatMapping<'a> {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of leaf entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no leaf entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.entries.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> btree_map::Keys<'_, String, &'a Value> {
        self.entries.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, &'a Value> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for FlatMapping<'a> {
    type Item = (String, &'a Value);
    type IntoIter = btree_map::IntoIter<String, &'a Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Flatten an object into dotted-path leaf entries.
///
/// `{"a": {"b": 1}, "c": [1, 2]}` becomes `{"a.b": 1, "c": [1, 2]}`. Empty
/// nested objects contribute no entries. If a literal dotted key collides with
/// a nested path, the entry written last in iteration order wins.
pub fn flatten(object: &Map<String, Value>) -> FlatMapping<'_> {
    let mut entries = BTreeMap::new();
    flatten_into(object, "", &mut entries);
    FlatMapping { entries }
}

fn flatten_into<'a>(
    object: &'a Map<String, Value>,
    prefix: &str,
    entries: &mut BTreeMap<String, &'a Value>,
) {
    for (key, value) in object {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(nested) => flatten_into(nested, &path, entries),
            leaf => {
                entries.insert(path, leaf);
            }
        }
    }
}
