//! Reconciliation of two snapshots into ordered diff records.
//!
//! Only a pair of objects yields a per-key breakdown. Any other pair of
//! values collapses into at most one `root` record.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::{debug, warn};

use crate::collate::KeyOrder;
use crate::error::DiffResult;
use crate::flatten::{flatten, FlatMapping};
use crate::record::{DiffRecord, DiffSummary};
use crate::stringify::stringify;

/// Key reported when the inputs are not both objects.
pub const ROOT_KEY: &str = "root";

thread_local! {
    static DIFFER: Differ = Differ::new().unwrap_or_else(|err| {
        warn!(error = %err, "collator unavailable; ordering keys by code point");
        Differ::with_order(KeyOrder::CodePoint)
    });
}

/// Computes diffs with a fixed key ordering.
#[derive(Debug)]
pub struct Differ {
    order: KeyOrder,
}

impl Differ {
    /// Create a differ that orders keys with the Unicode collator.
    pub fn new() -> DiffResult<Self> {
        Ok(Self::with_order(KeyOrder::collated()?))
    }

    pub fn with_order(order: KeyOrder) -> Self {
        Self { order }
    }

    pub fn order(&self) -> &KeyOrder {
        &self.order
    }

    /// Compare `new` against `old`.
    ///
    /// Note the argument order: the new snapshot comes first.
    pub fn diff(&self, new: &Value, old: &Value) -> Vec<DiffRecord> {
        let (new_obj, old_obj) = match (new, old) {
            (Value::Object(n), Value::Object(o)) => (n, o),
            _ => return diff_root(new, old),
        };

        let flat_new = flatten(new_obj);
        let flat_old = flatten(old_obj);
        let mut records = reconcile(&flat_new, &flat_old);
        records.sort_by(|a, b| self.order.compare(&a.key, &b.key));

        let summary = DiffSummary::from_records(&records);
        debug!(
            keys = records.len(),
            added = summary.added,
            removed = summary.removed,
            changed = summary.changed,
            "diff computed"
        );
        records
    }
}

/// Compare `new` against `old` using this thread's shared [`Differ`].
pub fn diff_values(new: &Value, old: &Value) -> Vec<DiffRecord> {
    DIFFER.with(|differ| differ.diff(new, old))
}

fn diff_root(new: &Value, old: &Value) -> Vec<DiffRecord> {
    let old_text = stringify(old);
    let new_text = stringify(new);
    if old_text == new_text {
        return Vec::new();
    }
    vec![DiffRecord::changed(ROOT_KEY, old_text, new_text)]
}

fn reconcile(flat_new: &FlatMapping<'_>, flat_old: &FlatMapping<'_>) -> Vec<DiffRecord> {
    let all_keys: BTreeSet<&str> = flat_new
        .keys()
        .chain(flat_old.keys())
        .map(String::as_str)
        .collect();

    all_keys
        .into_iter()
        .filter_map(|key| {
            let record = match (flat_old.get(key), flat_new.get(key)) {
                (None, Some(new_val)) => DiffRecord::added(key, stringify(new_val)),
                (Some(old_val), None) => DiffRecord::removed(key, stringify(old_val)),
                (Some(old_val), Some(new_val)) => {
                    let old_text = stringify(old_val);
                    let new_text = stringify(new_val);
                    if old_text == new_text {
                        DiffRecord::unchanged(key, old_text, new_text)
                    } else {
                        DiffRecord::changed(key, old_text, new_text)
                    }
                }
                (None, None) => return None,
            };
            Some(record)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DiffStatus;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn identical_objects_are_all_unchanged() {
        let diff = diff_values(&json!({"x": 1}), &json!({"x": 1}));
        assert_eq!(diff, vec![DiffRecord::unchanged("x", "1", "1")]);
    }

    #[test]
    fn nested_value_change() {
        let diff = diff_values(&json!({"a": {"b": 2}}), &json!({"a": {"b": 1}}));
        assert_eq!(diff, vec![DiffRecord::changed("a.b", "1", "2")]);
    }

    #[test]
    fn key_added() {
        let diff = diff_values(&json!({"a": 1, "b": 2}), &json!({"a": 1}));
        assert_eq!(
            diff,
            vec![
                DiffRecord::unchanged("a", "1", "1"),
                DiffRecord::added("b", "2"),
            ]
        );
    }

    #[test]
    fn key_removed() {
        let diff = diff_values(&json!({"a": 1}), &json!({"a": 1, "b": 2}));
        assert_eq!(
            diff,
            vec![
                DiffRecord::unchanged("a", "1", "1"),
                DiffRecord::removed("b", "2"),
            ]
        );
    }

    #[test]
    fn equal_scalars_yield_nothing() {
        assert!(diff_values(&json!(5), &json!(5)).is_empty());
    }

    #[test]
    fn differing_scalars_collapse_to_root() {
        let diff = diff_values(&json!(5), &json!(6));
        assert_eq!(diff, vec![DiffRecord::changed("root", "6", "5")]);
    }

    #[test]
    fn null_against_object_collapses_to_root() {
        let diff = diff_values(&Value::Null, &json!({"a": 1}));
        assert_eq!(diff, vec![DiffRecord::changed("root", r#"{"a":1}"#, "")]);
    }

    #[test]
    fn differing_arrays_at_top_level_are_opaque() {
        let diff = diff_values(&json!([1, 2]), &json!([1, 2, 3]));
        assert_eq!(diff, vec![DiffRecord::changed("root", "[1,2,3]", "[1,2]")]);
    }

    #[test]
    fn object_against_array_collapses_to_root() {
        let diff = diff_values(&json!([1]), &json!({"a": 1}));
        assert_eq!(diff, vec![DiffRecord::changed("root", r#"{"a":1}"#, "[1]")]);
    }

    #[test]
    fn object_against_scalar_collapses_to_root() {
        let diff = diff_values(&json!({"a": 1}), &json!("a"));
        assert_eq!(diff, vec![DiffRecord::changed("root", "a", r#"{"a":1}"#)]);
    }

    #[test]
    fn array_objects_keep_source_key_order() {
        let new: Value = serde_json::from_str(r#"{"l":[{"z":1,"a":2}]}"#).unwrap();
        let old: Value = serde_json::from_str(r#"{"l":[{"a":2,"z":1}]}"#).unwrap();
        let diff = diff_values(&new, &old);
        assert_eq!(
            diff,
            vec![DiffRecord::changed("l", r#"[{"a":2,"z":1}]"#, r#"[{"z":1,"a":2}]"#)]
        );
    }

    #[test]
    fn nested_path_written_after_dotted_key_wins() {
        let value: Value = serde_json::from_str(r#"{"a.b":1,"a":{"b":2}}"#).unwrap();
        let diff = diff_values(&value, &json!({}));
        assert_eq!(diff, vec![DiffRecord::added("a.b", "2")]);
    }

    #[test]
    fn array_leaf_changes_render_as_json() {
        let diff = diff_values(&json!({"a": [1, 2]}), &json!({"a": [1, 2, 3]}));
        assert_eq!(diff, vec![DiffRecord::changed("a", "[1,2,3]", "[1,2]")]);
    }

    #[test]
    fn string_and_number_with_same_text_are_unchanged() {
        let diff = diff_values(&json!({"port": "8080"}), &json!({"port": 8080}));
        assert_eq!(diff[0].status, DiffStatus::Unchanged);
    }

    #[test]
    fn null_leaf_and_empty_string_compare_equal() {
        let diff = diff_values(&json!({"a": null}), &json!({"a": ""}));
        assert_eq!(diff, vec![DiffRecord::unchanged("a", "", "")]);
    }

    #[test]
    fn object_replaced_by_scalar() {
        let diff = diff_values(&json!({"a": 1}), &json!({"a": {"b": 1, "c": 2}}));
        assert_eq!(
            diff,
            vec![
                DiffRecord::added("a", "1"),
                DiffRecord::removed("a.b", "1"),
                DiffRecord::removed("a.c", "2"),
            ]
        );
    }

    #[test]
    fn records_are_collated_not_bytewise() {
        let new = json!({"b": 1, "B": 1, "a": 1, "Ä": 1});
        let keys: Vec<String> = diff_values(&new, &new).into_iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["a", "Ä", "b", "B"]);
    }

    #[test]
    fn code_point_differ_sorts_bytewise() {
        let differ = Differ::with_order(KeyOrder::CodePoint);
        let new = json!({"b": 1, "B": 1, "a": 1});
        let keys: Vec<String> = differ.diff(&new, &new).into_iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["B", "a", "b"]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let new = json!({"z": [1], "m": {"n": true}, "a": "x"});
        let old = json!({"m": {"n": false}, "q": null});
        assert_eq!(diff_values(&new, &old), diff_values(&new, &old));
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i32>().prop_map(Value::from),
            "[a-zA-Z0-9 ]{0,6}".prop_map(Value::from),
        ];
        leaf.prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
                prop::collection::btree_map("[a-dA-D]{1,3}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    fn arb_object() -> impl Strategy<Value = Value> {
        prop::collection::btree_map("[a-dA-D]{1,3}", arb_json(), 0..5)
            .prop_map(|m| Value::Object(m.into_iter().collect()))
    }

    fn flat_keys(value: &Value) -> BTreeSet<String> {
        match value {
            Value::Object(map) => flatten(map).keys().cloned().collect(),
            _ => BTreeSet::new(),
        }
    }

    proptest! {
        #[test]
        fn self_diff_is_empty_or_unchanged(value in arb_json()) {
            let diff = diff_values(&value, &value);
            if value.is_object() {
                prop_assert!(diff.iter().all(|r| r.status == DiffStatus::Unchanged));
            } else {
                prop_assert!(diff.is_empty());
            }
        }

        #[test]
        fn keys_are_union_of_flattened_paths(new in arb_object(), old in arb_object()) {
            let diff = diff_values(&new, &old);
            let got: BTreeSet<String> = diff.iter().map(|r| r.key.clone()).collect();
            let want: BTreeSet<String> = flat_keys(&new).union(&flat_keys(&old)).cloned().collect();
            prop_assert_eq!(got.len(), diff.len());
            prop_assert_eq!(got, want);
        }

        #[test]
        fn keys_strictly_increase(new in arb_object(), old in arb_object()) {
            let differ = Differ::new().unwrap();
            let diff = differ.diff(&new, &old);
            for pair in diff.windows(2) {
                prop_assert_eq!(
                    differ.order().compare(&pair[0].key, &pair[1].key),
                    std::cmp::Ordering::Less
                );
            }
        }

        #[test]
        fn status_matches_presence_and_equality(new in arb_object(), old in arb_object()) {
            let (Value::Object(n), Value::Object(o)) = (&new, &old) else { unreachable!() };
            let flat_new = flatten(n);
            let flat_old = flatten(o);
            for record in diff_values(&new, &old) {
                let expected = match (flat_old.get(&record.key), flat_new.get(&record.key)) {
                    (None, Some(_)) => DiffStatus::Added,
                    (Some(_), None) => DiffStatus::Removed,
                    (Some(a), Some(b)) if stringify(a) == stringify(b) => DiffStatus::Unchanged,
                    (Some(_), Some(_)) => DiffStatus::Changed,
                    (None, None) => unreachable!(),
                };
                prop_assert_eq!(record.status, expected);
            }
        }
    }
}
