//! Diff records: the reconciled status of a single flattened key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a key across the old and new snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiffStatus {
    /// Present only in the new snapshot.
    Added,
    /// Present only in the old snapshot.
    Removed,
    /// Present in both with different serialized values.
    Changed,
    /// Present in both with equal serialized values.
    Unchanged,
}

impl DiffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "ADDED",
            Self::Removed => "REMOVED",
            Self::Changed => "CHANGED",
            Self::Unchanged => "UNCHANGED",
        }
    }
}

impl fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which snapshot a value belongs to when shown side by side.
///
/// The left side shows old values, the right side new values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// One row of comparison output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffRecord {
    /// Dotted path of the leaf, e.g. `"server.tls.enabled"`.
    pub key: String,
    pub status: DiffStatus,
    /// Serialized old value; `None` when the key was added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    /// Serialized new value; `None` when the key was removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
}

impl DiffRecord {
    pub fn added(key: impl Into<String>, new_value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            status: DiffStatus::Added,
            old_value: None,
            new_value: Some(new_value.into()),
        }
    }

    pub fn removed(key: impl Into<String>, old_value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            status: DiffStatus::Removed,
            old_value: Some(old_value.into()),
            new_value: None,
        }
    }

    pub fn changed(
        key: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            status: DiffStatus::Changed,
            old_value: Some(old_value.into()),
            new_value: Some(new_value.into()),
        }
    }

    pub fn unchanged(
        key: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            status: DiffStatus::Unchanged,
            old_value: Some(old_value.into()),
            new_value: Some(new_value.into()),
        }
    }

    /// The value shown on the given side, if the key exists there.
    pub fn value_for(&self, side: Side) -> Option<&str> {
        match side {
            Side::Left => self.old_value.as_deref(),
            Side::Right => self.new_value.as_deref(),
        }
    }
}

/// Per-status counts over a diff result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
    pub unchanged: usize,
}

impl DiffSummary {
    pub fn from_records(records: &[DiffRecord]) -> Self {
        records.iter().fold(Self::default(), |mut summary, record| {
            match record.status {
                DiffStatus::Added => summary.added += 1,
                DiffStatus::Removed => summary.removed += 1,
                DiffStatus::Changed => summary.changed += 1,
                DiffStatus::Unchanged => summary.unchanged += 1,
            }
            summary
        })
    }

    /// Total number of records counted.
    pub fn total(&self) -> usize {
        self.added + self.removed + self.changed + self.unchanged
    }

    /// Returns `true` if any record is not `Unchanged`.
    pub fn has_changes(&self) -> bool {
        self.added + self.removed + self.changed > 0
    }
}
