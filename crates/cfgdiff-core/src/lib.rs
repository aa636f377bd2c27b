//! Diff engine for configuration snapshots.
//!
//! Flattens nested JSON objects into dotted-path keys, reconciles the two key
//! spaces, and classifies every key as added, removed, changed, or unchanged.
//! Output is sorted with a Unicode collator so repeated runs are identical.
//!
//! # Key Types
//!
//! - [`FlatMapping`] -- Dotted-path view of a nested object
//! - [`Differ`] / [`diff_values`] -- Key reconciliation and classification
//! - [`DiffRecord`] / [`DiffStatus`] -- One reconciled key
//! - [`DiffSummary`] -- Per-status counts over a diff result
//! - [`KeyOrder`] -- Collation used to order records

pub mod collate;
pub mod diff;
pub mod error;
pub mod flatten;
pub mod record;
pub mod stringify;

pub use collate::KeyOrder;
pub use diff::{diff_values, Differ, ROOT_KEY};
pub use error::{DiffError, DiffResult};
pub use flatten::{flatten, FlatMapping};
pub use record::{DiffRecord, DiffStatus, DiffSummary, Side};
pub use stringify::stringify;
