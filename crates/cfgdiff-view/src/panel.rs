//! Per-side projection of a diff result.
//!
//! Each record may appear on the left (old value), the right (new value), or
//! both. Row numbers are positions in the full diff so the two panels line up.

use cfgdiff_core::{DiffRecord, DiffStatus, Side};
use serde::Serialize;

use crate::config::ViewerConfig;

/// One visible line in a panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PanelRow {
    /// 1-based position of the record in the diff sequence.
    pub number: usize,
    pub key: String,
    pub value: String,
    pub status: DiffStatus,
    /// Theme color for `status`.
    pub background: String,
}

impl PanelRow {
    /// `"key: value"`, the text a renderer shows for this row.
    pub fn label(&self) -> String {
        format!("{}: {}", self.key, self.value)
    }
}

/// A titled list of rows for one side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub side: Side,
    pub title: String,
    pub rows: Vec<PanelRow>,
}

impl Panel {
    /// Project the records visible on `side`.
    ///
    /// Records whose value on this side is absent or empty produce no row,
    /// so a `null` leaf is hidden just like a missing key.
    pub fn project(records: &[DiffRecord], side: Side, config: &ViewerConfig) -> Self {
        let rows = records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                let value = record.value_for(side).filter(|v| !v.is_empty())?;
                Some(PanelRow {
                    number: index + 1,
                    key: record.key.clone(),
                    value: value.to_string(),
                    status: record.status,
                    background: config.theme.color_for(record.status).to_string(),
                })
            })
            .collect();

        Self {
            side,
            title: config.title_for(side).to_string(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Both panels of a side-by-side diff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SplitView {
    pub left: Panel,
    pub right: Panel,
}

impl SplitView {
    pub fn build(records: &[DiffRecord], config: &ViewerConfig) -> Self {
        Self {
            left: Panel::project(records, Side::Left, config),
            right: Panel::project(records, Side::Right, config),
        }
    }

    pub fn panel(&self, side: Side) -> &Panel {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}
