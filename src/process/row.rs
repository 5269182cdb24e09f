// src/process/row.rs
use serde::Serialize;

use super::header::ColumnMap;
use super::tabular::RawRow;
use super::utils::cell;

/// One sheet row, trimmed and keyed by meaning. Values stay as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricRecord {
    pub platform: String,
    pub label: String,
    pub value: String,
    pub secondary_label: String,
    pub secondary_value: String,
    pub last_updated: String,
}

impl MetricRecord {
    /// True when platform, label and value are all empty.
    pub fn is_blank(&self) -> bool {
        self.platform.is_empty() && self.label.is_empty() && self.value.is_empty()
    }
}

fn optional(row: &RawRow, idx: Option<usize>) -> String {
    idx.map(|i| cell(row, i).trim().to_string())
        .unwrap_or_default()
}

/// Extract a record from `row` using `map`.
///
/// Footer rows are sometimes exported without the leading blank column the
/// header carries, so a blank platform cell falls back to column 0.
pub fn map_row(row: &RawRow, map: &ColumnMap) -> MetricRecord {
    let mut platform = cell(row, map.platform).trim();
    if platform.is_empty() {
        platform = cell(row, 0).trim();
    }

    MetricRecord {
        platform: platform.to_string(),
        label: cell(row, map.label).trim().to_string(),
        value: cell(row, map.value).trim().to_string(),
        secondary_label: optional(row, map.secondary_label),
        secondary_value: optional(row, map.secondary_value),
        last_updated: optional(row, map.last_updated),
    }
}

/// Map every data row under `map`, dropping blank records.
pub fn map_rows(rows: &[RawRow], map: &ColumnMap) -> Vec<MetricRecord> {
    map.data_rows(rows)
        .iter()
        .map(|r| map_row(r, map))
        .filter(|rec| !rec.is_blank())
        .collect()
}
