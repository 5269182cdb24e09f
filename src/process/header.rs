// src/process/header.rs
use tracing::{debug, trace};

use super::tabular::RawRow;
use super::utils::normalize_key;

/// Column positions used when no header row can be located.
pub const DEFAULT_PLATFORM: usize = 0;
pub const DEFAULT_LABEL: usize = 1;
pub const DEFAULT_VALUE: usize = 2;
pub const DEFAULT_SECONDARY_LABEL: usize = 3;
pub const DEFAULT_SECONDARY_VALUE: usize = 4;
pub const DEFAULT_LAST_UPDATED: usize = 5;

/// Resolved column assignment for a sheet.
///
/// The three required columns are plain indices, so a `ColumnMap` can only
/// exist once they have all been found. Optional columns are `None` when the
/// header does not name them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    /// Row holding the header; `None` for the positional fallback.
    pub header_row: Option<usize>,
    /// First row treated as data.
    pub data_start: usize,
    pub platform: usize,
    pub label: usize,
    pub value: usize,
    pub secondary_label: Option<usize>,
    pub secondary_value: Option<usize>,
    pub last_updated: Option<usize>,
}

impl ColumnMap {
    /// Fixed layout for sheets without a recognizable header: every row is data.
    pub fn positional() -> Self {
        Self {
            header_row: None,
            data_start: 0,
            platform: DEFAULT_PLATFORM,
            label: DEFAULT_LABEL,
            value: DEFAULT_VALUE,
            secondary_label: Some(DEFAULT_SECONDARY_LABEL),
            secondary_value: Some(DEFAULT_SECONDARY_VALUE),
            last_updated: Some(DEFAULT_LAST_UPDATED),
        }
    }

    /// Rows after the header (or all rows for the positional layout).
    pub fn data_rows<'a>(&self, rows: &'a [RawRow]) -> &'a [RawRow] {
        rows.get(self.data_start..).unwrap_or(&[])
    }

    /// Column scanned for "last updated" stamps.
    pub fn timestamp_column(&self) -> usize {
        self.last_updated.unwrap_or(DEFAULT_LAST_UPDATED)
    }
}

/// Locates the header row of a parsed sheet.
pub trait HeaderResolver {
    /// `None` means "no header found"; callers fall back to [`ColumnMap::positional`].
    fn resolve(&self, rows: &[RawRow]) -> Option<ColumnMap>;
}

/// Expected header cell text, compared against trimmed, lowercased cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLabels {
    pub platform: String,
    pub label: String,
    pub value: String,
    pub secondary_label: String,
    pub last_updated: String,
}

impl Default for HeaderLabels {
    fn default() -> Self {
        Self {
            platform: "platform name".into(),
            label: "main stat".into(),
            value: "number".into(),
            secondary_label: "secondary stat".into(),
            last_updated: "last updated".into(),
        }
    }
}

/// Top-down scan for the first row naming platform, label and value columns.
///
/// A repeated value label marks the secondary value column.
#[derive(Debug, Clone, Default)]
pub struct HeuristicHeaderResolver {
    labels: HeaderLabels,
}

impl HeuristicHeaderResolver {
    pub fn new(labels: HeaderLabels) -> Self {
        Self { labels }
    }

    fn match_row(&self, row_index: usize, row: &RawRow) -> Option<ColumnMap> {
        let normalized: Vec<String> = row.iter().map(|c| normalize_key(c)).collect();
        let position = |want: &str| normalized.iter().position(|c| c == want);

        let mut values = normalized
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == self.labels.value)
            .map(|(i, _)| i);

        let platform = position(self.labels.platform.as_str())?;
        let label = position(self.labels.label.as_str())?;
        let value = values.next()?;

        Some(ColumnMap {
            header_row: Some(row_index),
            data_start: row_index + 1,
            platform,
            label,
            value,
            secondary_label: position(self.labels.secondary_label.as_str()),
            secondary_value: values.next(),
            last_updated: position(self.labels.last_updated.as_str()),
        })
    }
}

impl HeaderResolver for HeuristicHeaderResolver {
    fn resolve(&self, rows: &[RawRow]) -> Option<ColumnMap> {
        let found = rows.iter().enumerate().find_map(|(i, row)| {
            trace!(row = i, cells = row.len(), "checking header candidate");
            self.match_row(i, row)
        });
        match &found {
            Some(map) => debug!(?map, "header row located"),
            None => debug!(rows = rows.len(), "no header row; using positional columns"),
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(raw: &[&[&str]]) -> Vec<RawRow> {
        raw.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn finds_header_after_preamble() {
        let sheet = rows(&[
            &["x"],
            &[
                "Platform Name",
                "Main Stat",
                "Number",
                "Number",
                "Secondary Stat",
                "Last Updated",
            ],
            &["IG", "Followers", "1234"],
        ]);
        let map = HeuristicHeaderResolver::default().resolve(&sheet).unwrap();
        assert_eq!(
            map,
            ColumnMap {
                header_row: Some(1),
                data_start: 2,
                platform: 0,
                label: 1,
                value: 2,
                secondary_label: Some(4),
                secondary_value: Some(3),
                last_updated: Some(5),
            }
        );
        assert_eq!(map.data_rows(&sheet).len(), 1);
    }

    #[test]
    fn tolerates_leading_blank_column_and_case() {
        let sheet = rows(&[&["", "  PLATFORM NAME ", "main stat", "number"]]);
        let map = HeuristicHeaderResolver::default().resolve(&sheet).unwrap();
        assert_eq!((map.platform, map.label, map.value), (1, 2, 3));
        assert_eq!(map.secondary_value, None);
        assert_eq!(map.secondary_label, None);
        assert_eq!(map.last_updated, None);
        assert_eq!(map.timestamp_column(), DEFAULT_LAST_UPDATED);
        assert!(map.data_rows(&sheet).is_empty());
    }

    #[test]
    fn requires_all_three_columns() {
        let sheet = rows(&[
            &["Platform Name", "Main Stat"],
            &["Platform Name", "Number"],
        ]);
        assert_eq!(HeuristicHeaderResolver::default().resolve(&sheet), None);
    }

    #[test]
    fn first_qualifying_row_wins() {
        let sheet = rows(&[
            &["Platform Name", "Main Stat", "Number"],
            &["Number", "Platform Name", "Main Stat"],
        ]);
        let map = HeuristicHeaderResolver::default().resolve(&sheet).unwrap();
        assert_eq!(map.header_row, Some(0));
        assert_eq!(map.platform, 0);
    }

    #[test]
    fn substring_is_not_a_label_match() {
        let sheet = rows(&[&["Platform Names", "Main Stat", "Number"]]);
        assert_eq!(HeuristicHeaderResolver::default().resolve(&sheet), None);
    }

    #[test]
    fn custom_labels() {
        let resolver = HeuristicHeaderResolver::new(HeaderLabels {
            platform: "network".into(),
            label: "metric".into(),
            value: "count".into(),
            ..HeaderLabels::default()
        });
        let sheet = rows(&[&["Count", "Network", "Metric"]]);
        let map = resolver.resolve(&sheet).unwrap();
        assert_eq!((map.platform, map.label, map.value), (1, 2, 0));
    }

    #[test]
    fn positional_layout_reads_every_row() {
        let sheet = rows(&[&["a"], &["b"]]);
        let map = ColumnMap::positional();
        assert_eq!(map.data_rows(&sheet).len(), 2);
        assert_eq!(map.timestamp_column(), 5);
    }
}
