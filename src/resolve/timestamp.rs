// src/resolve/timestamp.rs
use tracing::trace;

use crate::process::date_parser::{parse_timestamp, DisplayZone};
use crate::process::tabular::RawRow;
use crate::process::utils::cell;

/// Pick the "last updated" stamp to show for a sheet.
///
/// Non-blank cells of `column` are candidates. The latest parseable one wins
/// (earliest row on ties); with nothing parseable the last candidate in row
/// order is returned as-is. `None` when the column is empty throughout.
pub fn pick_last_updated(rows: &[RawRow], column: usize, zone: DisplayZone) -> Option<String> {
    let candidates: Vec<&str> = rows
        .iter()
        .map(|r| cell(r, column).trim())
        .filter(|ts| !ts.is_empty())
        .collect();

    let mut latest = None;
    for ts in &candidates {
        if let Some(instant) = parse_timestamp(ts, zone) {
            trace!(%ts, %instant, "parsed timestamp candidate");
            match latest {
                Some((_, best)) if best >= instant => {}
                _ => latest = Some((*ts, instant)),
            }
        }
    }

    latest
        .map(|(ts, _)| ts)
        .or_else(|| candidates.last().copied())
        .map(str::to_string)
}
