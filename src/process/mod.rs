// src/process/mod.rs
pub mod date_parser;
pub mod header;
pub mod row;
pub mod tabular;
pub mod utils;

use tracing::{debug, instrument};

use header::{ColumnMap, HeaderResolver};
use row::{map_rows, MetricRecord};
use tabular::{parse_csv, RawRow};

/// A sheet export after parsing, header resolution and row mapping.
#[derive(Debug, Clone)]
pub struct ParsedSheet {
    /// Every parsed row, header and preamble included.
    pub rows: Vec<RawRow>,
    /// `true` when `columns` came from a header row rather than the positional fallback.
    pub has_header: bool,
    pub columns: ColumnMap,
    /// Non-blank data rows, in sheet order.
    pub records: Vec<MetricRecord>,
}

impl ParsedSheet {
    /// Rows below the header (all rows without one).
    pub fn data_rows(&self) -> &[RawRow] {
        self.columns.data_rows(&self.rows)
    }
}

/// Parse `text` and map its rows into records.
///
/// A sheet with no recognizable header is read with the positional column
/// layout; that is not an error.
#[instrument(level = "debug", skip_all, fields(bytes = text.len()))]
pub fn load_sheet(text: &str, resolver: &dyn HeaderResolver) -> ParsedSheet {
    let rows = parse_csv(text);
    let resolved = resolver.resolve(&rows);
    let has_header = resolved.is_some();
    let columns = resolved.unwrap_or_else(ColumnMap::positional);
    let records = map_rows(&rows, &columns);

    debug!(
        rows = rows.len(),
        records = records.len(),
        has_header,
        "sheet loaded"
    );

    ParsedSheet {
        rows,
        has_header,
        columns,
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::header::HeuristicHeaderResolver;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,epkstats::process=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    #[test]
    fn load_sheet_with_leading_blank_column() {
        init_test_logging();
        let content = ",Platform Name,Main Stat,Number,Number,Secondary Stat,Last Updated\r
,TikTok,Followers,\"12,345\",,,2025-06-01\r
,YouTube,Subscribers,800,\"45,000\",Total Views,2025-06-14\r
Total Followers,,,98000\r
";
        let sheet = load_sheet(content, &HeuristicHeaderResolver::default());

        assert!(sheet.has_header);
        assert_eq!(sheet.rows.len(), 4);
        assert_eq!(sheet.data_rows().len(), 3);
        assert_eq!(sheet.records.len(), 3);

        let yt = &sheet.records[1];
        assert_eq!(yt.platform, "YouTube");
        assert_eq!(yt.secondary_value, "45,000");
        assert_eq!(yt.secondary_label, "Total Views");

        // footer row lost its leading blank cell
        let footer = &sheet.records[2];
        assert_eq!(footer.platform, "Total Followers");
    }

    #[test]
    fn load_sheet_without_header_uses_positions() {
        init_test_logging();
        let sheet = load_sheet(
            "Instagram,Followers,500\nTikTok,Likes,9000\n",
            &HeuristicHeaderResolver::default(),
        );
        assert!(!sheet.has_header);
        assert_eq!(sheet.columns, ColumnMap::positional());
        assert_eq!(sheet.records.len(), 2);
        assert_eq!(sheet.records[1].label, "Likes");
    }
}
