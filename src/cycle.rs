// src/cycle.rs
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::config::Config;
use crate::fetch::SheetSource;
use crate::process::header::{HeaderResolver, HeuristicHeaderResolver};
use crate::process::load_sheet;
use crate::render::{Presenter, StatsView, StatusKind, StatusSink};
use crate::resolve::{pick_last_updated, AliasTable, MetricResolver};

pub const MSG_NOT_FETCHED: &str = "Not fetched yet";
pub const MSG_FETCHING: &str = "Fetching live stats…";
pub const MSG_LOADED: &str = "Live stats loaded successfully.";
pub const MSG_NOT_CONFIGURED: &str =
    "Add your published Google Sheet CSV URL to the configuration (sheet_csv_url).";
pub const MSG_FETCH_FAILED: &str =
    "Could not fetch the Google Sheet CSV. Check the URL and publishing settings.";
pub const MSG_EMPTY: &str = "CSV returned no rows.";
pub const MSG_RENDER_FAILED: &str = "Live stats could not be displayed.";

/// Why a load stopped before rendering.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("sheet source is not configured")]
    NotConfigured,
    #[error("fetching sheet failed: {0:#}")]
    Transport(anyhow::Error),
    #[error("sheet returned no rows")]
    EmptySheet,
    #[error("rendering stats failed: {0:#}")]
    Render(anyhow::Error),
}

impl LoadError {
    pub fn status_kind(&self) -> StatusKind {
        match self {
            LoadError::NotConfigured => StatusKind::Warn,
            LoadError::Transport(_) | LoadError::EmptySheet | LoadError::Render(_) => {
                StatusKind::Error
            }
        }
    }

    /// Line shown to the page visitor.
    pub fn message(&self) -> &'static str {
        match self {
            LoadError::NotConfigured => MSG_NOT_CONFIGURED,
            LoadError::Transport(_) => MSG_FETCH_FAILED,
            LoadError::EmptySheet => MSG_EMPTY,
            LoadError::Render(_) => MSG_RENDER_FAILED,
        }
    }
}

/// Result of one load, for the caller to inspect. Status has already been reported.
#[derive(Debug)]
pub enum CycleOutcome {
    Rendered(StatsView),
    Aborted(LoadError),
}

impl CycleOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, CycleOutcome::Rendered(_))
    }
}

/// Fetch, parse, resolve and present one snapshot of the sheet.
pub struct Loader {
    cfg: Config,
    headers: Box<dyn HeaderResolver + Send + Sync>,
    metrics: MetricResolver,
}

impl Loader {
    pub fn new(cfg: Config) -> Self {
        Self::with_header_resolver(cfg, Box::new(HeuristicHeaderResolver::default()))
    }

    /// Swap the header heuristic for another strategy.
    pub fn with_header_resolver(cfg: Config, headers: Box<dyn HeaderResolver + Send + Sync>) -> Self {
        let metrics = MetricResolver::new(
            AliasTable::from_config(&cfg.platform_aliases),
            cfg.links.clone(),
        );
        Self {
            cfg,
            headers,
            metrics,
        }
    }

    /// Run one load. Never fails: every problem becomes a status line, and
    /// the presenter is only called when the whole view was built.
    #[instrument(level = "info", skip_all, fields(source = %source.describe()))]
    pub async fn run(
        &self,
        source: &dyn SheetSource,
        presenter: &mut dyn Presenter,
        status: &mut dyn StatusSink,
    ) -> CycleOutcome {
        let shown = self.build_view(source, status).await.and_then(|view| {
            presenter
                .render(&view)
                .map(|()| view)
                .map_err(LoadError::Render)
        });
        match shown {
            Ok(view) => {
                status.set_status(StatusKind::Ok, MSG_LOADED);
                CycleOutcome::Rendered(view)
            }
            Err(err) => {
                match &err {
                    LoadError::Transport(e) => error!(error = %format!("{:#}", e), "sheet fetch failed"),
                    LoadError::Render(e) => error!(error = %format!("{:#}", e), "presenter failed"),
                    other => warn!(error = %other, "load aborted"),
                }
                status.set_status(err.status_kind(), err.message());
                CycleOutcome::Aborted(err)
            }
        }
    }

    async fn build_view(
        &self,
        source: &dyn SheetSource,
        status: &mut dyn StatusSink,
    ) -> Result<StatsView, LoadError> {
        if !source.is_configured() {
            return Err(LoadError::NotConfigured);
        }

        status.set_status(StatusKind::Idle, MSG_FETCHING);
        let text = source.fetch_text().await.map_err(LoadError::Transport)?;

        let sheet = load_sheet(&text, self.headers.as_ref());
        if sheet.rows.is_empty() {
            return Err(LoadError::EmptySheet);
        }

        let last_updated = pick_last_updated(
            sheet.data_rows(),
            sheet.columns.timestamp_column(),
            self.cfg.time_zone,
        );
        let resolved = self.metrics.resolve(&sheet.records);
        info!(
            rows = sheet.rows.len(),
            records = sheet.records.len(),
            matched = resolved.len(),
            last_updated = ?last_updated,
            "sheet resolved"
        );

        Ok(StatsView::build(&resolved, last_updated.as_deref(), &self.cfg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_taxonomy_maps_to_status() {
        assert_eq!(LoadError::NotConfigured.status_kind(), StatusKind::Warn);
        assert_eq!(
            LoadError::Transport(anyhow::anyhow!("HTTP 500")).status_kind(),
            StatusKind::Error
        );
        assert_eq!(LoadError::EmptySheet.message(), MSG_EMPTY);
        assert_eq!(
            LoadError::Render(anyhow::anyhow!("disk full")).status_kind(),
            StatusKind::Error
        );
    }

    #[test]
    fn transport_error_keeps_cause_chain() {
        let err = LoadError::Transport(anyhow::anyhow!("connection refused").context("GET x failed"));
        assert_eq!(
            err.to_string(),
            "fetching sheet failed: GET x failed: connection refused"
        );
    }
}
