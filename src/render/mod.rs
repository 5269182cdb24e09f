// src/render/mod.rs
pub mod cards;
pub mod presenter;

use serde::Serialize;
use std::fmt;

use crate::config::Config;
use crate::process::date_parser::format_timestamp;
use crate::process::utils::PLACEHOLDER;
use crate::resolve::ResolvedMetrics;

pub use cards::{Icon, StatCard, Tone};
pub use presenter::{JsonPresenter, LogStatus, TextPresenter};

/// Everything the page shows after one successful load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsView {
    pub social: Vec<StatCard>,
    pub totals: Vec<StatCard>,
    /// Display-ready stamp; `None` when the sheet had none.
    pub last_updated: Option<String>,
}

impl StatsView {
    /// Assemble cards and the display stamp from resolved metrics.
    pub fn build(resolved: &ResolvedMetrics, raw_last_updated: Option<&str>, cfg: &Config) -> Self {
        Self {
            social: cards::social_cards(resolved, cfg),
            totals: cards::total_cards(resolved, cfg),
            last_updated: raw_last_updated.and_then(|raw| format_timestamp(raw, cfg.time_zone)),
        }
    }

    /// `Last updated: 15 Jun 2025, 13:30 BST`, or a dash when absent.
    pub fn last_updated_line(&self) -> String {
        format!(
            "Last updated: {}",
            self.last_updated.as_deref().unwrap_or(PLACEHOLDER)
        )
    }
}

/// Severity shown by the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Idle,
    Ok,
    Warn,
    Error,
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusKind::Idle => "idle",
            StatusKind::Ok => "ok",
            StatusKind::Warn => "warn",
            StatusKind::Error => "error",
        })
    }
}

/// Receives the status line at each phase of a load.
pub trait StatusSink {
    fn set_status(&mut self, kind: StatusKind, message: &str);
}

/// Receives the finished view. Only called for a load that completed.
pub trait Presenter {
    fn render(&mut self, view: &StatsView) -> anyhow::Result<()>;
}
