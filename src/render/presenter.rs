// src/render/presenter.rs
use anyhow::{Context, Result};
use std::io::Write;
use tracing::{error, info, warn};

use super::{Presenter, StatCard, StatsView, StatusKind, StatusSink, Tone};

/// Forwards status lines to the log at a matching level.
#[derive(Debug, Default)]
pub struct LogStatus {
    last: Option<(StatusKind, String)>,
}

impl LogStatus {
    /// Most recent status line, if any.
    pub fn last(&self) -> Option<(StatusKind, &str)> {
        self.last.as_ref().map(|(kind, msg)| (*kind, msg.as_str()))
    }
}

impl StatusSink for LogStatus {
    fn set_status(&mut self, kind: StatusKind, message: &str) {
        match kind {
            StatusKind::Idle | StatusKind::Ok => info!(status = %kind, "{}", message),
            StatusKind::Warn => warn!(status = %kind, "{}", message),
            StatusKind::Error => error!(status = %kind, "{}", message),
        }
        self.last = Some((kind, message.to_string()));
    }
}

/// Plain-text listing of the cards.
pub struct TextPresenter<W: Write> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_card(&mut self, card: &StatCard) -> std::io::Result<()> {
        let marker = match card.tone {
            Tone::Gold => "*",
            Tone::Default => " ",
        };
        writeln!(
            self.out,
            "{} {:<16} {:<24} {:>14}  {}",
            marker, card.title, card.label, card.value, card.href
        )
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn render(&mut self, view: &StatsView) -> Result<()> {
        writeln!(self.out, "Totals").context("writing totals")?;
        for card in &view.totals {
            self.write_card(card).context("writing totals")?;
        }
        writeln!(self.out, "\nSocial").context("writing social")?;
        for card in &view.social {
            self.write_card(card).context("writing social")?;
        }
        writeln!(self.out, "\n{}", view.last_updated_line()).context("writing timestamp")?;
        self.out.flush().context("flushing output")
    }
}

/// Pretty JSON document of the whole view.
pub struct JsonPresenter<W: Write> {
    out: W,
}

impl<W: Write> JsonPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for JsonPresenter<W> {
    fn render(&mut self, view: &StatsView) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, view).context("serializing stats view")?;
        writeln!(self.out).context("writing newline")?;
        Ok(())
    }
}
