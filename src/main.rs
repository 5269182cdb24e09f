use anyhow::Result;
use clap::Parser;
use epkstats::{
    config::Config,
    cycle::{Loader, MSG_NOT_FETCHED},
    fetch::{FileSheetSource, HttpSheetSource, SheetSource},
    render::{JsonPresenter, LogStatus, Presenter, StatusKind, StatusSink, TextPresenter},
};
use reqwest::Client;
use std::{io, path::PathBuf, process::ExitCode};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Render an artist's live social stats from a published sheet.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// YAML config file (defaults to $EPK_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sheet CSV URL, overriding the config
    #[arg(long)]
    url: Option<String>,

    /// Read the CSV export from a local file instead of fetching it
    #[arg(long, conflicts_with = "url")]
    file: Option<PathBuf>,

    /// Print the stats as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    // ─── 2) configuration ────────────────────────────────────────────
    let args = Args::parse();
    let mut cfg = Config::load(args.config.as_deref())?;
    if let Some(url) = args.url {
        cfg.sheet_csv_url = url;
    }

    // ─── 3) pick the sheet source ────────────────────────────────────
    let source: Box<dyn SheetSource> = match args.file {
        Some(path) => Box::new(FileSheetSource::new(path)),
        None => Box::new(HttpSheetSource::new(Client::new(), cfg.sheet_csv_url.clone())),
    };
    info!(source = %source.describe(), json = args.json, "startup");

    // ─── 4) one load cycle ───────────────────────────────────────────
    let mut status = LogStatus::default();
    status.set_status(StatusKind::Idle, MSG_NOT_FETCHED);

    let stdout = io::stdout();
    let mut presenter: Box<dyn Presenter> = if args.json {
        Box::new(JsonPresenter::new(stdout.lock()))
    } else {
        Box::new(TextPresenter::new(stdout.lock()))
    };

    let loader = Loader::new(cfg);
    let outcome = loader
        .run(source.as_ref(), presenter.as_mut(), &mut status)
        .await;

    Ok(if outcome.is_rendered() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
