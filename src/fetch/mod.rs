// src/fetch/mod.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, instrument};
use url::Url;

use crate::config::url_is_configured;

/// Provider of raw sheet text for one load.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Where the text comes from, for logs.
    fn describe(&self) -> String;

    /// `false` when the source cannot be used without further setup.
    fn is_configured(&self) -> bool {
        true
    }

    async fn fetch_text(&self) -> Result<String>;
}

/// Published-sheet CSV fetched over HTTP, bypassing caches.
#[derive(Debug, Clone)]
pub struct HttpSheetSource {
    client: Client,
    url: String,
}

impl HttpSheetSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl SheetSource for HttpSheetSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn is_configured(&self) -> bool {
        url_is_configured(&self.url)
    }

    #[instrument(level = "debug", skip(self), fields(url = %self.url))]
    async fn fetch_text(&self) -> Result<String> {
        let url = Url::parse(self.url.trim()).with_context(|| format!("invalid URL {}", self.url))?;
        debug!("fetching sheet");
        let text = self
            .client
            .get(url.clone())
            .header(header::CACHE_CONTROL, "no-store")
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Non-success status {}", url))?
            .text()
            .await
            .with_context(|| format!("Reading text from {}", url))?;
        debug!(bytes = text.len(), "sheet fetched");
        Ok(text)
    }
}

/// Sheet export read from a local file.
#[derive(Debug, Clone)]
pub struct FileSheetSource {
    path: PathBuf,
}

impl FileSheetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SheetSource for FileSheetSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_text(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))
    }
}
