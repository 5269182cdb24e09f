// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, env, fs, path::Path};
use tracing::{debug, info};

use crate::process::date_parser::DisplayZone;

/// Marker left in an unedited configuration.
pub const URL_PLACEHOLDER: &str = "PASTE_YOUR";

/// Environment variable overriding [`Config::sheet_csv_url`].
pub const URL_ENV: &str = "SHEET_CSV_URL";

/// Environment variable naming a YAML config file.
pub const CONFIG_ENV: &str = "EPK_CONFIG";

const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vSd-eBeAuYkde8q-AKXvkqR2r0ogPmtJMJ4pzHSBsr2AcqUcBQsQwrpmZ1ecBUxBmzZiMTwn77NoZ-s/pub?output=csv";

/// Outbound link for each card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    pub website: String,
    pub tiktok: String,
    pub instagram: String,
    pub youtube: String,
    pub facebook: String,
    pub spotify: String,
}

impl Default for Links {
    fn default() -> Self {
        Self {
            website: "https://alyrisband.com".into(),
            tiktok: "https://tiktok.com/@alyrisband".into(),
            instagram: "https://instagram.com/alyrisband".into(),
            youtube: "https://www.youtube.com/@ALYRISBand".into(),
            facebook: "https://www.facebook.com/share/1CBNjjaBgW/?mibextid=wwXIfr".into(),
            spotify: "https://open.spotify.com/artist/2OLxuGyo18gD3Xj7QZVXg9?si=hwSqS-DlQByonLoHRYDfSw"
                .into(),
        }
    }
}

/// Runtime settings for one landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// "Published to web" CSV export of the stats sheet.
    pub sheet_csv_url: String,
    /// Identity key (`instagram`, `tiktok`, ...) to accepted platform spellings.
    pub platform_aliases: BTreeMap<String, Vec<String>>,
    pub links: Links,
    /// Label on the website card.
    pub website_label: String,
    pub time_zone: DisplayZone,
    /// Totals section is padded with placeholder cards up to this count.
    pub min_total_cards: usize,
}

/// A sheet URL is usable once it is non-blank and the placeholder is gone.
pub fn url_is_configured(url: &str) -> bool {
    let url = url.trim();
    !url.is_empty() && !url.contains(URL_PLACEHOLDER)
}

fn aliases(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        let platform_aliases = BTreeMap::from([
            ("instagram".to_string(), aliases(&["ig", "instagram"])),
            ("tiktok".to_string(), aliases(&["tiktok", "tik tok"])),
            ("youtube".to_string(), aliases(&["youtube", "yt"])),
            ("facebook".to_string(), aliases(&["facebook", "fb"])),
        ]);
        Self {
            sheet_csv_url: DEFAULT_SHEET_URL.into(),
            platform_aliases,
            links: Links::default(),
            website_label: "alyrisband.com".into(),
            time_zone: DisplayZone::default(),
            min_total_cards: 2,
        }
    }
}

impl Config {
    /// Read a YAML file; missing keys take their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: Config = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config file");
        Ok(cfg)
    }

    /// Defaults, then the YAML file (explicit `path`, else `EPK_CONFIG`), then
    /// `SHEET_CSV_URL`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let from_env = env::var(CONFIG_ENV).ok().filter(|p| !p.trim().is_empty());
        let mut cfg = match (path, from_env) {
            (Some(p), _) => Self::from_yaml_file(p)?,
            (None, Some(p)) => Self::from_yaml_file(p)?,
            (None, None) => Self::default(),
        };

        if let Ok(url) = env::var(URL_ENV) {
            info!("sheet URL taken from {}", URL_ENV);
            cfg.sheet_csv_url = url;
        }
        Ok(cfg)
    }

    /// False when the URL is blank or still holds the placeholder.
    pub fn is_configured(&self) -> bool {
        url_is_configured(&self.sheet_csv_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_configured() {
        let cfg = Config::default();
        assert!(cfg.is_configured());
        assert_eq!(cfg.min_total_cards, 2);
        assert_eq!(cfg.time_zone, DisplayZone::London);
        assert_eq!(cfg.platform_aliases["instagram"], vec!["ig", "instagram"]);
        assert!(!cfg.platform_aliases.contains_key("spotify"));
    }

    #[test]
    fn placeholder_and_blank_urls_are_not_configured() {
        let mut cfg = Config::default();
        cfg.sheet_csv_url = "https://docs.google.com/PASTE_YOUR_URL_HERE".into();
        assert!(!cfg.is_configured());
        cfg.sheet_csv_url = "  ".into();
        assert!(!cfg.is_configured());
    }

    #[test]
    fn yaml_overrides_merge_with_defaults() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(
            file,
            "sheet_csv_url: https://example.com/pub?output=csv\n\
             time_zone: UTC\n\
             platform_aliases:\n  spotify: [spotify, sp]\n\
             links:\n  website: https://example.com\n"
        )?;

        let cfg = Config::from_yaml_file(file.path())?;
        assert_eq!(cfg.sheet_csv_url, "https://example.com/pub?output=csv");
        assert_eq!(cfg.time_zone, DisplayZone::Utc);
        assert_eq!(cfg.platform_aliases.len(), 1);
        assert_eq!(cfg.links.website, "https://example.com");
        assert_eq!(cfg.links.tiktok, Links::default().tiktok);
        assert_eq!(cfg.website_label, "alyrisband.com");
        Ok(())
    }

    #[test]
    fn config_file_from_env_unless_path_given() -> Result<()> {
        let mut from_env = NamedTempFile::new()?;
        write!(from_env, "website_label: from env\n")?;
        let mut explicit = NamedTempFile::new()?;
        write!(explicit, "website_label: explicit\n")?;

        env::set_var(CONFIG_ENV, from_env.path());
        let via_env = Config::load(None);
        let via_path = Config::load(Some(explicit.path()));
        env::remove_var(CONFIG_ENV);

        assert_eq!(via_env?.website_label, "from env");
        assert_eq!(via_path?.website_label, "explicit");
        Ok(())
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let err = Config::from_yaml_file("/nonexistent/epkstats.yaml").unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }
}
