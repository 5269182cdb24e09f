// src/resolve/mod.rs
pub mod timestamp;

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::config::Links;
use crate::process::row::MetricRecord;
use crate::process::utils::normalize_key;

pub use timestamp::pick_last_updated;

const TOTAL_FOLLOWERS: &[&str] = &["total followers"];
const TOTAL_STREAMS: &[&str] = &["total streams"];

/// The platforms and aggregate rows a landing page knows how to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Identity {
    Tiktok,
    Instagram,
    Youtube,
    Facebook,
    Spotify,
    TotalFollowers,
    TotalStreams,
}

impl Identity {
    pub const ALL: [Identity; 7] = [
        Identity::Tiktok,
        Identity::Instagram,
        Identity::Youtube,
        Identity::Facebook,
        Identity::Spotify,
        Identity::TotalFollowers,
        Identity::TotalStreams,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Identity::Tiktok => "tiktok",
            Identity::Instagram => "instagram",
            Identity::Youtube => "youtube",
            Identity::Facebook => "facebook",
            Identity::Spotify => "spotify",
            Identity::TotalFollowers => "total-followers",
            Identity::TotalStreams => "total-streams",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = normalize_key(key);
        Self::ALL.into_iter().find(|i| i.key() == key)
    }

    /// Aggregate rows are found by phrase, platforms by alias.
    fn needles(&self) -> Option<&'static [&'static str]> {
        match self {
            Identity::TotalFollowers => Some(TOTAL_FOLLOWERS),
            Identity::TotalStreams => Some(TOTAL_STREAMS),
            _ => None,
        }
    }

    /// Card link; aggregates point at the website.
    pub fn link<'a>(&self, links: &'a Links) -> &'a str {
        match self {
            Identity::Tiktok => &links.tiktok,
            Identity::Instagram => &links.instagram,
            Identity::Youtube => &links.youtube,
            Identity::Facebook => &links.facebook,
            Identity::Spotify => &links.spotify,
            Identity::TotalFollowers | Identity::TotalStreams => &links.website,
        }
    }
}

/// Exact match of the normalized platform text against any alias.
pub fn matches_alias(platform: &str, aliases: &[String]) -> bool {
    let normalized = normalize_key(platform);
    aliases.iter().any(|a| normalize_key(a) == normalized)
}

/// Case-insensitive substring search for any of `needles` in `text`.
pub fn includes_any(text: &str, needles: &[&str]) -> bool {
    let hay = normalize_key(text);
    needles.iter().any(|n| hay.contains(&normalize_key(n)))
}

/// Identity-keyed alias lists. Identities without an entry match their own key.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: BTreeMap<Identity, Vec<String>>,
}

impl AliasTable {
    /// Build from config keys, skipping keys that name no identity.
    pub fn from_config(raw: &BTreeMap<String, Vec<String>>) -> Self {
        let mut entries = BTreeMap::new();
        for (key, aliases) in raw {
            match Identity::from_key(key) {
                Some(identity) => {
                    entries.insert(identity, aliases.clone());
                }
                None => warn!(%key, "ignoring aliases for unknown platform"),
            }
        }
        Self { entries }
    }

    pub fn aliases(&self, identity: Identity) -> Vec<String> {
        self.entries
            .get(&identity)
            .cloned()
            .unwrap_or_else(|| vec![identity.key().to_string()])
    }

    /// Whether `platform` text denotes `identity`.
    pub fn matches(&self, platform: &str, identity: Identity) -> bool {
        match identity.needles() {
            Some(needles) => includes_any(platform, needles),
            None => matches_alias(platform, &self.aliases(identity)),
        }
    }
}

/// A record bound to the identity it denotes, plus where its card links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMetric {
    pub identity: Identity,
    pub record: MetricRecord,
    pub href: String,
}

/// First matching record per identity.
#[derive(Debug, Clone, Default)]
pub struct ResolvedMetrics {
    found: BTreeMap<Identity, ResolvedMetric>,
}

impl ResolvedMetrics {
    pub fn get(&self, identity: Identity) -> Option<&ResolvedMetric> {
        self.found.get(&identity)
    }

    pub fn len(&self) -> usize {
        self.found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }
}

/// Binds sheet records to identities.
#[derive(Debug, Clone)]
pub struct MetricResolver {
    aliases: AliasTable,
    links: Links,
}

impl MetricResolver {
    pub fn new(aliases: AliasTable, links: Links) -> Self {
        Self { aliases, links }
    }

    /// The first record matching `identity`; later duplicates are ignored.
    pub fn find<'a>(&self, records: &'a [MetricRecord], identity: Identity) -> Option<&'a MetricRecord> {
        records
            .iter()
            .find(|r| self.aliases.matches(&r.platform, identity))
    }

    pub fn resolve(&self, records: &[MetricRecord]) -> ResolvedMetrics {
        let mut found = BTreeMap::new();
        for identity in Identity::ALL {
            if let Some(record) = self.find(records, identity) {
                found.insert(
                    identity,
                    ResolvedMetric {
                        identity,
                        record: record.clone(),
                        href: identity.link(&self.links).to_string(),
                    },
                );
            }
        }
        debug!(matched = found.len(), records = records.len(), "resolved metrics");
        ResolvedMetrics { found }
    }
}
