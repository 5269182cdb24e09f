// src/render/cards.rs
use serde::Serialize;

use crate::config::Config;
use crate::process::utils::{display_number, PLACEHOLDER};
use crate::resolve::{includes_any, Identity, ResolvedMetric, ResolvedMetrics};

/// Glyph shown beside a card title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Tiktok,
    Instagram,
    Youtube,
    Facebook,
    Spotify,
    Streams,
}

/// Visual emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Default,
    Gold,
}

/// One display-ready card. `value` is already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub icon: Icon,
    pub title: String,
    pub label: String,
    pub value: String,
    pub href: String,
    pub tone: Tone,
}

impl StatCard {
    fn new(icon: Icon, title: &str, label: &str, raw_value: &str, href: &str) -> Self {
        Self {
            icon,
            title: title.to_string(),
            label: label.to_string(),
            value: display_number(raw_value),
            href: href.to_string(),
            tone: Tone::Default,
        }
    }

    fn gold(mut self) -> Self {
        self.tone = Tone::Gold;
        self
    }
}

fn or_default<'a>(text: &'a str, fallback: &'a str) -> &'a str {
    if text.is_empty() {
        fallback
    } else {
        text
    }
}

/// Primary card for a platform, with the record's label or `default_label`.
fn primary(metric: &ResolvedMetric, icon: Icon, title: &str, default_label: &str) -> StatCard {
    let rec = &metric.record;
    StatCard::new(
        icon,
        title,
        or_default(&rec.label, default_label),
        &rec.value,
        &metric.href,
    )
}

/// Separate card for the secondary stat when its label mentions any of `needles`.
fn secondary_card(
    metric: &ResolvedMetric,
    icon: Icon,
    title: &str,
    needles: &[&str],
    default_label: &str,
) -> Option<StatCard> {
    let rec = &metric.record;
    if includes_any(&rec.secondary_label, needles) && !rec.secondary_value.is_empty() {
        Some(StatCard::new(
            icon,
            title,
            or_default(&rec.secondary_label, default_label),
            &rec.secondary_value,
            &metric.href,
        ))
    } else {
        None
    }
}

/// Social cards in page order, ending with the website card.
pub fn social_cards(resolved: &ResolvedMetrics, cfg: &Config) -> Vec<StatCard> {
    let mut cards = Vec::new();

    for (identity, icon, title) in [
        (Identity::Tiktok, Icon::Tiktok, "TikTok"),
        (Identity::Instagram, Icon::Instagram, "Instagram"),
    ] {
        if let Some(m) = resolved.get(identity) {
            cards.push(primary(m, icon, title, "Followers"));
        }
    }

    if let Some(m) = resolved.get(Identity::Youtube) {
        cards.push(primary(m, Icon::Youtube, "YouTube", "Subscribers"));
        cards.extend(secondary_card(m, Icon::Youtube, "YouTube", &["views"], "Total Views"));
    }

    if let Some(m) = resolved.get(Identity::Spotify) {
        cards.push(primary(m, Icon::Spotify, "Spotify", "Followers"));
        cards.extend(secondary_card(
            m,
            Icon::Spotify,
            "Spotify",
            &["monthly", "listeners"],
            "Monthly Listeners",
        ));
    }

    if let Some(m) = resolved.get(Identity::Facebook) {
        cards.push(primary(m, Icon::Facebook, "Facebook", "Followers"));
    }

    cards.push(StatCard {
        icon: Icon::Streams,
        title: "Website".into(),
        label: cfg.website_label.clone(),
        value: "Visit".into(),
        href: cfg.links.website.clone(),
        tone: Tone::Default,
    });

    cards
}

/// Career totals, padded with placeholders up to `cfg.min_total_cards`.
pub fn total_cards(resolved: &ResolvedMetrics, cfg: &Config) -> Vec<StatCard> {
    let mut cards = Vec::new();

    if let Some(m) = resolved.get(Identity::TotalStreams) {
        cards.push(
            StatCard::new(
                Icon::Streams,
                "Total Streams",
                "Reported from TuneCore",
                &m.record.value,
                &m.href,
            )
            .gold(),
        );
    }
    if let Some(m) = resolved.get(Identity::TotalFollowers) {
        cards.push(
            StatCard::new(
                Icon::Instagram,
                "Total Followers",
                "Across platforms",
                &m.record.value,
                &m.href,
            )
            .gold(),
        );
    }

    while cards.len() < cfg.min_total_cards {
        cards.push(StatCard::new(
            Icon::Streams,
            "Total",
            "Add in Sheet",
            PLACEHOLDER,
            &cfg.links.website,
        ));
    }

    cards
}
