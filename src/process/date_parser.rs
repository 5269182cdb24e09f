use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Zone used to interpret zone-less stamps and to display the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DisplayZone {
    /// Europe/London: GMT in winter, BST from the last Sunday of March to the
    /// last Sunday of October (01:00 UTC switch).
    #[default]
    #[serde(rename = "Europe/London")]
    London,
    #[serde(rename = "UTC")]
    Utc,
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%b %d, %Y %H:%M:%S",
    "%b %d, %Y %H:%M",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

fn last_sunday(year: i32, month: u32) -> Option<NaiveDate> {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let mut day = next.pred_opt()?;
    while day.weekday() != Weekday::Sun {
        day = day.pred_opt()?;
    }
    Some(day)
}

impl DisplayZone {
    fn is_summer_time(&self, instant: DateTime<Utc>) -> bool {
        match self {
            DisplayZone::Utc => false,
            DisplayZone::London => {
                let year = instant.year();
                let switch = |month| {
                    last_sunday(year, month)
                        .and_then(|d| d.and_hms_opt(1, 0, 0))
                        .map(|n| Utc.from_utc_datetime(&n))
                };
                match (switch(3), switch(10)) {
                    (Some(start), Some(end)) => instant >= start && instant < end,
                    _ => false,
                }
            }
        }
    }

    /// UTC offset in effect at `instant`.
    pub fn offset_at(&self, instant: DateTime<Utc>) -> Duration {
        if self.is_summer_time(instant) {
            Duration::hours(1)
        } else {
            Duration::zero()
        }
    }

    /// Abbreviation shown after the clock time.
    pub fn abbreviation_at(&self, instant: DateTime<Utc>) -> &'static str {
        match self {
            DisplayZone::Utc => "UTC",
            DisplayZone::London if self.is_summer_time(instant) => "BST",
            DisplayZone::London => "GMT",
        }
    }

    /// Interpret a wall-clock time in this zone. Ambiguous times resolve to the earlier instant.
    /// Wall-clock times at the edge of the representable range read as UTC.
    pub fn from_local(&self, naive: NaiveDateTime) -> DateTime<Utc> {
        naive
            .checked_sub_signed(Duration::hours(1))
            .map(|n| Utc.from_utc_datetime(&n))
            .filter(|summer| self.is_summer_time(*summer))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
    }
}

/// Parse a sheet "last updated" cell into an instant.
///
/// Zoned forms (RFC 3339 / RFC 2822) keep their offset, a bare ISO date is
/// UTC midnight, and every other accepted form is wall-clock time in `zone`.
pub fn parse_timestamp(raw: &str, zone: DisplayZone) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|n| Utc.from_utc_datetime(&n));
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| zone.from_local(naive))
}

/// `15 Jun 2025, 13:30 BST`
pub fn format_instant(instant: DateTime<Utc>, zone: DisplayZone) -> String {
    let utc = instant.naive_utc();
    let local = utc.checked_add_signed(zone.offset_at(instant)).unwrap_or(utc);
    format!(
        "{} {}",
        local.format("%d %b %Y, %H:%M"),
        zone.abbreviation_at(instant)
    )
}

/// Display text for a raw stamp: formatted when parseable, verbatim when not,
/// `None` when blank.
pub fn format_timestamp(raw: &str, zone: DisplayZone) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(match parse_timestamp(trimmed, zone) {
        Some(instant) => format_instant(instant, zone),
        None => trimmed.to_string(),
    })
}
