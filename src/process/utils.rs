use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder shown wherever a value is missing.
pub const PLACEHOLDER: &str = "—";

static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("numeric pattern is valid"));

/// Trim surrounding whitespace and lowercase, for header and alias comparisons.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Cell at `idx`, or `""` when the row is too short.
pub fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// Format a sheet value for display.
///
/// Plain integers/decimals (thousands commas allowed) are regrouped as
/// `12,345`; anything else (`1.2M`, `250k`) is passed through trimmed.
/// Blank cells become [`PLACEHOLDER`].
pub fn display_number(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return PLACEHOLDER.to_string();
    }

    let numeric = trimmed.replace(',', "");
    if NUMERIC.is_match(&numeric) {
        if let Ok(n) = numeric.parse::<f64>() {
            if n.is_finite() {
                return group_digits(n);
            }
        }
    }

    trimmed.to_string()
}

/// en-GB grouping: at most three fraction digits, trailing zeros dropped.
fn group_digits(n: f64) -> String {
    let fixed = format!("{:.3}", n);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*d);
    }

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}
