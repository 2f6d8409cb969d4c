//! Display formatting for dashboard values

use serde::{Deserialize, Serialize};

/// Language used for month labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

const MONTHS_FR: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jun", "Jul", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Locale {
    /// Three-letter month abbreviation, `month` in 1..=12
    pub fn month_abbrev(&self, month: u32) -> &'static str {
        let table = match self {
            Locale::Fr => &MONTHS_FR,
            Locale::En => &MONTHS_EN,
        };
        let index = (month.clamp(1, 12) - 1) as usize;
        table[index]
    }
}

/// Format a duration given in minutes for the summary cards.
///
/// Negative values are upstream data errors and are shown as their
/// absolute value; NaN and infinities render as zero.
///
/// ```
/// use fieldcri::stats::format_duration;
///
/// assert_eq!(format_duration(42.0), "42 min");
/// assert_eq!(format_duration(125.0), "2 h 05");
/// ```
pub fn format_duration(minutes: f64) -> String {
    if !minutes.is_finite() {
        return "0 min".to_string();
    }
    let total = minutes.abs().round() as u64;
    if total < 60 {
        return format!("{} min", total);
    }
    format!("{} h {:02}", total / 60, total % 60)
}

/// [`format_duration`] for values that may be absent
pub fn format_duration_opt(minutes: Option<f64>) -> String {
    minutes.map_or_else(|| "0 min".to_string(), format_duration)
}

/// Completion rate as shown on the cards, e.g. "83%"
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "0%".to_string();
    }
    format!("{:.0}%", value)
}
