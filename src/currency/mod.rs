//! Locale-aware number and date rendering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Most fraction digits shown for an amount; trailing zeros are dropped.
pub const MAX_FRACTION_DIGITS: usize = 3;

pub const DEFAULT_LOCALE: &str = "en-IN";

/// How digits left of the decimal separator are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupingStyle {
    /// `1,000,000`
    Thousands,
    /// `10,00,000`: the last three digits, then pairs.
    Indian,
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub grouping: GroupingStyle,
    pub date_format: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::for_tag(DEFAULT_LOCALE)
    }
}

impl LocaleConfig {
    /// Built-in presets. Unrecognised tags fall back to the default locale.
    pub fn for_tag(tag: &str) -> Self {
        let (decimal_separator, grouping_separator, grouping) = match tag {
            "en-IN" | "hi-IN" => ('.', ',', GroupingStyle::Indian),
            "en-US" | "en-GB" => ('.', ',', GroupingStyle::Thousands),
            "de-DE" => (',', '.', GroupingStyle::Thousands),
            other => {
                if other != DEFAULT_LOCALE {
                    tracing::warn!(locale = other, "unknown locale, using {}", DEFAULT_LOCALE);
                }
                return Self::for_tag(DEFAULT_LOCALE);
            }
        };
        let date_format = match tag {
            "en-US" => "%m/%d/%Y",
            "de-DE" => "%d.%m.%Y",
            _ => "%d/%m/%Y",
        };
        Self {
            language_tag: tag.to_string(),
            decimal_separator,
            grouping_separator,
            grouping,
            date_format: date_format.to_string(),
        }
    }
}

/// Renders `value` with locale grouping and up to [`MAX_FRACTION_DIGITS`]
/// fraction digits. Negative values carry a leading `-`.
pub fn format_number(locale: &LocaleConfig, value: f64) -> String {
    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut body = group_digits(int_part, locale.grouping_separator, locale.grouping);
    if !frac_part.is_empty() {
        body.push(locale.decimal_separator);
        body.push_str(frac_part);
    }

    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    if value < 0.0 && !is_zero {
        format!("-{body}")
    } else {
        body
    }
}

pub fn format_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    date.format(&locale.date_format).to_string()
}

fn group_digits(digits: &str, separator: char, style: GroupingStyle) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let size = match style {
        GroupingStyle::Thousands => 3,
        GroupingStyle::Indian => 2,
    };
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(size);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(&separator.to_string())
}
