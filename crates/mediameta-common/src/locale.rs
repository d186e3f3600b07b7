//! Display locale and translation lookup.
//!
//! Every formatted value in a projection goes through a [`DisplayContext`]:
//! integers and decimals get the locale's separators, durations render as
//! `H:MM:SS`, dates are shifted into the display offset, and labels and unit
//! designations are passed through a [`Translator`]. The context is built
//! once at startup and shared by reference; nothing in it is mutated after
//! construction.

use crate::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Lookup of localized text.
///
/// `key` is the English source text; implementations return `fallback` when
/// they have no entry for it.
pub trait Translator: Send + Sync {
    /// Translate `key`, or return `fallback` when no translation exists.
    fn translate(&self, key: &str, fallback: &str) -> String;
}

/// Translator that always answers with the fallback text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackTranslator;

impl Translator for FallbackTranslator {
    fn translate(&self, _key: &str, fallback: &str) -> String {
        fallback.to_string()
    }
}

/// Translator backed by an in-memory table, usually loaded from config.
#[derive(Debug, Clone, Default)]
pub struct TableTranslator {
    table: HashMap<String, String>,
}

impl TableTranslator {
    /// Create a translator from `key -> translation` pairs.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            table: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Number of translated entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Translator for TableTranslator {
    fn translate(&self, key: &str, fallback: &str) -> String {
        match self.table.get(key) {
            Some(text) if !text.is_empty() => text.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Number and date conventions used when rendering values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayLocale {
    /// Inserted between groups of three integer digits. May be empty.
    pub grouping_separator: String,

    /// Separates the integer and fractional digits.
    pub decimal_separator: String,

    /// Offset dates are displayed in, e.g. `+03:00`, `-0500` or `UTC`.
    pub utc_offset: String,

    /// chrono strftime pattern for dates.
    pub date_format: String,
}

impl Default for DisplayLocale {
    fn default() -> Self {
        Self {
            grouping_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            utc_offset: "UTC".to_string(),
            date_format: "%b %-d, %Y %H:%M:%S".to_string(),
        }
    }
}

impl DisplayLocale {
    /// Check that the locale can format values unambiguously.
    pub fn validate(&self) -> Result<()> {
        if self.decimal_separator.is_empty() {
            return Err(Error::invalid_locale("decimal separator is empty"));
        }
        if self.decimal_separator == self.grouping_separator {
            return Err(Error::invalid_locale(format!(
                "grouping and decimal separators are both {:?}",
                self.decimal_separator
            )));
        }
        if self.date_format.is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error))
        {
            return Err(Error::invalid_locale(format!(
                "invalid date format: {:?}",
                self.date_format
            )));
        }
        parse_utc_offset(&self.utc_offset)?;
        Ok(())
    }
}

/// Parse a UTC offset such as `Z`, `UTC`, `+03:00`, `-0530`.
pub fn parse_utc_offset(text: &str) -> Result<FixedOffset> {
    let invalid = || Error::invalid_locale(format!("invalid UTC offset: {:?}", text));
    let text = text.trim();

    if text.eq_ignore_ascii_case("z") || text.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }

    let (sign, rest) = match text.as_bytes().first() {
        Some(b'+') => (1, &text[1..]),
        Some(b'-') => (-1, &text[1..]),
        _ => return Err(invalid()),
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
    let minutes: i32 = digits[2..].parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

/// Validated locale plus translator, shared by every formatting call.
pub struct DisplayContext {
    locale: DisplayLocale,
    offset: FixedOffset,
    translator: Box<dyn Translator>,
}

impl DisplayContext {
    /// Build a context, validating the locale.
    pub fn new(locale: DisplayLocale, translator: Box<dyn Translator>) -> Result<Self> {
        locale.validate()?;
        let offset = parse_utc_offset(&locale.utc_offset)?;
        Ok(Self {
            locale,
            offset,
            translator,
        })
    }

    /// The locale this context formats with.
    pub fn locale(&self) -> &DisplayLocale {
        &self.locale
    }

    /// The offset dates are displayed in.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Translate `key`, degrading to `fallback`.
    pub fn translate(&self, key: &str, fallback: &str) -> String {
        self.translator.translate(key, fallback)
    }

    /// Translate English source text that doubles as its own key.
    pub fn text(&self, source: &str) -> String {
        self.translator.translate(source, source)
    }

    /// Render an integer with digit grouping.
    pub fn format_integer(&self, value: i64) -> String {
        let digits = value.unsigned_abs().to_string();
        let grouped = group_digits(&digits, &self.locale.grouping_separator);
        if value < 0 {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }

    /// Render a real number rounded to at most `max_fraction_digits`, with
    /// trailing zeros dropped.
    pub fn format_decimal(&self, value: f64, max_fraction_digits: usize) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        let scale = 10f64.powi(max_fraction_digits as i32);
        let rounded = (value * scale).round() / scale;
        let rendered = format!("{:.*}", max_fraction_digits, rounded.abs());
        let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
        let fraction = fraction.trim_end_matches('0');

        let mut out = String::with_capacity(rendered.len() + 4);
        if rounded < 0.0 {
            out.push('-');
        }
        out.push_str(&group_digits(whole, &self.locale.grouping_separator));
        if !fraction.is_empty() {
            out.push_str(&self.locale.decimal_separator);
            out.push_str(fraction);
        }
        out
    }

    /// Render a duration as `H:MM:SS`, dropping sub-second precision.
    pub fn format_hms(&self, duration: Duration) -> String {
        let secs = duration.as_secs();
        format!("{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
    }

    /// Render a date in the display offset with the locale's pattern.
    pub fn format_datetime(&self, value: &DateTime<FixedOffset>) -> String {
        value
            .with_timezone(&self.offset)
            .format(&self.locale.date_format)
            .to_string()
    }

    /// Render a frequency as a grouped integer followed by `Hz`.
    pub fn format_hertz(&self, value: i64) -> String {
        format!("{} {}", self.format_integer(value), self.text("Hz"))
    }
}

impl Default for DisplayContext {
    fn default() -> Self {
        Self {
            locale: DisplayLocale::default(),
            offset: Utc.fix(),
            translator: Box::new(FallbackTranslator),
        }
    }
}

impl fmt::Debug for DisplayContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayContext")
            .field("locale", &self.locale)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + (len / 3) * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn european() -> DisplayContext {
        let locale = DisplayLocale {
            grouping_separator: " ".to_string(),
            decimal_separator: ",".to_string(),
            utc_offset: "+03:00".to_string(),
            date_format: "%d.%m.%Y %H:%M:%S".to_string(),
        };
        DisplayContext::new(locale, Box::new(FallbackTranslator)).unwrap()
    }

    #[test]
    fn test_format_integer_grouping() {
        let ctx = DisplayContext::default();
        assert_eq!(ctx.format_integer(0), "0");
        assert_eq!(ctx.format_integer(999), "999");
        assert_eq!(ctx.format_integer(1000), "1,000");
        assert_eq!(ctx.format_integer(2_404_223_327), "2,404,223,327");
        assert_eq!(ctx.format_integer(-48_000), "-48,000");
        assert_eq!(european().format_integer(953_685), "953 685");
    }

    #[test]
    fn test_format_decimal_trims_trailing_zeros() {
        let ctx = DisplayContext::default();
        assert_eq!(ctx.format_decimal(24.0, 3), "24");
        assert_eq!(ctx.format_decimal(23.976, 3), "23.976");
        assert_eq!(ctx.format_decimal(30000.0 / 1001.0, 3), "29.97");
        assert_eq!(ctx.format_decimal(0.990502, 2), "0.99");
        assert_eq!(ctx.format_decimal(1234.5, 2), "1,234.5");
        assert_eq!(ctx.format_decimal(-0.001, 2), "0");
        assert_eq!(european().format_decimal(1234.5, 2), "1 234,5");
    }

    #[test]
    fn test_format_hms() {
        let ctx = DisplayContext::default();
        assert_eq!(ctx.format_hms(Duration::from_secs(0)), "0:00:00");
        assert_eq!(ctx.format_hms(Duration::from_secs(5)), "0:00:05");
        assert_eq!(ctx.format_hms(Duration::from_secs(3382)), "0:56:22");
        assert_eq!(ctx.format_hms(Duration::from_millis(36_061_999)), "10:01:01");
    }

    #[test]
    fn test_format_datetime_uses_display_offset() {
        let date = DateTime::parse_from_rfc3339("2023-11-29T14:41:04Z").unwrap();
        assert_eq!(
            DisplayContext::default().format_datetime(&date),
            "Nov 29, 2023 14:41:04"
        );
        assert_eq!(european().format_datetime(&date), "29.11.2023 17:41:04");
    }

    #[test]
    fn test_format_hertz_translates_unit() {
        let ctx = DisplayContext::new(
            DisplayLocale::default(),
            Box::new(TableTranslator::new([("Hz", "Гц")])),
        )
        .unwrap();
        assert_eq!(ctx.format_hertz(48_000), "48,000 Гц");
        assert_eq!(DisplayContext::default().format_hertz(44_100), "44,100 Hz");
    }

    #[test]
    fn test_table_translator_falls_back() {
        let translator =
            TableTranslator::new([("Duration", "Длительность"), ("Title", "")]);
        assert_eq!(translator.translate("Duration", "Duration"), "Длительность");
        assert_eq!(translator.translate("Title", "Title"), "Title");
        assert_eq!(translator.translate("Encoder", "Encoder"), "Encoder");
        assert_eq!(translator.len(), 2);
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("UTC").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset("+03:00").unwrap().local_minus_utc(), 10_800);
        assert_eq!(parse_utc_offset("-0530").unwrap().local_minus_utc(), -19_800);
        assert!(parse_utc_offset("03:00").is_err());
        assert!(parse_utc_offset("+3").is_err());
        assert!(parse_utc_offset("+01:75").is_err());
    }

    #[test]
    fn test_locale_validation() {
        assert!(DisplayLocale::default().validate().is_ok());

        let same = DisplayLocale {
            grouping_separator: ".".to_string(),
            ..DisplayLocale::default()
        };
        assert!(same.validate().is_err());

        let no_decimal = DisplayLocale {
            decimal_separator: String::new(),
            ..DisplayLocale::default()
        };
        assert!(no_decimal.validate().is_err());

        let bad_date = DisplayLocale {
            date_format: "%Q".to_string(),
            ..DisplayLocale::default()
        };
        assert!(DisplayContext::new(bad_date, Box::new(FallbackTranslator)).is_err());

        let no_grouping = DisplayLocale {
            grouping_separator: String::new(),
            ..DisplayLocale::default()
        };
        let ctx = DisplayContext::new(no_grouping, Box::new(FallbackTranslator)).unwrap();
        assert_eq!(ctx.format_integer(1_000_000), "1000000");
    }
}
