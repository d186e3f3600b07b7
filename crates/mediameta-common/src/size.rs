//! Decimal size units and readable unit selection.
//!
//! A [`SizeValue`] is a magnitude tagged with a [`SizeUnit`]. Units use the
//! decimal scale (1 KB = 1000 B) with `bit` at one eighth of a byte.
//! [`SizeValue::optimal`] picks the unit a value should be displayed in; the
//! [`RoundingRule`] shifts the point at which it moves to a coarser unit.

use crate::DisplayContext;
use std::fmt;

/// Unit of a [`SizeValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeUnit {
    /// One eighth of a byte.
    Bit,
    /// One byte.
    Byte,
    /// 1000 bytes.
    KiloByte,
    /// 10^6 bytes.
    MegaByte,
    /// 10^9 bytes.
    GigaByte,
    /// 10^12 bytes.
    TeraByte,
}

impl SizeUnit {
    /// Every unit, smallest first.
    pub const ALL: [SizeUnit; 6] = [
        Self::Bit,
        Self::Byte,
        Self::KiloByte,
        Self::MegaByte,
        Self::GigaByte,
        Self::TeraByte,
    ];

    /// Number of bytes in one of this unit.
    pub fn factor(self) -> f64 {
        match self {
            Self::Bit => 1.0 / 8.0,
            Self::Byte => 1.0,
            Self::KiloByte => 1e3,
            Self::MegaByte => 1e6,
            Self::GigaByte => 1e9,
            Self::TeraByte => 1e12,
        }
    }

    /// Short English designation, also the translation key.
    pub fn designation(self) -> &'static str {
        match self {
            Self::Bit => "bit",
            Self::Byte => "B",
            Self::KiloByte => "KB",
            Self::MegaByte => "MB",
            Self::GigaByte => "GB",
            Self::TeraByte => "TB",
        }
    }

    /// Designation passed through the context's translator.
    pub fn localized_designation(self, ctx: &DisplayContext) -> String {
        ctx.text(self.designation())
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.designation())
    }
}

/// Policy for choosing a display unit.
///
/// `None` in [`SizeValue::optimal`] switches units at every power of 1000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingRule {
    /// Stay in the finer unit until the value reaches 10 of the next one.
    Down,
    /// Move to the coarser unit once the value reaches 0.1 of it.
    Up,
}

impl RoundingRule {
    /// Upper byte bounds (exclusive) for bit, byte, KB, MB and GB.
    fn thresholds(rule: Option<Self>) -> [f64; 5] {
        match rule {
            Some(Self::Down) => [10.0, 1e4, 1e7, 1e10, 1e13],
            Some(Self::Up) => [0.1, 100.0, 1e5, 1e8, 1e11],
            None => [1.0, 1e3, 1e6, 1e9, 1e12],
        }
    }
}

/// A magnitude expressed in a [`SizeUnit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeValue {
    magnitude: f64,
    unit: SizeUnit,
}

impl SizeValue {
    /// Create a size. Negative magnitudes are accepted but never re-scaled.
    pub fn new(magnitude: f64, unit: SizeUnit) -> Self {
        Self { magnitude, unit }
    }

    /// Create a size from an integer count of `unit`.
    pub fn from_count(count: i64, unit: SizeUnit) -> Self {
        Self::new(count as f64, unit)
    }

    /// Numeric magnitude in [`Self::unit`].
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Unit of the magnitude.
    pub fn unit(&self) -> SizeUnit {
        self.unit
    }

    /// Magnitude converted to `unit`.
    pub fn size_in(&self, unit: SizeUnit) -> f64 {
        self.magnitude * self.unit.factor() / unit.factor()
    }

    /// The same size expressed in `unit`.
    pub fn in_unit(&self, unit: SizeUnit) -> Self {
        Self::new(self.size_in(unit), unit)
    }

    /// The same size in the most readable unit under `rule`.
    ///
    /// ```
    /// use mediameta_common::{RoundingRule, SizeUnit, SizeValue};
    ///
    /// let size = SizeValue::new(1000.0, SizeUnit::Byte);
    /// assert_eq!(size.optimal(Some(RoundingRule::Down)).to_string(), "1,000 B");
    /// assert_eq!(size.optimal(Some(RoundingRule::Up)).to_string(), "1 KB");
    /// ```
    pub fn optimal(&self, rule: Option<RoundingRule>) -> Self {
        let bytes = self.magnitude * self.unit.factor();
        // NaN and negative sizes have no readable unit.
        if !(bytes >= 0.0) {
            return *self;
        }

        let unit = RoundingRule::thresholds(rule)
            .iter()
            .zip(SizeUnit::ALL)
            .find(|(limit, _)| bytes < **limit)
            .map(|(_, unit)| unit)
            .unwrap_or(SizeUnit::TeraByte);

        self.in_unit(unit)
    }

    /// Magnitude rounded to two decimals with locale separators, a space,
    /// and the translated unit designation.
    pub fn formatted(&self, ctx: &DisplayContext) -> String {
        format!(
            "{} {}",
            ctx.format_decimal(self.magnitude, 2),
            self.unit.localized_designation(ctx)
        )
    }
}

impl fmt::Display for SizeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted(&DisplayContext::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DisplayLocale, TableTranslator};

    #[test]
    fn test_size_in_converts_through_bytes() {
        let size = SizeValue::new(2.0, SizeUnit::MegaByte);
        assert_eq!(size.size_in(SizeUnit::KiloByte), 2000.0);
        assert_eq!(size.size_in(SizeUnit::Bit), 16_000_000.0);
        assert_eq!(SizeValue::new(8.0, SizeUnit::Bit).size_in(SizeUnit::Byte), 1.0);
    }

    #[test]
    fn test_optimal_round_up_file_size() {
        let size = SizeValue::from_count(990_502, SizeUnit::Byte).optimal(Some(RoundingRule::Up));
        assert_eq!(size.unit(), SizeUnit::MegaByte);
        assert_eq!(size.to_string(), "0.99 MB");
    }

    #[test]
    fn test_optimal_round_down_stays_finer() {
        let size = SizeValue::from_count(1_584_803, SizeUnit::Byte);
        let down = size.optimal(Some(RoundingRule::Down));
        assert_eq!(down.unit(), SizeUnit::KiloByte);
        assert_eq!(down.to_string(), "1,584.8 KB");

        assert_eq!(size.optimal(None).unit(), SizeUnit::MegaByte);
        assert_eq!(size.optimal(Some(RoundingRule::Up)).unit(), SizeUnit::MegaByte);
    }

    #[test]
    fn test_optimal_bit_rate_in_bits() {
        let size =
            SizeValue::from_count(1_584_803, SizeUnit::Bit).optimal(Some(RoundingRule::Down));
        assert_eq!(size.unit(), SizeUnit::KiloByte);
        assert_eq!(size.to_string(), "198.1 KB");
    }

    #[test]
    fn test_optimal_zero_is_bits_for_every_rule() {
        let zero = SizeValue::new(0.0, SizeUnit::Byte);
        for rule in [None, Some(RoundingRule::Down), Some(RoundingRule::Up)] {
            let optimal = zero.optimal(rule);
            assert_eq!(optimal.unit(), SizeUnit::Bit);
            assert_eq!(optimal.to_string(), "0 bit");
        }
    }

    #[test]
    fn test_optimal_default_ladder_boundaries() {
        let cases = [
            (0.5, SizeUnit::Bit),
            (1.0, SizeUnit::Byte),
            (999.0, SizeUnit::Byte),
            (1e3, SizeUnit::KiloByte),
            (1e6, SizeUnit::MegaByte),
            (1e9, SizeUnit::GigaByte),
            (1e12, SizeUnit::TeraByte),
            (5e15, SizeUnit::TeraByte),
        ];
        for (bytes, expected) in cases {
            let unit = SizeValue::new(bytes, SizeUnit::Byte).optimal(None).unit();
            assert_eq!(unit, expected, "{} bytes", bytes);
        }
    }

    #[test]
    fn test_optimal_up_and_down_boundaries() {
        let unit = |bytes: f64, rule| SizeValue::new(bytes, SizeUnit::Byte).optimal(rule).unit();
        let up = |bytes| unit(bytes, Some(RoundingRule::Up));
        let down = |bytes| unit(bytes, Some(RoundingRule::Down));

        assert_eq!(up(0.05), SizeUnit::Bit);
        assert_eq!(up(99.0), SizeUnit::Byte);
        assert_eq!(up(100.0), SizeUnit::KiloByte);
        assert_eq!(up(1e8), SizeUnit::GigaByte);
        assert_eq!(up(1e11), SizeUnit::TeraByte);

        assert_eq!(down(9.0), SizeUnit::Bit);
        assert_eq!(down(9_999.0), SizeUnit::Byte);
        assert_eq!(down(10_000.0), SizeUnit::KiloByte);
        assert_eq!(down(1e10), SizeUnit::GigaByte);
        assert_eq!(down(1e13), SizeUnit::TeraByte);
    }

    #[test]
    fn test_optimal_negative_is_unchanged() {
        let size = SizeValue::new(-42.0, SizeUnit::KiloByte);
        assert_eq!(size.optimal(Some(RoundingRule::Up)), size);
        assert_eq!(size.optimal(None), size);
    }

    #[test]
    fn test_formatted_with_locale_and_translation() {
        let ctx = DisplayContext::new(
            DisplayLocale {
                grouping_separator: " ".to_string(),
                decimal_separator: ",".to_string(),
                ..DisplayLocale::default()
            },
            Box::new(TableTranslator::new([("MB", "МБ")])),
        )
        .unwrap();
        let size = SizeValue::new(2_404_223_327.0, SizeUnit::Byte).in_unit(SizeUnit::MegaByte);
        assert_eq!(size.formatted(&ctx), "2 404,22 МБ");
    }
}
