//! Mediameta-Common: units, display locale, and translation.
//!
//! This crate provides the pieces shared by every mediameta projection:
//!
//! - **Size Units**: a magnitude tagged with a decimal size unit, with
//!   policy-driven selection of the most readable unit
//! - **Display Locale**: grouping/decimal separators, display UTC offset and
//!   date pattern, validated once and shared by reference
//! - **Translation**: the `Translator` lookup used for labels and unit
//!   designations, degrading to the English text when no entry exists
//!
//! # Examples
//!
//! ```
//! use mediameta_common::{DisplayContext, RoundingRule, SizeUnit, SizeValue};
//!
//! let ctx = DisplayContext::default();
//! let size = SizeValue::new(990_502.0, SizeUnit::Byte).optimal(Some(RoundingRule::Up));
//! assert_eq!(size.unit(), SizeUnit::MegaByte);
//! assert_eq!(size.formatted(&ctx), "0.99 MB");
//! ```

pub mod error;
pub mod locale;
pub mod size;

pub use error::{Error, Result};
pub use locale::{
    parse_utc_offset, DisplayContext, DisplayLocale, FallbackTranslator, TableTranslator,
    Translator,
};
pub use size::{RoundingRule, SizeUnit, SizeValue};
