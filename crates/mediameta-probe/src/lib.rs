//! # mediameta-probe
//!
//! Tolerant decoding of ffprobe JSON reports into typed metadata, and keyed
//! projection of that metadata into labeled display values.
//!
//! ## Features
//!
//! - String-encoded numbers, durations, frame rates and dates decode into
//!   typed `Option`s; missing or malformed leaves never fail a decode
//! - Structural problems (no `streams` array, no `format` object, a stream
//!   that is not an object) are reported with the offending container
//! - Every entity implements [`Projectable`]: an ordered, labeled,
//!   locale-formatted view of its fields
//!
//! ## Example
//!
//! ```
//! use mediameta_common::DisplayContext;
//! use mediameta_probe::{FormatKey, MediaMetadata, Projectable};
//!
//! let metadata: MediaMetadata = r#"{
//!     "streams": [],
//!     "format": { "nb_streams": "0", "size": "990502", "duration": "5.000000" }
//! }"#
//! .parse()?;
//!
//! let ctx = DisplayContext::default();
//! let format = metadata.format.as_dictionary(&ctx);
//! assert_eq!(format[&FormatKey::Size], "0.99 MB");
//! assert_eq!(format[&FormatKey::Duration], "0:00:05");
//! # Ok::<(), mediameta_probe::Error>(())
//! ```

pub mod coerce;
mod error;
pub mod format;
pub mod keyed;
pub mod metadata;
pub mod report;
pub mod stream;
pub mod stream_kind;

// Re-exports
pub use error::{Error, Result};
pub use format::{FormatKey, FormatMetadata, FormatTagKey, FormatTags};
pub use keyed::{FieldKey, KeyDescriptor, Projectable};
pub use metadata::MediaMetadata;
pub use report::{JsonPassthrough, ReportConverter};
pub use stream::{StreamKey, StreamMetadata, StreamTagKey, StreamTags};
pub use stream_kind::StreamKind;
