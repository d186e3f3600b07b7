//! Container-level metadata.

use crate::coerce::lenient;
use crate::keyed::{field_keys, render_size, Projectable};
use chrono::{DateTime, FixedOffset};
use mediameta_common::{DisplayContext, RoundingRule, SizeUnit};
use serde::Deserialize;
use std::time::Duration;

/// ffprobe's `format` object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FormatMetadata {
    /// Path as given to ffprobe.
    #[serde(rename = "filename", default, deserialize_with = "lenient::text")]
    pub file_name: Option<String>,
    #[serde(rename = "nb_streams", default, deserialize_with = "lenient::int")]
    pub number_streams: Option<i64>,
    /// Comma-separated demuxer names, e.g. `mov,mp4,m4a,3gp,3g2,mj2`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub format_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub format_long_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::duration")]
    pub start_time: Option<Duration>,
    #[serde(default, deserialize_with = "lenient::duration")]
    pub duration: Option<Duration>,
    /// File size in bytes.
    #[serde(default, deserialize_with = "lenient::int")]
    pub size: Option<i64>,
    /// Overall bits per second.
    #[serde(default, deserialize_with = "lenient::int")]
    pub bit_rate: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub probe_score: Option<i64>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub tags: Option<FormatTags>,
}

field_keys! {
    /// Fields of [`FormatMetadata`].
    pub enum FormatKey {
        FileName => ("filename", "File name"),
        NumberStreams => ("nb_streams", "Number streams"),
        FormatName => ("format_name", "Format name"),
        FormatLongName => ("format_long_name", "Format long name"),
        StartTime => ("start_time", "Start time"),
        Duration => ("duration", "Duration"),
        Size => ("size", "File size"),
        BitRate => ("bit_rate", "Bit rate"),
        ProbeScore => ("probe_score", "Probe score"),
        /// Never rendered; see [`FormatMetadata::tags`].
        Tags => ("tags", "Tags"),
    }
}

impl Projectable for FormatMetadata {
    type Key = FormatKey;

    fn value_for(&self, key: FormatKey, ctx: &DisplayContext) -> Option<String> {
        match key {
            FormatKey::FileName => self.file_name.clone(),
            FormatKey::NumberStreams => self.number_streams.map(|n| ctx.format_integer(n)),
            FormatKey::FormatName => self.format_name.clone(),
            FormatKey::FormatLongName => self.format_long_name.clone(),
            FormatKey::StartTime => self.start_time.map(|d| ctx.format_hms(d)),
            FormatKey::Duration => self.duration.map(|d| ctx.format_hms(d)),
            FormatKey::Size => render_size(self.size, SizeUnit::Byte, Some(RoundingRule::Up), ctx),
            FormatKey::BitRate => {
                render_size(self.bit_rate, SizeUnit::Bit, Some(RoundingRule::Down), ctx)
            }
            FormatKey::ProbeScore => self.probe_score.map(|n| ctx.format_integer(n)),
            FormatKey::Tags => None,
        }
    }
}

/// Tags on the `format` object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FormatTags {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    /// Muxing application, e.g. `Lavf60.3.100`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub encoder: Option<String>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub creation_time: Option<DateTime<FixedOffset>>,
}

field_keys! {
    /// Fields of [`FormatTags`].
    pub enum FormatTagKey {
        Title => ("title", "Title"),
        Encoder => ("encoder", "Encoder"),
        CreationTime => ("creation_time", "Creation time"),
    }
}

impl Projectable for FormatTags {
    type Key = FormatTagKey;

    fn value_for(&self, key: FormatTagKey, ctx: &DisplayContext) -> Option<String> {
        match key {
            FormatTagKey::Title => self.title.clone(),
            FormatTagKey::Encoder => self.encoder.clone(),
            FormatTagKey::CreationTime => self.creation_time.map(|date| ctx.format_datetime(&date)),
        }
    }
}
