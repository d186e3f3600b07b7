//! Per-stream metadata.

use crate::coerce::lenient;
use crate::keyed::{field_keys, render_size, Projectable};
use crate::StreamKind;
use chrono::{DateTime, FixedOffset};
use mediameta_common::{DisplayContext, RoundingRule, SizeUnit};
use serde::Deserialize;
use std::time::Duration;

/// One elementary stream from ffprobe's `streams` array.
///
/// Every field is optional; ffprobe omits whatever does not apply to the
/// stream's codec type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StreamMetadata {
    /// Stream index within the container.
    #[serde(default, deserialize_with = "lenient::int")]
    pub index: Option<i64>,
    /// Short codec name, e.g. `h264`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub codec_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub codec_long_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub profile: Option<String>,
    /// `None` when missing or outside the four known kinds.
    #[serde(rename = "codec_type", default, deserialize_with = "lenient::stream_kind")]
    pub kind: Option<StreamKind>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub codec_tag_string: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub width: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub height: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub color_range: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub color_space: Option<String>,
    /// e.g. `16:9`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub display_aspect_ratio: Option<String>,
    /// e.g. `yuv420p`.
    #[serde(rename = "pix_fmt", default, deserialize_with = "lenient::text")]
    pub pixel_format: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub field_order: Option<String>,
    /// Frames per second, from `r_frame_rate`.
    #[serde(rename = "r_frame_rate", default, deserialize_with = "lenient::frame_rate")]
    pub frame_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::duration")]
    pub duration: Option<Duration>,
    #[serde(default, deserialize_with = "lenient::duration")]
    pub start_time: Option<Duration>,
    /// Bits per second.
    #[serde(default, deserialize_with = "lenient::int")]
    pub bit_rate: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub bits_per_raw_sample: Option<i64>,
    /// Kept as text; ffprobe reports it verbatim from the container.
    #[serde(rename = "nb_frames", default, deserialize_with = "lenient::text")]
    pub number_frames: Option<String>,
    /// Hertz.
    #[serde(default, deserialize_with = "lenient::int")]
    pub sample_rate: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub channels: Option<i64>,
    /// e.g. `5.1(side)`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub channel_layout: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub bits_per_sample: Option<i64>,
    /// e.g. `1/1000`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub time_base: Option<String>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub tags: Option<StreamTags>,
}

field_keys! {
    /// Fields of [`StreamMetadata`].
    pub enum StreamKey {
        Index => ("index", "Index"),
        CodecName => ("codec_name", "Codec name"),
        CodecLongName => ("codec_long_name", "Codec long name"),
        Profile => ("profile", "Profile"),
        CodecType => ("codec_type", "Codec type"),
        CodecTagString => ("codec_tag_string", "Codec tag string"),
        Width => ("width", "Width"),
        Height => ("height", "Height"),
        ColorRange => ("color_range", "Color range"),
        ColorSpace => ("color_space", "Color space"),
        DisplayAspectRatio => ("display_aspect_ratio", "Aspect ratio"),
        PixelFormat => ("pix_fmt", "Pixel format"),
        FieldOrder => ("field_order", "Field order"),
        FrameRate => ("r_frame_rate", "Frame rate"),
        Duration => ("duration", "Duration"),
        StartTime => ("start_time", "Start time"),
        BitRate => ("bit_rate", "Bit rate"),
        BitsPerRawSample => ("bits_per_raw_sample", "Bits per raw sample"),
        NumberFrames => ("nb_frames", "Number frames"),
        SampleRate => ("sample_rate", "Sample rate"),
        Channels => ("channels", "Channels"),
        ChannelLayout => ("channel_layout", "Channel layout"),
        BitsPerSample => ("bits_per_sample", "Bits per sample"),
        TimeBase => ("time_base", "Time base"),
        /// Never rendered; see [`StreamMetadata::tags`].
        Tags => ("tags", "Tags"),
    }
}

impl StreamMetadata {
    /// Whether the stream is of `kind`.
    pub fn is(&self, kind: StreamKind) -> bool {
        self.kind == Some(kind)
    }
}

impl Projectable for StreamMetadata {
    type Key = StreamKey;

    fn value_for(&self, key: StreamKey, ctx: &DisplayContext) -> Option<String> {
        let int = |value: Option<i64>| value.map(|v| ctx.format_integer(v));
        let bits = |value: Option<i64>| {
            render_size(value, SizeUnit::Bit, Some(RoundingRule::Down), ctx)
        };

        match key {
            StreamKey::Index => int(self.index),
            StreamKey::CodecName => self.codec_name.clone(),
            StreamKey::CodecLongName => self.codec_long_name.clone(),
            StreamKey::Profile => self.profile.clone(),
            StreamKey::CodecType => self.kind.map(|kind| kind.localized_label(ctx)),
            StreamKey::CodecTagString => self.codec_tag_string.clone(),
            StreamKey::Width => int(self.width),
            StreamKey::Height => int(self.height),
            StreamKey::ColorRange => self.color_range.clone(),
            StreamKey::ColorSpace => self.color_space.clone(),
            StreamKey::DisplayAspectRatio => self.display_aspect_ratio.clone(),
            StreamKey::PixelFormat => self.pixel_format.clone(),
            StreamKey::FieldOrder => self.field_order.clone(),
            StreamKey::FrameRate => self.frame_rate.map(|rate| ctx.format_decimal(rate, 3)),
            StreamKey::Duration => self.duration.map(|d| ctx.format_hms(d)),
            StreamKey::StartTime => self.start_time.map(|d| ctx.format_hms(d)),
            StreamKey::BitRate => {
                render_size(self.bit_rate, SizeUnit::Byte, Some(RoundingRule::Down), ctx)
            }
            StreamKey::BitsPerRawSample => bits(self.bits_per_raw_sample),
            StreamKey::NumberFrames => self.number_frames.clone(),
            StreamKey::SampleRate => self.sample_rate.map(|hz| ctx.format_hertz(hz)),
            StreamKey::Channels => int(self.channels),
            StreamKey::ChannelLayout => self.channel_layout.clone(),
            StreamKey::BitsPerSample => bits(self.bits_per_sample),
            StreamKey::TimeBase => self.time_base.clone(),
            StreamKey::Tags => None,
        }
    }
}

/// Container-level tags attached to a stream.
///
/// The upper-case fields are written by mkvmerge into Matroska statistics
/// tags.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StreamTags {
    /// ISO 639-2 language code.
    #[serde(default, deserialize_with = "lenient::text")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    /// Verbatim, e.g. `00:47:09.622000000`.
    #[serde(rename = "DURATION", default, deserialize_with = "lenient::text")]
    pub duration: Option<String>,
    #[serde(rename = "NUMBER_OF_FRAMES", default, deserialize_with = "lenient::int")]
    pub number_of_frames: Option<i64>,
    #[serde(rename = "NUMBER_OF_BYTES", default, deserialize_with = "lenient::int")]
    pub number_of_bytes: Option<i64>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub creation_time: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub handler_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub vendor_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub encoder: Option<String>,
    /// e.g. `01:00:00:00`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub timecode: Option<String>,
}

field_keys! {
    /// Fields of [`StreamTags`].
    pub enum StreamTagKey {
        Language => ("language", "Language"),
        Title => ("title", "Title"),
        Duration => ("DURATION", "Duration"),
        NumberOfFrames => ("NUMBER_OF_FRAMES", "Number of frames"),
        NumberOfBytes => ("NUMBER_OF_BYTES", "Size"),
        CreationTime => ("creation_time", "Creation time"),
        HandlerName => ("handler_name", "Handler name"),
        VendorId => ("vendor_id", "Vendor ID"),
        Encoder => ("encoder", "Encoder"),
        Timecode => ("timecode", "Timecode"),
    }
}

impl Projectable for StreamTags {
    type Key = StreamTagKey;

    fn value_for(&self, key: StreamTagKey, ctx: &DisplayContext) -> Option<String> {
        match key {
            StreamTagKey::Language => self.language.clone(),
            StreamTagKey::Title => self.title.clone(),
            StreamTagKey::Duration => self.duration.clone(),
            StreamTagKey::NumberOfFrames => self.number_of_frames.map(|n| ctx.format_integer(n)),
            StreamTagKey::NumberOfBytes => {
                render_size(self.number_of_bytes, SizeUnit::Byte, None, ctx)
            }
            StreamTagKey::CreationTime => self.creation_time.map(|date| ctx.format_datetime(&date)),
            StreamTagKey::HandlerName => self.handler_name.clone(),
            StreamTagKey::VendorId => self.vendor_id.clone(),
            StreamTagKey::Encoder => self.encoder.clone(),
            StreamTagKey::Timecode => self.timecode.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyed::FieldKey;
    use serde_json::json;

    fn video_stream() -> StreamMetadata {
        serde_json::from_value(json!({
            "index": 0,
            "codec_name": "h264",
            "codec_type": "video",
            "width": 1920,
            "height": 1080,
            "pix_fmt": "yuv420p",
            "r_frame_rate": "24/1",
            "duration": "5.000000",
            "bit_rate": "1584803",
            "bits_per_raw_sample": "8",
            "nb_frames": "120",
            "tags": { "language": "und", "handler_name": "VideoHandler" }
        }))
        .unwrap()
    }

    #[test]
    fn test_decode_video_stream() {
        let stream = video_stream();
        assert_eq!(stream.kind, Some(StreamKind::Video));
        assert!(stream.is(StreamKind::Video));
        assert_eq!(stream.width, Some(1920));
        assert_eq!(stream.frame_rate, Some(24.0));
        assert_eq!(stream.duration, Some(Duration::from_secs(5)));
        assert_eq!(stream.bits_per_raw_sample, Some(8));
        assert_eq!(stream.number_frames.as_deref(), Some("120"));
        assert_eq!(stream.tags.unwrap().handler_name.as_deref(), Some("VideoHandler"));
    }

    #[test]
    fn test_unknown_codec_type_only_drops_the_field() {
        let stream: StreamMetadata = serde_json::from_value(json!({
            "codec_type": "attachment",
            "codec_name": "ttf"
        }))
        .unwrap();
        assert_eq!(stream.kind, None);
        assert_eq!(stream.codec_name.as_deref(), Some("ttf"));
    }

    #[test]
    fn test_malformed_fields_decode_as_absent() {
        let stream: StreamMetadata = serde_json::from_value(json!({
            "width": "wide",
            "r_frame_rate": "0/0",
            "duration": "0.56.22",
            "codec_name": 264,
            "sample_rate": "N/A"
        }))
        .unwrap();
        assert_eq!(stream, StreamMetadata::default());
    }

    #[test]
    fn test_tags_must_be_an_object() {
        let result = serde_json::from_value::<StreamMetadata>(json!({ "tags": "none" }));
        assert!(result.is_err());
        let stream: StreamMetadata = serde_json::from_value(json!({ "tags": null })).unwrap();
        assert!(stream.tags.is_none());
    }

    #[test]
    fn test_projection_of_video_stream() {
        let ctx = DisplayContext::default();
        let dictionary = video_stream().as_dictionary(&ctx);

        assert_eq!(dictionary[&StreamKey::CodecType], "Video");
        assert_eq!(dictionary[&StreamKey::Width], "1,920");
        assert_eq!(dictionary[&StreamKey::FrameRate], "24");
        assert_eq!(dictionary[&StreamKey::Duration], "0:00:05");
        assert_eq!(dictionary[&StreamKey::BitRate], "1,584.8 KB");
        assert_eq!(dictionary[&StreamKey::BitsPerRawSample], "8 bit");
        assert!(!dictionary.contains_key(&StreamKey::Tags));
        assert!(!dictionary.contains_key(&StreamKey::SampleRate));
    }

    #[test]
    fn test_projection_of_audio_fields() {
        let ctx = DisplayContext::default();
        let stream: StreamMetadata = serde_json::from_value(json!({
            "codec_type": "audio",
            "sample_rate": "48000",
            "channels": 6,
            "channel_layout": "5.1(side)",
            "bits_per_sample": 0
        }))
        .unwrap();
        assert_eq!(stream.value_for(StreamKey::SampleRate, &ctx).as_deref(), Some("48,000 Hz"));
        assert_eq!(stream.value_for(StreamKey::Channels, &ctx).as_deref(), Some("6"));
        assert_eq!(stream.value_for(StreamKey::BitsPerSample, &ctx).as_deref(), Some("0 bit"));
    }

    #[test]
    fn test_bit_rate_counts_bytes_but_sample_depths_count_bits() {
        let ctx = DisplayContext::default();
        let stream: StreamMetadata = serde_json::from_value(json!({
            "bit_rate": "1584803",
            "bits_per_raw_sample": "1584803"
        }))
        .unwrap();
        assert_eq!(
            stream.value_for(StreamKey::BitRate, &ctx).as_deref(),
            Some("1,584.8 KB")
        );
        assert_eq!(
            stream.value_for(StreamKey::BitsPerRawSample, &ctx).as_deref(),
            Some("198.1 KB")
        );
    }

    #[test]
    fn test_stream_tags_projection() {
        let ctx = DisplayContext::default();
        let tags: StreamTags = serde_json::from_value(json!({
            "language": "eng",
            "DURATION": "00:47:09.622000000",
            "NUMBER_OF_FRAMES": "67843",
            "NUMBER_OF_BYTES": "2404223327",
            "creation_time": "2023-11-29T14:41:04.000000Z"
        }))
        .unwrap();
        let dictionary = tags.as_dictionary(&ctx);
        assert_eq!(dictionary[&StreamTagKey::NumberOfFrames], "67,843");
        assert_eq!(dictionary[&StreamTagKey::NumberOfBytes], "2.4 GB");
        assert_eq!(dictionary[&StreamTagKey::Duration], "00:47:09.622000000");
        assert_eq!(dictionary[&StreamTagKey::CreationTime], "Nov 29, 2023 14:41:04");
        assert_eq!(dictionary.len(), 5);
    }

    #[test]
    fn test_key_ids_are_wire_names() {
        assert_eq!(StreamKey::PixelFormat.id(), "pix_fmt");
        assert_eq!(StreamKey::FrameRate.id(), "r_frame_rate");
        assert_eq!(StreamKey::from_id("nb_frames"), Some(StreamKey::NumberFrames));
        assert_eq!(StreamTagKey::NumberOfBytes.id(), "NUMBER_OF_BYTES");
        assert_eq!(StreamKey::Tags.index(), StreamKey::ALL.len() - 1);
    }
}
