//! The top-level probe report.

use crate::coerce::json_kind;
use crate::report::ReportConverter;
use crate::{Error, FormatMetadata, Result, StreamKind, StreamMetadata};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Decoded ffprobe report: every stream plus the container format.
///
/// Two reports compare equal when they describe the same file name; the
/// rest of the content is ignored. Compare [`Self::streams`] and
/// [`Self::format`] directly for a structural comparison.
#[derive(Debug, Clone)]
pub struct MediaMetadata {
    /// Streams in container order.
    pub streams: Vec<StreamMetadata>,
    /// Container format.
    pub format: FormatMetadata,
}

impl MediaMetadata {
    /// Decode a report from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    /// Decode a report from an already-parsed JSON value.
    ///
    /// `streams` must be an array (possibly empty) and `format` an object;
    /// the error names whichever container is wrong.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut document = match value {
            Value::Object(map) => map,
            other => {
                return Err(Error::structure(
                    "document",
                    format!("expected an object, found {}", json_kind(&other)),
                ))
            }
        };

        let streams = match document.remove("streams") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(Error::structure(
                    "streams",
                    format!("expected an array, found {}", json_kind(&other)),
                ))
            }
            None => return Err(Error::structure("streams", "missing")),
        };

        let format = match document.remove("format") {
            Some(value @ Value::Object(_)) => FormatMetadata::deserialize(value)
                .map_err(|e| Error::structure("format", e.to_string()))?,
            Some(other) => {
                return Err(Error::structure(
                    "format",
                    format!("expected an object, found {}", json_kind(&other)),
                ))
            }
            None => return Err(Error::structure("format", "missing")),
        };

        let streams = streams
            .into_iter()
            .enumerate()
            .map(|(i, item)| decode_stream(i, item))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            streams = streams.len(),
            file = format.file_name.as_deref().unwrap_or("<unnamed>"),
            "decoded media metadata"
        );

        Ok(Self { streams, format })
    }

    /// Convert a probe tool's text report with `converter`, then decode it.
    pub fn from_report<C>(text: &str, converter: &C) -> Result<Self>
    where
        C: ReportConverter + ?Sized,
    {
        let json = converter.raw_text_to_json(text).ok_or(Error::Conversion)?;
        Self::from_slice(&json)
    }

    /// File name from the format section.
    pub fn file_name(&self) -> Option<&str> {
        self.format.file_name.as_deref()
    }

    /// Streams of one kind, in container order.
    pub fn streams_of(&self, kind: StreamKind) -> impl Iterator<Item = &StreamMetadata> {
        self.streams.iter().filter(move |stream| stream.is(kind))
    }

    /// First video stream, if any.
    pub fn primary_video(&self) -> Option<&StreamMetadata> {
        self.streams_of(StreamKind::Video).next()
    }
}

fn decode_stream(position: usize, item: Value) -> Result<StreamMetadata> {
    let container = format!("streams[{}]", position);
    if !item.is_object() {
        return Err(Error::structure(
            container,
            format!("expected an object, found {}", json_kind(&item)),
        ));
    }
    StreamMetadata::deserialize(item).map_err(|e| Error::structure(container, e.to_string()))
}

impl FromStr for MediaMetadata {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_slice(s.as_bytes())
    }
}

impl<'de> Deserialize<'de> for MediaMetadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(de::Error::custom)
    }
}

impl PartialEq for MediaMetadata {
    fn eq(&self, other: &Self) -> bool {
        self.format.file_name == other.format.file_name
    }
}

impl Eq for MediaMetadata {}

impl Hash for MediaMetadata {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.format.file_name.hash(state);
    }
}
