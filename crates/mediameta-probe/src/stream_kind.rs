//! Codec type of a stream.

use crate::Error;
use mediameta_common::DisplayContext;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of elementary stream, from ffprobe's `codec_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    /// Video stream.
    Video,
    /// Audio stream.
    Audio,
    /// Data stream (timecode, chapters, etc.).
    Data,
    /// Subtitle stream.
    Subtitle,
}

impl StreamKind {
    /// Every kind, in wire order.
    pub const ALL: [StreamKind; 4] = [Self::Video, Self::Audio, Self::Data, Self::Subtitle];

    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Data => "data",
            Self::Subtitle => "subtitle",
        }
    }

    /// English display name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Data => "Data",
            Self::Subtitle => "Subtitle",
        }
    }

    /// Display name passed through the context's translator.
    pub fn localized_label(self, ctx: &DisplayContext) -> String {
        ctx.text(self.label())
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StreamKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownStreamKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediameta_common::{DisplayLocale, TableTranslator};

    #[test]
    fn test_from_str() {
        assert_eq!("video".parse::<StreamKind>().unwrap(), StreamKind::Video);
        assert_eq!("subtitle".parse::<StreamKind>().unwrap(), StreamKind::Subtitle);
        assert!("attachment".parse::<StreamKind>().is_err());
        assert!("Video".parse::<StreamKind>().is_err());
    }

    #[test]
    fn test_display_is_capitalized() {
        assert_eq!(StreamKind::Audio.to_string(), "Audio");
        assert_eq!(StreamKind::Data.as_str(), "data");
    }

    #[test]
    fn test_localized_label() {
        let ctx = DisplayContext::new(
            DisplayLocale::default(),
            Box::new(TableTranslator::new([("Video", "Видео")])),
        )
        .unwrap();
        assert_eq!(StreamKind::Video.localized_label(&ctx), "Видео");
        assert_eq!(StreamKind::Audio.localized_label(&ctx), "Audio");
    }

    #[test]
    fn test_serde_lowercase() {
        let kind: StreamKind = serde_json::from_str("\"data\"").unwrap();
        assert_eq!(kind, StreamKind::Data);
        assert_eq!(serde_json::to_string(&StreamKind::Subtitle).unwrap(), "\"subtitle\"");
    }
}
