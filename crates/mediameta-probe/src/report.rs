//! Conversion of probe text reports into JSON.
//!
//! Turning a tool's plain-text report into JSON is the caller's business.
//! [`MediaMetadata::from_report`](crate::MediaMetadata::from_report) only
//! needs something implementing [`ReportConverter`]; any
//! `Fn(&str) -> Option<Vec<u8>>` closure does.

/// Converts a probe tool's text report into JSON bytes.
pub trait ReportConverter {
    /// Return the report as JSON, or `None` if it cannot be converted.
    fn raw_text_to_json(&self, text: &str) -> Option<Vec<u8>>;
}

impl<F> ReportConverter for F
where
    F: Fn(&str) -> Option<Vec<u8>>,
{
    fn raw_text_to_json(&self, text: &str) -> Option<Vec<u8>> {
        self(text)
    }
}

/// Converter for reports that are already JSON, such as the output of
/// `ffprobe -print_format json -show_format -show_streams`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPassthrough;

impl ReportConverter for JsonPassthrough {
    fn raw_text_to_json(&self, text: &str) -> Option<Vec<u8>> {
        let text = text.trim();
        if text.starts_with('{') {
            Some(text.as_bytes().to_vec())
        } else {
            tracing::debug!("report does not look like a JSON object");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_accepts_json_objects() {
        assert_eq!(
            JsonPassthrough.raw_text_to_json("  {\"format\": {}}\n"),
            Some(b"{\"format\": {}}".to_vec())
        );
        assert_eq!(JsonPassthrough.raw_text_to_json("Input #0, matroska"), None);
        assert_eq!(JsonPassthrough.raw_text_to_json(""), None);
    }

    #[test]
    fn test_closures_are_converters() {
        let upper = |text: &str| Some(text.to_uppercase().into_bytes());
        assert_eq!(upper.raw_text_to_json("ab"), Some(b"AB".to_vec()));
    }
}
