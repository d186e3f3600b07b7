//! Error types for mediameta-probe.

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding a probe report.
///
/// Only structural problems surface here. Leaf fields that are missing or
/// malformed decode to `None` instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required container is missing or has the wrong JSON type.
    #[error("failed to decode {container}: {message}")]
    Structure { container: String, message: String },

    /// The text-to-JSON converter produced nothing.
    #[error("report conversion produced no JSON")]
    Conversion,

    /// A codec type outside video/audio/data/subtitle.
    #[error("unknown stream kind: {0}")]
    UnknownStreamKind(String),
}

impl Error {
    /// Create a structural decode error for `container`.
    pub fn structure(container: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Structure {
            container: container.into(),
            message: message.into(),
        }
    }
}
