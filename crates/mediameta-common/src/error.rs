//! Error types for display configuration.

/// Common error type for mediameta.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The display locale could not be used for formatting.
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),
}

impl Error {
    /// Create a new InvalidLocale error.
    pub fn invalid_locale<S: Into<String>>(msg: S) -> Self {
        Self::InvalidLocale(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_locale("decimal separator is empty");
        assert_eq!(err.to_string(), "Invalid locale: decimal separator is empty");
    }
}
