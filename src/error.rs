// src/error.rs
// Standardized error types for pattern-server

use thiserror::Error;

/// Main error type for the patterns library.
///
/// Not-found and name-conflict outcomes are deliberately absent: those are
/// fail-soft payloads returned to the caller, not errors.
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown error: {0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// Convenience type alias for Result using PatternError
pub type Result<T> = std::result::Result<T, PatternError>;

impl From<String> for PatternError {
    fn from(s: String) -> Self {
        PatternError::Other(s)
    }
}

impl From<PatternError> for String {
    fn from(err: PatternError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_error() {
        let err = PatternError::InvalidInput("bad name".to_string());
        assert!(err.to_string().contains("invalid input"));
        assert!(err.to_string().contains("bad name"));
    }

    #[test]
    fn test_config_error() {
        let err = PatternError::Config("home directory not found".to_string());
        assert!(err.to_string().contains("configuration error"));
    }

    #[test]
    fn test_from_string() {
        let err: PatternError = "some error".to_string().into();
        assert!(matches!(err, PatternError::Other(_)));
        assert!(err.to_string().contains("some error"));
    }

    #[test]
    fn test_into_string() {
        let err = PatternError::Config("test".to_string());
        let s: String = err.into();
        assert!(s.contains("configuration error"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PatternError = io_err.into();
        assert!(matches!(err, PatternError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<i32>("not json").unwrap_err();
        let err: PatternError = json_err.into();
        assert!(matches!(err, PatternError::Json(_)));
        assert!(err.to_string().contains("JSON"));
    }
}
