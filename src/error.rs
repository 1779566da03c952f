// src/error.rs
//! Error types for the feed, configuration and command line surfaces
//!
//! Coordinate conversions themselves never fail; see `diagnostic`.

use std::fmt;

pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Debug)]
pub enum CodecError {
    Io(std::io::Error),
    Serial(tokio_serial::Error),
    Json(serde_json::Error),
    Config(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Io(e) => write!(f, "IO error: {}", e),
            CodecError::Serial(e) => write!(f, "Serial error: {}", e),
            CodecError::Json(e) => write!(f, "JSON error: {}", e),
            CodecError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Io(e) => Some(e),
            CodecError::Serial(e) => Some(e),
            CodecError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CodecError {
    fn from(error: std::io::Error) -> Self {
        CodecError::Io(error)
    }
}

impl From<tokio_serial::Error> for CodecError {
    fn from(error: tokio_serial::Error) -> Self {
        CodecError::Serial(error)
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(error: serde_json::Error) -> Self {
        CodecError::Json(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display() {
        let err = CodecError::Config("ambiguity must be 0-4".to_string());
        assert_eq!(err.to_string(), "Configuration error: ambiguity must be 0-4");
    }

    #[test]
    fn test_from_io_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CodecError = io.into();
        assert!(matches!(err, CodecError::Io(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CodecError = json_err.into();
        assert!(err.to_string().starts_with("JSON error:"));
    }

    #[test]
    fn test_from_serial_keeps_source() {
        let serial = tokio_serial::Error::new(tokio_serial::ErrorKind::NoDevice, "no receiver");
        let err: CodecError = serial.into();
        assert!(matches!(err, CodecError::Serial(_)));
        assert_eq!(err.to_string(), "Serial error: no receiver");
        assert!(err.source().is_some());
    }
}
