//! Error types for keeplist.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using keeplist's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for keeplist operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing credential, invalid directory)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Inbox endpoint reported an application-level error code
    #[error("Inbox API error {code}: {message}")]
    Api { code: String, message: String },

    /// Attachment referenced by a note is missing on disk
    #[error("Attachment not found: {0}")]
    AttachmentNotFound(PathBuf),

    /// Attachment upload to object storage failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Build an API error from a response code and optional message.
    pub fn api(code: impl Into<String>, message: Option<String>) -> Self {
        let code = code.into();
        let message = message.unwrap_or_else(|| "no message".to_string());
        Error::Api { code, message }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("DYNALIST_TOKEN must be set".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: DYNALIST_TOKEN must be set"
        );
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("empty note".to_string());
        assert_eq!(err.to_string(), "Invalid input: empty note");
    }

    #[test]
    fn test_error_display_request() {
        let err = Error::Request("connection refused".to_string());
        assert_eq!(err.to_string(), "Request error: connection refused");
    }

    #[test]
    fn test_error_display_api() {
        let err = Error::Api {
            code: "InvalidToken".to_string(),
            message: "token rejected".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Inbox API error InvalidToken: token rejected"
        );
    }

    #[test]
    fn test_error_display_attachment_not_found() {
        let err = Error::AttachmentNotFound(PathBuf::from("photos/cat.png"));
        assert_eq!(err.to_string(), "Attachment not found: photos/cat.png");
    }

    #[test]
    fn test_error_display_storage() {
        let err = Error::Storage("bucket unreachable".to_string());
        assert_eq!(err.to_string(), "Storage error: bucket unreachable");
    }

    #[test]
    fn test_api_constructor_with_message() {
        let err = Error::api("LockFail", Some("document locked".to_string()));
        match err {
            Error::Api { code, message } => {
                assert_eq!(code, "LockFail");
                assert_eq!(message, "document locked");
            }
            _ => panic!("Expected Api error"),
        }
    }

    #[test]
    fn test_api_constructor_without_message() {
        let err = Error::api("Invalid", None);
        assert!(err.to_string().contains("no message"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => {
                assert!(!msg.is_empty());
            }
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        match err {
            Error::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
        assert!(err.to_string().contains("I/O error:"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(get_result().unwrap(), 42);
    }
}
