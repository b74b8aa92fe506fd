/// Unified error types for the Scout system.
use thiserror::Error;

/// Response class a failure maps to at the invocation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Missing/invalid input or empty discovery.
    Client,
    /// Everything else.
    Server,
}

/// Top-level error type for a fetch invocation.
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("no content: {0}")]
    NoContent(String),

    #[error("transfer error: {0}")]
    Transfer(#[from] TransferError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl ScoutError {
    /// Which response class this failure maps to.
    pub fn class(&self) -> ErrorClass {
        match self {
            ScoutError::Config(_) | ScoutError::NoContent(_) => ErrorClass::Client,
            _ => ErrorClass::Server,
        }
    }
}

/// Errors raised by the media-fetch capability itself.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("failed to spawn fetcher: {0}")]
    SpawnFailed(String),

    #[error("fetcher output ended unexpectedly: {0}")]
    StreamEnded(String),

    #[error("fetcher returned invalid JSON: {0}")]
    InvalidJson(String),

    #[error("fetcher exited with code {code}: {detail}")]
    ExitStatus { code: i32, detail: String },

    #[error("fetcher unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for Scout operations.
pub type ScoutResult<T> = Result<T, ScoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_class_errors() {
        assert_eq!(ScoutError::Config("x".into()).class(), ErrorClass::Client);
        assert_eq!(ScoutError::NoContent("x".into()).class(), ErrorClass::Client);
    }

    #[test]
    fn test_server_class_errors() {
        let transfer = ScoutError::Transfer(TransferError::SpawnFailed("gone".into()));
        assert_eq!(transfer.class(), ErrorClass::Server);
        assert_eq!(ScoutError::Unexpected("boom".into()).class(), ErrorClass::Server);

        let io = ScoutError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(io.class(), ErrorClass::Server);

        let json = ScoutError::from(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        assert_eq!(json.class(), ErrorClass::Server);
    }

    #[test]
    fn test_exit_status_message() {
        let err = TransferError::ExitStatus {
            code: 1,
            detail: "network unreachable".into(),
        };
        assert_eq!(
            err.to_string(),
            "fetcher exited with code 1: network unreachable"
        );
    }
}
