//! Error types for the merge-and-download client.

use remap_core::DOWNLOAD_FAILED_MESSAGE;
use thiserror::Error;

/// Errors that can occur while fetching or saving a merged file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MergeError {
    /// The merge service could not be reached or the transfer broke off.
    #[error("network error: {0}")]
    Network(String),

    /// The merge service answered with a non-success status.
    #[error("merge service returned {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        message: String,
    },

    /// The configured server URL cannot address the merge endpoint.
    #[error("invalid server URL: {0}")]
    InvalidUrl(String),

    /// The download name has no usable file name component.
    #[error("invalid download name: {0:?}")]
    InvalidFilename(String),

    /// I/O error while saving the merged file.
    #[error("I/O error: {0}")]
    Io(String),

    /// Failed to serialize the mapping payload.
    #[error("JSON error: {0}")]
    Json(String),
}

impl MergeError {
    /// Message suitable for a transient notification.
    ///
    /// Server errors surface the response body verbatim.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Server { .. } => DOWNLOAD_FAILED_MESSAGE.to_string(),
            Self::Network(detail) => format!("Could not reach the merge service: {detail}"),
            Self::Io(detail) => format!("Could not save the merged file: {detail}"),
            Self::InvalidUrl(_) | Self::InvalidFilename(_) | Self::Json(_) => {
                DOWNLOAD_FAILED_MESSAGE.to_string()
            }
        }
    }
}

impl From<reqwest::Error> for MergeError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<std::io::Error> for MergeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MergeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_body_is_shown_verbatim() {
        let err = MergeError::Server {
            status: 500,
            message: "bad mapping".to_string(),
        };
        assert_eq!(err.user_message(), "bad mapping");
    }

    #[test]
    fn empty_server_body_falls_back() {
        let err = MergeError::Server {
            status: 502,
            message: String::new(),
        };
        assert_eq!(err.user_message(), DOWNLOAD_FAILED_MESSAGE);
    }

    #[test]
    fn network_error_mentions_service() {
        let err = MergeError::Network("connection refused".to_string());
        assert!(err.user_message().contains("merge service"));
        assert!(err.user_message().contains("connection refused"));
    }
}
