//! Error types for the Stockyard SDK

use thiserror::Error;

/// What kind of failure a request ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Missing or invalid credential (401)
    AuthenticationRequired,
    /// Credential valid but not an admin (403)
    AuthorizationDenied,
    NotFound,
    /// A required field is missing or malformed (400/422)
    ValidationFailed,
    /// Duplicate slug (409)
    UniquenessConflict,
    /// Network failure, timeout or unreadable response
    Transport,
    /// Asset upload rejected or failed
    UploadFailure,
    /// Any other server-side failure (5xx)
    Server,
}

/// A failed API call, carrying one human-readable message.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: ErrorCode,
    pub message: String,
    /// HTTP status, when a response was received
    pub status: Option<u16>,
}

pub type Result<T> = std::result::Result<T, ClientError>;

pub fn map_status_to_error_code(status: u16) -> ErrorCode {
    match status {
        401 => ErrorCode::AuthenticationRequired,
        403 => ErrorCode::AuthorizationDenied,
        404 => ErrorCode::NotFound,
        400 | 422 => ErrorCode::ValidationFailed,
        409 => ErrorCode::UniquenessConflict,
        _ => ErrorCode::Server,
    }
}

impl ClientError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Transport, message)
    }

    /// Build from a non-2xx response. `server_message` is the `message`
    /// field of the error body, if the body had one.
    pub fn from_response(status: u16, server_message: Option<String>) -> Self {
        let message = server_message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status code {}", status));
        Self {
            code: map_status_to_error_code(status),
            message,
            status: Some(status),
        }
    }

    /// Reclassify as an upload failure, keeping auth failures as they are.
    pub fn into_upload_failure(mut self) -> Self {
        if !matches!(
            self.code,
            ErrorCode::AuthenticationRequired | ErrorCode::AuthorizationDenied
        ) {
            self.code = ErrorCode::UploadFailure;
        }
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// The single string shown to the user.
    pub fn message(&self) -> &str {
        &self.message
    }
}
