use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// User-facing error messages shared by handlers, middleware and validation.
pub mod msg {
    pub const PRODUCT_NOT_FOUND: &str = "Product not found";
    pub const REVIEW_NOT_FOUND: &str = "Review not found";
    pub const PRODUCT_CREATED: &str = "Product Created";
    pub const SLUG_TAKEN: &str = "Slug already exists";
    pub const SLUG_INVALID: &str = "Slug may only contain lowercase letters, digits and hyphens";

    pub const TOKEN_MISSING: &str = "Token is not supplied";
    pub const TOKEN_INVALID: &str = "Token is not valid";
    pub const NOT_ADMIN: &str = "User is not admin";

    pub const NO_FILE: &str = "No file uploaded";
    pub const NOT_AN_IMAGE: &str = "Only image uploads are accepted";
    pub const UPLOAD_FAILED: &str = "Upload failed";

    pub const RATING_RANGE: &str = "Rating must be between 0 and 5";
    pub const COMMENT_EMPTY: &str = "Comment is required";
    pub const EMAIL_EMPTY: &str = "Email is required";
    pub const NAME_EMPTY: &str = "Name is required";

    pub const INTERNAL: &str = "Internal server error";
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => {
                tracing::debug!("Rejected unauthenticated request: {}", msg);
                (StatusCode::UNAUTHORIZED, msg)
            }
            AppError::Forbidden(msg) => {
                tracing::debug!("Rejected unauthorized request: {}", msg);
                (StatusCode::FORBIDDEN, msg)
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Upload(detail) => {
                tracing::error!("Upload error: {}", detail);
                (StatusCode::BAD_GATEWAY, msg::UPLOAD_FAILED.to_string())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, msg::INTERNAL.to_string())
            }
            AppError::Pool(e) => {
                tracing::error!("Pool error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, msg::INTERNAL.to_string())
            }
            AppError::Json(e) => {
                tracing::error!("JSON error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, msg::INTERNAL.to_string())
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, msg::INTERNAL.to_string())
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Turns a missing row into a 404 with the given message.
pub trait OrNotFound<T> {
    fn or_not_found(self, message: &str) -> Result<T>;
}

impl<T> OrNotFound<T> for Option<T> {
    fn or_not_found(self, message: &str) -> Result<T> {
        self.ok_or_else(|| AppError::NotFound(message.to_string()))
    }
}
