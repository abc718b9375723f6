use axum::extract::{Extension, State};
use serde::Serialize;

use crate::assets::image_extension;
use crate::db::AppState;
use crate::error::{AppError, Result, msg};
use crate::extractors::{Json, Multipart};
use crate::middleware::AuthContext;

/// Multipart field carrying the file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub secure_url: String,
}

/// Store the `file` part of a multipart body and return its public URL.
pub async fn upload_asset(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Multipart(mut multipart): Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        // The stored name comes from the declared type, never the client's file name
        let extension = field
            .content_type()
            .and_then(image_extension)
            .ok_or_else(|| AppError::BadRequest(msg::NOT_AN_IMAGE.into()))?;

        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(AppError::BadRequest(msg::NO_FILE.into()));
        }

        let asset = state.assets.store(extension, &bytes)?;
        tracing::info!(
            user_id = %ctx.user.id,
            key_prefix = %ctx.key_prefix,
            url = %asset.secure_url,
            "Asset uploaded"
        );
        return Ok(Json(UploadResponse {
            secure_url: asset.secure_url,
        }));
    }

    Err(AppError::BadRequest(msg::NO_FILE.into()))
}
