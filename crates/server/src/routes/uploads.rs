//! Image upload handler.
//!
//! Accepts a single multipart image, writes it under the configured upload
//! directory with a random filename, and returns the URL it is served from.

use axum::extract::{Multipart, State};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::CurrentAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Upload size cap, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Request-body limit for the upload route: the cap plus headroom for
/// multipart framing. Must be installed as a `DefaultBodyLimit` on the
/// route, otherwise the framework's smaller default limit rejects uploads
/// well under [`MAX_UPLOAD_BYTES`].
pub const MAX_UPLOAD_BODY_BYTES: usize = MAX_UPLOAD_BYTES + 64 * 1024;

/// Accepted content types and the extension each is stored with.
const ALLOWED_TYPES: [(&str, &str); 4] = [
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
    ("image/gif", "gif"),
];

fn extension_for(content_type: &str) -> Option<&'static str> {
    ALLOWED_TYPES
        .iter()
        .find(|(mime, _)| *mime == content_type)
        .map(|(_, ext)| *ext)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    /// Path the file is served from, e.g. `/uploads/<uuid>.png`.
    pub url: String,
}

/// POST /api/uploads
#[instrument(skip_all, fields(admin = admin.id.as_i32()))]
pub async fn upload(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    mut multipart: Multipart,
) -> Result<ApiResponse<UploadResult>, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
        .ok_or_else(|| AppError::BadRequest("No file provided".to_owned()))?;

    let content_type = field
        .content_type()
        .ok_or_else(|| AppError::BadRequest("Missing content type".to_owned()))?
        .to_owned();
    let extension = extension_for(&content_type).ok_or_else(|| {
        AppError::BadRequest(format!("Unsupported content type: {content_type}"))
    })?;

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Empty file".to_owned()));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::BadRequest(
            "File exceeds the 5 MiB upload limit".to_owned(),
        ));
    }

    let filename = format!("{}.{extension}", Uuid::new_v4());
    let dir = std::path::PathBuf::from(&state.config().upload_dir);
    let path = dir.join(&filename);

    tokio::fs::create_dir_all(&dir).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to create upload directory");
        AppError::Internal("Failed to store upload".to_owned())
    })?;
    tokio::fs::write(&path, &data).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to write upload");
        AppError::Internal("Failed to store upload".to_owned())
    })?;

    tracing::info!(file = %filename, bytes = data.len(), "Stored upload");
    Ok(ApiResponse::created(
        "File uploaded",
        UploadResult {
            url: format!("/uploads/{filename}"),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_lookup() {
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("image/webp"), Some("webp"));
        assert_eq!(extension_for("application/pdf"), None);
    }
}
