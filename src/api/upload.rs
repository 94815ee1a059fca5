use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::storage::client::StorageClient;

/// Public URL prefix for uploaded files.
pub const UPLOAD_URL_PREFIX: &str = "/uploads/";
/// Storage key prefix for uploaded files.
const UPLOAD_KEY_PREFIX: &str = "uploads/";
/// Image extensions accepted for upload, lowercase.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Response from a successful image upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// The URL path where the image can be accessed.
    pub url: String,
}

/// Store an uploaded file and return its public URL.
///
/// The name is sanitized and prefixed with a short random token so two
/// uploads of `photo.jpg` never collide.
pub async fn save_upload(
    storage: &dyn StorageClient,
    file_name: &str,
    data: Vec<u8>,
) -> Result<String, AppError> {
    let sanitized_name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect::<String>();
    let sanitized_name = sanitized_name.trim_start_matches('.');
    let sanitized_name = if sanitized_name.is_empty() {
        "upload.bin"
    } else {
        sanitized_name
    };

    let token = uuid::Uuid::new_v4().simple().to_string();
    let file_name = format!("{}_{}", &token[..8], sanitized_name);

    storage
        .put_object(&format!("{}{}", UPLOAD_KEY_PREFIX, file_name), data)
        .await?;

    Ok(format!("{}{}", UPLOAD_URL_PREFIX, file_name))
}

/// Remove the file behind an upload URL.
///
/// URLs that do not point at our uploads (external hosts, empty strings) are
/// ignored. Failures are logged; a stale file never fails the request.
pub async fn delete_upload(storage: &dyn StorageClient, url: &str) {
    let Some(file_name) = url.strip_prefix(UPLOAD_URL_PREFIX) else {
        return;
    };
    if file_name.is_empty() {
        return;
    }

    let key = format!("{}{}", UPLOAD_KEY_PREFIX, file_name);
    match storage.delete_object(&key).await {
        Ok(()) => tracing::info!("Deleted upload {}", key),
        Err(e) => tracing::error!("Failed to delete upload {}: {}", key, e),
    }
}

/// Delete every file in `old` that is not also in `keep`.
pub async fn delete_orphaned_uploads(storage: &Arc<dyn StorageClient>, old: &[&str], keep: &[&str]) {
    for url in old {
        if !keep.contains(url) {
            delete_upload(storage.as_ref(), url).await;
        }
    }
}

/// Axum handler for `POST /admin/api/upload`.
///
/// Accepts a multipart form with a single file field named "file".
pub async fn upload_image_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name != "file" {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload.bin").to_string();

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        // Only allow image types
        if !content_type.starts_with("image/") || !has_allowed_extension(&file_name) {
            return Err(AppError::BadRequest("Only image files are allowed".into()));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read file: {e}")))?;

        let url = save_upload(state.storage.as_ref(), &file_name, data.to_vec()).await?;
        tracing::info!("Stored upload {}", url);

        return Ok((StatusCode::CREATED, Json(UploadResponse { url })));
    }

    Err(AppError::BadRequest("No file field found in request".into()))
}

/// Axum handler for `GET /uploads/{filename}`.
pub async fn serve_upload_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let key = format!("{}{}", UPLOAD_KEY_PREFIX, filename);

    let data = state
        .storage
        .get_object(&key)
        .await?
        .ok_or_else(|| AppError::NotFound("File not found".into()))?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type_for(&filename)),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        data,
    )
        .into_response())
}

fn extension_of(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default()
}

fn has_allowed_extension(filename: &str) -> bool {
    ALLOWED_EXTENSIONS.contains(&extension_of(filename).as_str())
}

/// Infer content type from extension
fn content_type_for(filename: &str) -> &'static str {
    match extension_of(filename).as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
