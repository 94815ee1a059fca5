use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::records::ReorderRequest;
use crate::api::upload::delete_upload;
use crate::db::models::Photo;
use crate::error::AppError;
use crate::state::AppState;

fn gallery_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("gallery '{}' not found", id))
}

/// `POST /admin/api/galleries/{id}/photos`
pub async fn add_photo_handler(
    State(state): State<AppState>,
    Path(gallery_id): Path<String>,
    Json(photo): Json<Photo>,
) -> Result<(StatusCode, Json<Photo>), AppError> {
    if photo.url.trim().is_empty() {
        return Err(AppError::BadRequest("Photo url is required".into()));
    }
    if state.galleries.get_by_id(&gallery_id).await.is_none() {
        return Err(gallery_not_found(&gallery_id));
    }

    let photo = state
        .galleries
        .add_photo(&gallery_id, photo)
        .await
        .ok_or_else(|| AppError::Storage("Failed to save gallery".into()))?;

    Ok((StatusCode::CREATED, Json(photo)))
}

/// `DELETE /admin/api/galleries/{id}/photos/{photo_id}`. Also deletes the file.
pub async fn delete_photo_handler(
    State(state): State<AppState>,
    Path((gallery_id, photo_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let gallery = state
        .galleries
        .get_by_id(&gallery_id)
        .await
        .ok_or_else(|| gallery_not_found(&gallery_id))?;
    if !gallery.photos.iter().any(|p| p.id == photo_id) {
        return Err(AppError::NotFound(format!("photo '{}' not found", photo_id)));
    }

    let removed = state
        .galleries
        .remove_photo(&gallery_id, &photo_id)
        .await
        .ok_or_else(|| AppError::Storage("Failed to save gallery".into()))?;
    delete_upload(state.storage.as_ref(), &removed.url).await;

    Ok(StatusCode::NO_CONTENT)
}

/// `POST /admin/api/galleries/{id}/photos/reorder`
pub async fn reorder_photos_handler(
    State(state): State<AppState>,
    Path(gallery_id): Path<String>,
    Json(req): Json<ReorderRequest>,
) -> Result<StatusCode, AppError> {
    if state.galleries.get_by_id(&gallery_id).await.is_none() {
        return Err(gallery_not_found(&gallery_id));
    }

    if state.galleries.reorder_photos(&gallery_id, &req.ids).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Storage("Failed to save gallery".into()))
    }
}
