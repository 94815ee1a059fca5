//! JSON handlers shared by every record collection.
//!
//! Each handler is generic over the record type and picks its collection out
//! of [`AppState`] through `FromRef`, so one set of functions serves blogs,
//! events, galleries, slider images and objectives.

use axum::extract::{FromRef, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::upload::delete_orphaned_uploads;
use crate::db::collection::Collection;
use crate::db::record::Record;
use crate::error::AppError;
use crate::state::AppState;

/// Body of every `/reorder` endpoint: ids in their new display order.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<String>,
}

/// `GET /api/{resource}`: all records in display order.
pub async fn list_handler<R>(State(collection): State<Collection<R>>) -> Json<Vec<R>>
where
    R: Record,
    Collection<R>: FromRef<AppState>,
{
    Json(collection.get_all().await)
}

/// `GET /api/{resource}/{id}`
pub async fn get_handler<R>(
    State(collection): State<Collection<R>>,
    Path(id): Path<String>,
) -> Result<Json<R>, AppError>
where
    R: Record,
    Collection<R>: FromRef<AppState>,
{
    collection
        .get_by_id(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("{} '{}' not found", R::KIND, id)))
}

/// `POST /admin/api/{resource}`: the id is always assigned server-side.
pub async fn create_handler<R>(
    State(collection): State<Collection<R>>,
    Json(mut record): Json<R>,
) -> Result<(StatusCode, Json<R>), AppError>
where
    R: Record,
    Collection<R>: FromRef<AppState>,
{
    record.meta_mut().id.clear();

    let stored = collection
        .insert(record)
        .await
        .ok_or_else(|| AppError::Storage(format!("Failed to save {}", R::KIND)))?;

    Ok((StatusCode::CREATED, Json(stored)))
}

/// `PUT /admin/api/{resource}/{id}`
///
/// Fields the body leaves out are restored where the record type says so.
/// Uploaded files the old version referenced and the new one drops are
/// deleted. The response carries the record's possibly new id.
pub async fn update_handler<R>(
    State(state): State<AppState>,
    State(collection): State<Collection<R>>,
    Path(id): Path<String>,
    Json(sent): Json<serde_json::Map<String, serde_json::Value>>,
) -> Result<Json<R>, AppError>
where
    R: Record,
    Collection<R>: FromRef<AppState>,
{
    let existing = collection
        .get_by_id(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("{} '{}' not found", R::KIND, id)))?;

    let mut record: R = serde_json::from_value(serde_json::Value::Object(sent.clone()))
        .map_err(|e| AppError::BadRequest(format!("Invalid {}: {e}", R::KIND)))?;
    record.keep_omitted(&existing, &sent);

    let stored = collection
        .replace(&id, record)
        .await
        .ok_or_else(|| AppError::Storage(format!("Failed to save {}", R::KIND)))?;

    delete_orphaned_uploads(&state.storage, &existing.owned_files(), &stored.owned_files()).await;

    Ok(Json(stored))
}

/// `DELETE /admin/api/{resource}/{id}`: succeeds for unknown ids too.
pub async fn delete_handler<R>(
    State(state): State<AppState>,
    State(collection): State<Collection<R>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError>
where
    R: Record,
    Collection<R>: FromRef<AppState>,
{
    let existing = collection.get_by_id(&id).await;

    if !collection.delete(&id).await {
        return Err(AppError::Storage(format!("Failed to delete {}", R::KIND)));
    }

    if let Some(existing) = existing {
        tracing::info!("Deleted {} '{}'", R::KIND, id);
        delete_orphaned_uploads(&state.storage, &existing.owned_files(), &[]).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// `POST /admin/api/{resource}/reorder`
pub async fn reorder_handler<R>(
    State(collection): State<Collection<R>>,
    Json(req): Json<ReorderRequest>,
) -> Result<StatusCode, AppError>
where
    R: Record,
    Collection<R>: FromRef<AppState>,
{
    if collection.reorder(&req.ids).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Storage(format!("Failed to reorder {} records", R::KIND)))
    }
}
