use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::records::ReorderRequest;
use crate::db::dropdowns::{
    CategoryInput, ColumnInput, DropdownColumn, DropdownItem, ItemInput, LinkInput, NavbarDropdowns,
    SocialMedia, VideoCategory, VideoLink, VideosDropdown,
};
use crate::error::AppError;
use crate::state::AppState;

// --- Videos dropdown ---

/// `GET /api/videos-dropdown`
pub async fn get_videos_handler(State(state): State<AppState>) -> Json<VideosDropdown> {
    Json(state.videos.get().await)
}

pub async fn add_category_handler(
    State(state): State<AppState>,
    Json(input): Json<CategoryInput>,
) -> Result<(StatusCode, Json<VideoCategory>), AppError> {
    let category = state.videos.add_category(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CategoryInput>,
) -> Result<Json<VideoCategory>, AppError> {
    Ok(Json(state.videos.update_category(&id, input).await?))
}

/// Deleting a category deletes its links.
pub async fn delete_category_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.videos.delete_category(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reorder_categories_handler(
    State(state): State<AppState>,
    Json(req): Json<ReorderRequest>,
) -> Result<StatusCode, AppError> {
    state.videos.reorder_categories(&req.ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_link_handler(
    State(state): State<AppState>,
    Json(input): Json<LinkInput>,
) -> Result<(StatusCode, Json<VideoLink>), AppError> {
    let link = state.videos.add_link(input).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

pub async fn update_link_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<LinkInput>,
) -> Result<Json<VideoLink>, AppError> {
    Ok(Json(state.videos.update_link(&id, input).await?))
}

pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.videos.delete_link(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reorder_links_handler(
    State(state): State<AppState>,
    Json(req): Json<ReorderRequest>,
) -> Result<StatusCode, AppError> {
    state.videos.reorder_links(&req.ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_videos_social_handler(
    State(state): State<AppState>,
    Json(social_media): Json<SocialMedia>,
) -> Result<StatusCode, AppError> {
    state.videos.update_social_media(social_media).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Navbar dropdowns ---

#[derive(Debug, Deserialize)]
pub struct EnabledRequest {
    pub enabled: bool,
}

/// `GET /api/navbar-dropdowns`
pub async fn get_navbar_handler(State(state): State<AppState>) -> Json<NavbarDropdowns> {
    Json(state.navbar.get().await)
}

pub async fn set_enabled_handler(
    State(state): State<AppState>,
    Path(nav_item): Path<String>,
    Json(req): Json<EnabledRequest>,
) -> Result<StatusCode, AppError> {
    state.navbar.set_enabled(&nav_item, req.enabled).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reorder_dropdowns_handler(
    State(state): State<AppState>,
    Json(req): Json<ReorderRequest>,
) -> Result<StatusCode, AppError> {
    state.navbar.reorder_dropdowns(&req.ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_column_handler(
    State(state): State<AppState>,
    Path(nav_item): Path<String>,
    Json(input): Json<ColumnInput>,
) -> Result<(StatusCode, Json<DropdownColumn>), AppError> {
    let column = state.navbar.add_column(&nav_item, input).await?;
    Ok((StatusCode::CREATED, Json(column)))
}

pub async fn update_column_handler(
    State(state): State<AppState>,
    Path((nav_item, column_id)): Path<(String, String)>,
    Json(input): Json<ColumnInput>,
) -> Result<Json<DropdownColumn>, AppError> {
    Ok(Json(
        state.navbar.update_column(&nav_item, &column_id, input).await?,
    ))
}

pub async fn delete_column_handler(
    State(state): State<AppState>,
    Path((nav_item, column_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    state.navbar.delete_column(&nav_item, &column_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reorder_columns_handler(
    State(state): State<AppState>,
    Path(nav_item): Path<String>,
    Json(req): Json<ReorderRequest>,
) -> Result<StatusCode, AppError> {
    state.navbar.reorder_columns(&nav_item, &req.ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_item_handler(
    State(state): State<AppState>,
    Path((nav_item, column_id)): Path<(String, String)>,
    Json(input): Json<ItemInput>,
) -> Result<(StatusCode, Json<DropdownItem>), AppError> {
    let item = state.navbar.add_item(&nav_item, &column_id, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item_handler(
    State(state): State<AppState>,
    Path((nav_item, column_id, item_id)): Path<(String, String, String)>,
    Json(input): Json<ItemInput>,
) -> Result<Json<DropdownItem>, AppError> {
    Ok(Json(
        state
            .navbar
            .update_item(&nav_item, &column_id, &item_id, input)
            .await?,
    ))
}

pub async fn delete_item_handler(
    State(state): State<AppState>,
    Path((nav_item, column_id, item_id)): Path<(String, String, String)>,
) -> Result<StatusCode, AppError> {
    state
        .navbar
        .delete_item(&nav_item, &column_id, &item_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reorder_items_handler(
    State(state): State<AppState>,
    Path((nav_item, column_id)): Path<(String, String)>,
    Json(req): Json<ReorderRequest>,
) -> Result<StatusCode, AppError> {
    state
        .navbar
        .reorder_items(&nav_item, &column_id, &req.ids)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_navbar_social_handler(
    State(state): State<AppState>,
    Json(social_media): Json<SocialMedia>,
) -> Result<StatusCode, AppError> {
    state.navbar.update_social_media(social_media).await?;
    Ok(StatusCode::NO_CONTENT)
}
