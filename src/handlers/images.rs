use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{ImageListResponse, ImageResponse},
    state::AppState,
};

/// GET /api/images — every stored pin, newest first.
pub async fn list_images(State(state): State<AppState>) -> AppResult<Json<ImageListResponse>> {
    let images = state.store.list_all().await?;

    Ok(Json(ImageListResponse {
        success: true,
        images,
    }))
}

/// GET /api/images/:id — lookup by Pinterest pin id.
pub async fn get_image(
    State(state): State<AppState>,
    Path(pin_id): Path<String>,
) -> AppResult<Json<ImageResponse>> {
    let image = state
        .store
        .get_by_id(&pin_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".into()))?;

    Ok(Json(ImageResponse {
        success: true,
        image,
    }))
}
