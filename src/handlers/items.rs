//! Item CRUD. Every authenticated user sees and edits the same inventory;
//! rows carry no owner column.

use axum::extract::{Path, Request, State};
use axum::Json;
use serde_json::{json, Value};

use crate::database::models::Item;
use crate::error::ApiError;
use crate::AppState;

/// GET /api/items - all items, newest first.
pub async fn items_get(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    let items: Vec<Item> =
        sqlx::query_as("SELECT id, name, image, created_at FROM items ORDER BY id DESC")
            .fetch_all(&state.pool)
            .await?;
    Ok(Json(items))
}

/// POST /api/items - create an item with an optional image upload.
pub async fn items_post(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<Value>, ApiError> {
    let form = super::forms::UpdateForm::read(request, "image", &state.uploads).await?;
    let Some(name) = form.field("name") else {
        return Err(ApiError::validation("Item name required"));
    };

    sqlx::query("INSERT INTO items (name, image) VALUES ($1, $2)")
        .bind(name)
        .bind(&form.upload)
        .execute(&state.pool)
        .await?;

    Ok(Json(json!({ "message": "Item created" })))
}

/// PUT /api/items/:id - rename, and replace the image when a new file is
/// sent. An image, once set, is never cleared.
pub async fn item_put(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Value>, ApiError> {
    let form = super::forms::UpdateForm::read(request, "image", &state.uploads).await?;
    let Some(name) = form.field("name") else {
        return Err(ApiError::validation("Item name required"));
    };

    let result = match &form.upload {
        Some(image) => {
            sqlx::query("UPDATE items SET name = $1, image = $2 WHERE id = $3")
                .bind(name)
                .bind(image)
                .bind(id)
                .execute(&state.pool)
                .await?
        }
        None => {
            sqlx::query("UPDATE items SET name = $1 WHERE id = $2")
                .bind(name)
                .bind(id)
                .execute(&state.pool)
                .await?
        }
    };

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Item not found"));
    }
    Ok(Json(json!({ "message": "Item updated" })))
}

/// DELETE /api/items/:id
pub async fn item_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let result = sqlx::query("DELETE FROM items WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Item not found"));
    }
    Ok(Json(json!({ "message": "Item deleted" })))
}
