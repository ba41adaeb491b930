//! Profile endpoints for the authenticated user.

use axum::extract::{Extension, Request, State};
use axum::Json;
use serde_json::{json, Value};
use sqlx::QueryBuilder;

use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::AppState;

/// GET /api/me - current user record, without the password hash.
///
/// The token outlives the row check: the middleware already accepted the
/// token, so a vanished user id surfaces here as a 404.
pub async fn me_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<User>, ApiError> {
    let record: Option<User> = sqlx::query_as(
        "SELECT id, name, email, password, profile_image, created_at FROM users WHERE id = $1",
    )
    .bind(user.id)
    .fetch_optional(&state.pool)
    .await?;

    record
        .map(Json)
        .ok_or_else(|| ApiError::not_found("User not found"))
}

/// PUT /api/me - partial update of name, email, password and avatar.
///
/// Only the fields present in the request are applied; a password is
/// re-hashed before it goes anywhere near the store. Zero fields is a
/// client error, not a silent success.
pub async fn me_put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    request: Request,
) -> Result<Json<Value>, ApiError> {
    let form = super::forms::UpdateForm::read(request, "profile", &state.uploads).await?;
    let name = form.field("name");
    let email = form.field("email");
    let password = form.field("password");
    let avatar = form.upload.as_deref();

    // Unknown fields do not count; zero applicable fields is a client error
    if name.is_none() && email.is_none() && password.is_none() && avatar.is_none() {
        return Err(ApiError::validation("No fields to update"));
    }

    let mut query: QueryBuilder<sqlx::Postgres> = QueryBuilder::new("UPDATE users SET ");
    let mut updates = query.separated(", ");
    if let Some(name) = name {
        updates.push("name = ").push_bind_unseparated(name.to_owned());
    }
    if let Some(email) = email {
        updates
            .push("email = ")
            .push_bind_unseparated(email.to_owned());
    }
    if let Some(password) = password {
        let hashed = User::hash_password(password)?;
        updates.push("password = ").push_bind_unseparated(hashed);
    }
    if let Some(image) = avatar {
        updates
            .push("profile_image = ")
            .push_bind_unseparated(image.to_owned());
    }
    query.push(" WHERE id = ").push_bind(user.id);

    // A duplicate email converts to the same 400 as at registration
    query.build().execute(&state.pool).await?;

    tracing::info!(user_id = user.id, "profile updated");
    Ok(Json(json!({ "message": "Profile updated" })))
}
