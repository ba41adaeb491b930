use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod uploads;

use auth::TokenService;
use uploads::UploadStore;

/// Everything the handlers share, built once at startup from [`config::AppConfig`].
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub tokens: TokenService,
    pub uploads: UploadStore,
}

/// Build the full application router.
///
/// CORS stays wide open on purpose; the SPA is served from a different
/// origin and the only credential in play is the bearer header.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/register", post(handlers::auth::register))
        .route("/api/login", post(handlers::auth::login))
        .route("/health", get(health))
        .merge(protected_routes(&state))
        .nest_service("/uploads", ServeDir::new(state.uploads.dir()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn protected_routes(state: &AppState) -> Router<AppState> {
    use axum::routing::put;
    use handlers::{items, profile};

    Router::new()
        .route("/api/me", get(profile::me_get).put(profile::me_put))
        .route("/api/items", get(items::items_get).post(items::items_post))
        .route(
            "/api/items/:id",
            put(items::item_put).delete(items::item_delete),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.tokens.clone(),
            middleware::require_auth,
        ))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match database::ping(&state.pool).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "ok": true }))),
        Err(e) => {
            tracing::warn!("health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "ok": false })))
        }
    }
}
