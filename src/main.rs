use anyhow::Context;
use tracing_subscriber::EnvFilter;

use stash_api::auth::TokenService;
use stash_api::config::AppConfig;
use stash_api::uploads::UploadStore;
use stash_api::{app, database, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("stash_api=info,tower_http=info")),
        )
        .init();

    // Startup-fatal: refuses to run without a signing secret or database URL
    let config = AppConfig::from_env().context("configuration")?;

    let tokens = TokenService::new(&config.jwt_secret).context("token service")?;
    let pool = database::connect(&config).await.context("database")?;
    database::ensure_schema(&pool).await.context("schema")?;
    let uploads = UploadStore::create(&config.upload_dir)
        .await
        .context("upload directory")?;

    let state = AppState {
        pool,
        tokens,
        uploads,
    };

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server")?;
    Ok(())
}
