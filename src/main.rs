use anyhow::Context;

use lattice_api::api::{create_router, AppState};
use lattice_api::config::Config;
use lattice_api::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = Config::from_env()?;

    // Load model artifacts before binding so a broken deployment fails fast
    let state = AppState::load(&config)
        .with_context(|| format!("failed to load model artifacts from {:?}", config.model_dir))?;

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Server running on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
