use anyhow::{Context, Result};
use floorplan_backend::{create_app, AppState, Config, PlanStore};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting Floorplan Backend Server");

    let config = Config::from_env()?;
    let state = AppState::new(PlanStore::new(config.data_dir.clone()), config.topology.clone());
    let app = create_app(state, &config);

    let addr = format!("0.0.0.0:{}", config.port);
    info!(
        "Server listening on {} (plans in {})",
        addr,
        config.data_dir.display()
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
