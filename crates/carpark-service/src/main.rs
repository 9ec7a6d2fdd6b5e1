//! Car Park Service
//!
//! REST API for managing parking spots and the vehicles parked in them

use anyhow::{Context, Result};
use carpark_core::SharedRegistry;
use carpark_service::{create_router, AppState, Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "carpark_service=debug,carpark_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Car Park Service");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Listening on {}", config.address());
    info!(
        "Accepting vehicles built {}-{}",
        config.years.min, config.years.max
    );

    // Seed the registry from the configured layout
    let registry = config
        .layout
        .build()
        .context("Failed to build spot layout")?;
    info!("Seeded {} parking spots", registry.total_count());

    let state = AppState::new(SharedRegistry::new(registry), config.years);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.address())
        .await
        .with_context(|| format!("Failed to bind to {}", config.address()))?;

    info!("Car Park Service running on http://{}", config.address());

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
