//! Product Catalog API - REST server over PostgreSQL

use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");
    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None).await?;

    let state = AppState {
        config: config.clone(),
        db,
    };

    if state.config.ensure_schema {
        api::ensure_schema(&state).await?;
    }

    let router = create_router::<openapi::ApiDoc>(api::routes(&state), &state.config.server)?;
    let app = router
        .merge(api::root_routes(&state))
        .merge(health_router(state.config.app));

    info!(
        name = state.config.app.name,
        version = state.config.app.version,
        port = state.config.server.port,
        "Starting Product Catalog API"
    );

    let db = state.db.clone();
    create_production_app(app, &state.config.server, async move {
        info!("Shutting down: closing PostgreSQL pool");
        match db.close().await {
            Ok(()) => info!("PostgreSQL pool closed"),
            Err(e) => tracing::warn!(error = %e, "Failed to close PostgreSQL pool"),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Product Catalog API shutdown complete");
    Ok(())
}
