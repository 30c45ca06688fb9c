//! API routes module

pub mod health;
pub mod home;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Routes nested under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/produtos", products::router(state))
}

/// Routes served at the root, outside `/api`
pub fn root_routes(state: &AppState) -> Router {
    Router::new()
        .merge(home::router(state.config.app))
        .merge(health::router(state.db.clone()))
}

/// Prepare the database schema
pub async fn ensure_schema(state: &AppState) -> eyre::Result<()> {
    products::ensure_schema(state).await
}
