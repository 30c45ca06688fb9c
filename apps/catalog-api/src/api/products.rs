//! Catalog routes backed by PostgreSQL

use axum::Router;
use domain_catalog::{PgProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Create products router
pub fn router(state: &AppState) -> Router {
    let repository = PgProductRepository::new(state.db.clone());
    let service = ProductService::new(repository);
    handlers::router(service)
}

/// Create the products table when it does not exist yet
pub async fn ensure_schema(state: &AppState) -> eyre::Result<()> {
    domain_catalog::ensure_schema(&state.db).await?;
    Ok(())
}
