//! Readiness endpoint; liveness comes from `axum_helpers::health_router`

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::postgres::{DatabaseConnection, check_health_detailed};
use tracing::debug;

async fn ready(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    let database: HealthCheckFuture<'_> = Box::pin(async {
        let status = check_health_detailed(&db).await;
        debug!(response_time_ms = status.response_time_ms, "Database probe finished");
        if status.healthy {
            Ok(())
        } else {
            Err(status.message.unwrap_or_default())
        }
    });

    run_health_checks(vec![("database", database)]).await
}

/// `GET /ready`: 200 when PostgreSQL answers `SELECT 1`, 503 otherwise
pub fn router(db: DatabaseConnection) -> Router {
    Router::new().route("/ready", get(ready)).with_state(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use serde_json::Value;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_ready_returns_503_when_database_unreachable() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection refused".to_string())])
            .into_connection();

        let response = router(db)
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "not ready");
        assert_eq!(json["database"], "disconnected");
    }
}
