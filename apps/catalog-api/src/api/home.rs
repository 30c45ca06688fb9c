//! Service information at `/`

use axum::{Json, Router, extract::State, routing::get};
use core_config::AppInfo;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    pub produtos: &'static str,
}

async fn home(State(app): State<AppInfo>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Product catalog API is running",
        version: app.version,
        status: "UP",
        endpoints: Endpoints {
            health: "/health",
            produtos: "/api/produtos",
        },
    })
}

pub fn router(app_info: AppInfo) -> Router {
    Router::new().route("/", get(home)).with_state(app_info)
}
