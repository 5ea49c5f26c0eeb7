use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::Utc;
use serde_json::json;

use crate::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Liveness probe: reports service status and whether the database answers a
/// ping.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database_up = crate::db::check_connection(&state.db).await.is_ok();

    let status = if database_up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if database_up { "up" } else { "degraded" },
            "database": if database_up { "up" } else { "down" },
            "version": env!("CARGO_PKG_VERSION"),
            "environment": state.config.environment,
            "timestamp": Utc::now().to_rfc3339(),
        })),
    )
}
