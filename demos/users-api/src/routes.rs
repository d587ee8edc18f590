use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::AppState;
use crate::users::routes::user_router;

/// The application router
pub fn app_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1/users", user_router())
        .route("/api/health", get(health))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = state.uptime();

    Json(json!({
        "status": "OK",
        "uptime": uptime,
    }))
}
