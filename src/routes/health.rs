use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let completion = if state.completion_configured {
        "configured"
    } else {
        "missing_api_key"
    };
    let body = json!({
        "status": "ok",
        "completion": completion,
    });
    (StatusCode::OK, Json(body))
}
