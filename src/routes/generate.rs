use crate::{
    dto::generate_dto::GenerateRequest,
    error::{Error, Result},
    AppState,
};
use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};

/// A missing or blank body reads as `{}` so it fails input validation with a
/// JSON error rather than an extractor rejection.
fn parse_body(body: &[u8]) -> Result<GenerateRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GenerateRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| Error::BadRequest(format!("Request body is not valid JSON: {}", e)))
}

#[axum::debug_handler]
pub async fn generate_quizzes(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let payload = parse_body(&body)?;
    let input = state.generation_service.resolve_input(payload).await?;
    tracing::info!(input_chars = input.text.chars().count(), "Quiz generation requested");
    let response = state.generation_service.generate(input).await?;
    Ok((StatusCode::OK, Json(response)))
}

/// Bare `OPTIONS` without CORS request headers still gets a 200.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
