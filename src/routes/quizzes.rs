use crate::{
    dto::quiz_dto::{GradeQuizPayload, ListQuizzesQuery, UpdateQuizPayload},
    error::Result,
    services::grading_service::GradingService,
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

pub async fn list_quizzes(
    State(state): State<AppState>,
    Query(query): Query<ListQuizzesQuery>,
) -> Result<impl IntoResponse> {
    let quizzes = state.library_service.list(&query).await?;
    Ok(Json(quizzes))
}

pub async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let quiz = state.library_service.get(&id).await?;
    Ok(Json(quiz))
}

#[axum::debug_handler]
pub async fn update_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateQuizPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let quiz = state.library_service.update(&id, payload).await?;
    Ok(Json(quiz))
}

pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let quiz = state.library_service.toggle_favorite(&id).await?;
    Ok(Json(quiz))
}

pub async fn delete_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.library_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn grade_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<GradeQuizPayload>,
) -> Result<impl IntoResponse> {
    let quiz = state.library_service.get(&id).await?;
    let result = GradingService::grade(&quiz, &payload.answers);
    tracing::info!(quiz_id = %id, score = result.score, total = result.total, "Quiz graded");
    Ok(Json(result))
}
