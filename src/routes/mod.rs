pub mod generate;
pub mod health;
pub mod quizzes;

use crate::{middleware::cors, AppState};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    let generate_api = Router::new()
        .route(
            "/api/generate",
            post(generate::generate_quizzes).options(generate::preflight),
        )
        .layer(cors::generate_cors());

    let quiz_api = Router::new()
        .route("/api/quizzes", get(quizzes::list_quizzes))
        .route(
            "/api/quizzes/:id",
            get(quizzes::get_quiz)
                .put(quizzes::update_quiz)
                .delete(quizzes::delete_quiz),
        )
        .route("/api/quizzes/:id/favorite", post(quizzes::toggle_favorite))
        .route("/api/quizzes/:id/grade", post(quizzes::grade_quiz))
        .layer(cors::library_cors());

    Router::new()
        .route("/health", get(health::health))
        .merge(generate_api)
        .merge(quiz_api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(max_body_bytes))
}
