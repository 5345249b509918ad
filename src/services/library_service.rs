use crate::dto::quiz_dto::{ListQuizzesQuery, UpdateQuizPayload};
use crate::error::{Error, Result};
use crate::models::quiz::{Quiz, QuizMeta};
use crate::services::normalizer::normalize_one;
use crate::services::storage_service::QuizStore;
use crate::utils::time::{to_iso_millis, Clock};
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Quiz library backed by the storage collection. Stored records are run
/// through the normalizer on the way out.
#[derive(Clone)]
pub struct LibraryService {
    store: QuizStore,
    clock: Arc<dyn Clock>,
}

impl LibraryService {
    pub fn new(store: QuizStore, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn coerce_all(&self, raw: &[JsonValue]) -> Vec<Quiz> {
        let now = to_iso_millis(self.clock.now());
        let meta = QuizMeta::default();
        raw.iter()
            .enumerate()
            .map(|(idx, item)| normalize_one(item, idx, &meta, &now))
            .collect()
    }

    pub async fn list(&self, query: &ListQuizzesQuery) -> Result<Vec<Quiz>> {
        let raw = self.store.list().await?;
        Ok(filter_quizzes(self.coerce_all(&raw), query))
    }

    pub async fn get(&self, id: &str) -> Result<Quiz> {
        let raw = self.store.get(id).await?;
        if !raw.is_object() {
            return Err(Error::Upstream {
                status: 502,
                detail: "Quiz storage returned a non-object record".to_string(),
                raw,
            });
        }
        let mut quiz = self.coerce_all(std::slice::from_ref(&raw)).remove(0);
        if raw.get("id").map_or(true, JsonValue::is_null) {
            quiz.id = id.to_string();
        }
        Ok(quiz)
    }

    pub async fn update(&self, id: &str, payload: UpdateQuizPayload) -> Result<Quiz> {
        let mut quiz = self.get(id).await?;
        apply_update(&mut quiz, payload);
        self.store.update(&quiz).await?;
        tracing::info!(quiz_id = %quiz.id, "Quiz updated");
        Ok(quiz)
    }

    pub async fn toggle_favorite(&self, id: &str) -> Result<Quiz> {
        let mut quiz = self.get(id).await?;
        quiz.is_favorite = !quiz.is_favorite;
        self.store.update(&quiz).await?;
        tracing::info!(quiz_id = %quiz.id, favorite = quiz.is_favorite, "Quiz favorite toggled");
        Ok(quiz)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(id).await?;
        tracing::info!(quiz_id = %id, "Quiz deleted");
        Ok(())
    }
}

/// Case-insensitive match on title or any tag, then the favorites filter.
pub fn filter_quizzes(quizzes: Vec<Quiz>, query: &ListQuizzesQuery) -> Vec<Quiz> {
    let term = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());
    let favorites_only = query.favorites.unwrap_or(false);

    quizzes
        .into_iter()
        .filter(|q| !favorites_only || q.is_favorite)
        .filter(|q| match &term {
            None => true,
            Some(t) => {
                q.title.to_lowercase().contains(t)
                    || q.tags.iter().any(|tag| tag.to_lowercase().contains(t))
            }
        })
        .collect()
}

pub fn apply_update(quiz: &mut Quiz, payload: UpdateQuizPayload) {
    if let Some(title) = payload.title {
        quiz.title = title.trim().to_string();
    }
    if let Some(difficulty) = payload.difficulty {
        quiz.difficulty = difficulty.trim().to_string();
    }
    if let Some(tags) = payload.tags {
        quiz.tags = tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
    }
    if let Some(fav) = payload.is_favorite {
        quiz.is_favorite = fav;
    }
}
