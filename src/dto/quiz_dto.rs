use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ListQuizzesQuery {
    pub search: Option<String>,
    pub favorites: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuizPayload {
    #[validate(custom(function = "crate::utils::validation::not_blank"))]
    pub title: Option<String>,
    pub difficulty: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_favorite: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub question_id: i64,
    pub selected: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GradeQuizPayload {
    pub answers: Vec<AnswerSubmission>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question_id: i64,
    pub text: String,
    pub selected: Option<String>,
    pub answer: String,
    pub correct: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeResult {
    pub total: usize,
    pub score: usize,
    pub results: Vec<QuestionResult>,
}
