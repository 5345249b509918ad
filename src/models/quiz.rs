use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub difficulty: String,
    pub created_at: String,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub options: Vec<String>,
    pub answer: String,
    pub explanation: String,
}

/// Caller-supplied defaults for a generation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizMeta {
    pub title: String,
    pub difficulty: String,
    pub tags: Vec<String>,
}

impl QuizMeta {
    pub fn title_or_none(&self) -> Option<&str> {
        let title = self.title.trim();
        (!title.is_empty()).then_some(title)
    }

    pub fn difficulty_or_default(&self) -> &str {
        match self.difficulty.trim() {
            "" => "medium",
            d => d,
        }
    }
}
