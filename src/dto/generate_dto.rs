use crate::models::quiz::Quiz;
use crate::services::storage_service::UploadOutcome;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Body of `POST /api/generate`.
///
/// Two shapes are accepted: `{text, meta}` for raw text, and
/// `{title?, difficulty?, tags?, pdfBase64, filename?}` for an uploaded PDF.
/// Metadata fields stay loose JSON and are coerced during normalization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerateRequest {
    pub text: Option<JsonValue>,
    pub meta: Option<JsonValue>,
    pub title: Option<JsonValue>,
    pub difficulty: Option<JsonValue>,
    pub tags: Option<JsonValue>,
    pub pdf_base64: Option<String>,
    pub filename: Option<String>,
}

impl GenerateRequest {
    /// Metadata carried next to `pdfBase64`, in the same shape as `meta`.
    pub fn top_level_meta(&self) -> JsonValue {
        serde_json::json!({
            "title": self.title,
            "difficulty": self.difficulty,
            "tags": self.tags,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub quizzes: Vec<Quiz>,
    pub uploaded: Vec<UploadOutcome>,
}
