use crate::dto::generate_dto::{GenerateRequest, GenerateResponse};
use crate::error::{Error, Result};
use crate::models::quiz::QuizMeta;
use crate::services::completion_service::{build_prompt, CompletionService};
use crate::services::normalizer::{meta_from_value, normalize, stringify};
use crate::services::pdf_service;
use crate::services::quiz_parser::{parse_json_array, ParsedOutput};
use crate::services::storage_service::QuizStore;
use crate::utils::text::truncate_chars;
use crate::utils::time::Clock;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationInput {
    pub text: String,
    pub meta: QuizMeta,
}

#[derive(Clone)]
pub struct GenerationService {
    completion: CompletionService,
    store: QuizStore,
    clock: Arc<dyn Clock>,
    max_input_chars: usize,
}

impl GenerationService {
    pub fn new(
        completion: CompletionService,
        store: QuizStore,
        clock: Arc<dyn Clock>,
        max_input_chars: usize,
    ) -> Self {
        Self {
            completion,
            store,
            clock,
            max_input_chars,
        }
    }

    /// Turns either request shape into source text plus metadata.
    pub async fn resolve_input(&self, req: GenerateRequest) -> Result<GenerationInput> {
        if let Some(pdf) = req.pdf_base64.as_deref().filter(|p| !p.trim().is_empty()) {
            let meta = meta_from_value(Some(&req.top_level_meta()));
            let data = pdf_service::decode_pdf_base64(pdf)?;
            let text = pdf_service::extract_text(data, req.filename.as_deref()).await?;
            if text.trim().is_empty() {
                return Err(Error::BadRequest(
                    "No text could be extracted from the PDF".to_string(),
                ));
            }
            return Ok(GenerationInput { text, meta });
        }

        let text = req.text.as_ref().map(stringify).unwrap_or_default();
        if text.trim().is_empty() {
            return Err(Error::BadRequest("text is empty".to_string()));
        }
        Ok(GenerationInput {
            text,
            meta: meta_from_value(req.meta.as_ref()),
        })
    }

    pub async fn generate(&self, input: GenerationInput) -> Result<GenerateResponse> {
        if !self.completion.is_configured() {
            return Err(Error::Config("UPSTAGE_API_KEY is not set".to_string()));
        }

        let text = truncate_chars(&input.text, self.max_input_chars);
        if text.len() < input.text.len() {
            tracing::info!(
                limit = self.max_input_chars,
                "Input text truncated before generation"
            );
        }

        let prompt = build_prompt(text, &input.meta);
        tracing::info!(prompt_chars = prompt.chars().count(), "Requesting quiz completion");
        let content = self.completion.complete(&prompt).await?;
        tracing::info!(completion_chars = content.chars().count(), "Completion received");

        let raw = match parse_json_array(&content) {
            ParsedOutput::Quizzes(items) => items,
            ParsedOutput::Malformed(raw) => {
                tracing::warn!("Model output did not contain a JSON array");
                return Err(Error::MalformedOutput {
                    detail: "Upstage failed to produce a JSON array of quizzes".to_string(),
                    raw,
                });
            }
        };

        let quizzes = normalize(&raw, &input.meta, self.clock.as_ref());
        tracing::info!(count = quizzes.len(), "Normalized quizzes");

        let uploaded = self.store.upload_all(&quizzes).await;
        let failed = uploaded.iter().filter(|o| !o.is_ok()).count();
        if failed > 0 {
            tracing::warn!(failed, total = uploaded.len(), "Some quizzes were not saved");
        }

        Ok(GenerateResponse { quizzes, uploaded })
    }
}
