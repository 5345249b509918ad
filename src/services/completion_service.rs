use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::quiz::QuizMeta;
use reqwest::Client;
use serde_json::Value as JsonValue;

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";
const TEMPERATURE: f64 = 0.3;

const SCHEMA_EXAMPLE: &str = r#"[
  {
    "id": "1",
    "title": "퀴즈 제목",
    "topic": "General",
    "difficulty": "easy",
    "createdAt": "2024-12-17T11:00:00Z",
    "tags": ["태그1","태그2"],
    "isFavorite": false,
    "questions": [
      {
        "id": 1,
        "text": "문제",
        "options": ["A","B","C","D"],
        "answer": "정답(보기 중 하나)",
        "explanation": "해설"
      }
    ]
  }
]"#;

/// Renders the Korean instruction prompt for one generation request.
pub fn build_prompt(text: &str, meta: &QuizMeta) -> String {
    let title = meta.title_or_none().unwrap_or("적절히 생성");
    let tags = if meta.tags.is_empty() {
        "없음".to_string()
    } else {
        meta.tags.join(", ")
    };

    format!(
        r#"너는 퀴즈 제작기야.
아래 텍스트를 바탕으로 "반드시" JSON만 출력해.

[출력 규칙]
- 출력은 JSON "배열" 하나만 출력 (추가 설명/문장/코드블록 금지)
- questions는 최소 5문항
- options는 객관식 4개
- answer는 options 중 하나의 값과 정확히 일치
- explanation은 한두 문장
- difficulty는 easy|medium|hard 중 하나

[메타 반영]
- title: {title}
- difficulty: {difficulty}
- tags: {tags}

[스키마]
{schema}

[텍스트]
{text}"#,
        title = title,
        difficulty = meta.difficulty_or_default(),
        tags = tags,
        schema = SCHEMA_EXAMPLE,
        text = text,
    )
    .trim()
    .to_string()
}

/// Picks a human-readable message out of an Upstage error body.
pub fn upstream_error_detail(body: &JsonValue, status: u16) -> String {
    [
        body.pointer("/error/message"),
        body.get("message"),
        body.get("detail"),
    ]
    .into_iter()
    .flatten()
    .find_map(|v| v.as_str().filter(|s| !s.is_empty()).map(str::to_string))
    .unwrap_or_else(|| format!("Upstage API error (HTTP {})", status))
}

#[derive(Clone)]
pub struct CompletionService {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl CompletionService {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            client,
            api_key: config.upstage_api_key.clone(),
            base_url: config.upstage_base_url.clone(),
            model: config.upstage_model.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sends one chat completion and returns the first choice's content.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Config("UPSTAGE_API_KEY is not set".to_string()))?;

        let payload = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": prompt}
            ],
            "temperature": TEMPERATURE
        });

        let res = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        let body: JsonValue =
            serde_json::from_str(&text).unwrap_or_else(|_| JsonValue::Object(Default::default()));

        if !status.is_success() {
            let detail = upstream_error_detail(&body, status.as_u16());
            tracing::warn!(status = status.as_u16(), "Upstage request failed: {}", detail);
            return Err(Error::Upstream {
                status: status.as_u16(),
                detail,
                raw: body,
            });
        }

        Ok(body
            .pointer("/choices/0/message/content")
            .and_then(|c| c.as_str())
            .unwrap_or_default()
            .to_string())
    }
}
