#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use quizforge_backend::{config::Config, routes, AppState};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

pub fn test_config(server_url: &str, api_key: Option<&str>) -> Config {
    Config {
        upstage_api_key: api_key.map(str::to_string),
        upstage_base_url: format!("{}/v1", server_url),
        mockapi_url: format!("{}/Questions", server_url),
        http_timeout_secs: 5,
        ..Config::default()
    }
}

pub fn app(config: &Config) -> Router {
    let state = AppState::new(config).expect("app state");
    routes::build_router(state, config.max_body_bytes)
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, JsonValue) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: &JsonValue) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-test",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}}
        ]
    })
    .to_string()
}

pub fn sample_quiz(id: &str, title: &str, question_count: usize) -> JsonValue {
    let questions: Vec<JsonValue> = (1..=question_count)
        .map(|n| {
            json!({
                "id": n,
                "text": format!("문제 {}", n),
                "options": ["A", "B", "C", "D"],
                "answer": "B",
                "explanation": "B가 정답"
            })
        })
        .collect();
    json!({
        "id": id,
        "title": title,
        "topic": "General",
        "difficulty": "easy",
        "createdAt": "2024-12-17T11:00:00Z",
        "tags": ["t1"],
        "isFavorite": false,
        "questions": questions
    })
}

/// One-page PDF with a single Helvetica text run. An empty `text` gives a
/// page with no content.
pub fn minimal_pdf(text: &str) -> Vec<u8> {
    let stream = if text.is_empty() {
        String::new()
    } else {
        format!("BT /F1 24 Tf 72 720 Td ({}) Tj ET", text)
    };
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
        format!("<< /Length {} >>\nstream\n{}\nendstream", stream.len(), stream),
    ];

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (n, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{}\nendobj\n", n + 1, body));
    }

    let xref_at = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in offsets {
        pdf.push_str(&format!("{:010} 00000 n \n", offset));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_at
    ));
    pdf.into_bytes()
}
