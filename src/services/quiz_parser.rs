use regex::Regex;
use serde_json::Value as JsonValue;
use std::sync::OnceLock;

/// Outcome of reading a JSON array out of a free-form completion.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedOutput {
    Quizzes(Vec<JsonValue>),
    Malformed(String),
}

fn json_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)```json\s*(.*?)\s*```").expect("valid json fence regex"))
}

fn any_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```\s*(.*?)\s*```").expect("valid fence regex"))
}

fn first_fenced<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|body| !body.is_empty())
}

/// Strips markdown fencing so that only the JSON-looking part remains.
pub fn extract_candidate(text: &str) -> &str {
    let text = text.trim();
    first_fenced(json_fence(), text)
        .or_else(|| first_fenced(any_fence(), text))
        .unwrap_or(text)
}

fn as_quiz_array(value: JsonValue) -> Option<Vec<JsonValue>> {
    match value {
        JsonValue::Array(items) => Some(items),
        JsonValue::Object(mut map) => ["quizzes", "data"].iter().find_map(|key| {
            match map.remove(*key) {
                Some(JsonValue::Array(items)) => Some(items),
                _ => None,
            }
        }),
        _ => None,
    }
}

fn bracket_slice(candidate: &str) -> Option<&str> {
    let first = candidate.find('[')?;
    let last = candidate.rfind(']')?;
    (last > first).then(|| &candidate[first..=last])
}

pub fn parse_json_array(text: &str) -> ParsedOutput {
    let candidate = extract_candidate(text);

    if let Some(items) = serde_json::from_str::<JsonValue>(candidate)
        .ok()
        .and_then(as_quiz_array)
    {
        return ParsedOutput::Quizzes(items);
    }

    if let Some(slice) = bracket_slice(candidate) {
        if let Ok(JsonValue::Array(items)) = serde_json::from_str::<JsonValue>(slice) {
            tracing::debug!("Recovered JSON array by bracket slicing");
            return ParsedOutput::Quizzes(items);
        }
    }

    ParsedOutput::Malformed(text.to_string())
}
