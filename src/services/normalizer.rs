//! Total coercion of model output into [`Quiz`] records.
//!
//! Nothing in here fails: every field gets a well-typed value no matter how
//! the input looked. `null` is treated the same as a missing field.

use crate::models::quiz::{Question, Quiz, QuizMeta};
use crate::utils::time::{to_iso_millis, Clock};
use serde_json::{Map, Value as JsonValue};

const DEFAULT_TOPIC: &str = "General";

fn field<'a>(obj: &'a Map<String, JsonValue>, key: &str) -> Option<&'a JsonValue> {
    obj.get(key).filter(|v| !v.is_null())
}

/// String form of an arbitrary JSON value.
pub fn stringify(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        JsonValue::Object(_) => value.to_string(),
    }
}

fn truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

fn string_list(value: Option<&JsonValue>) -> Option<Vec<String>> {
    value.and_then(JsonValue::as_array).map(|items| items.iter().map(stringify).collect())
}

fn integral_id(value: Option<&JsonValue>) -> Option<i64> {
    let JsonValue::Number(n) = value? else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    n.as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
}

fn as_object(value: &JsonValue) -> Map<String, JsonValue> {
    value.as_object().cloned().unwrap_or_default()
}

/// Reads `{title?, difficulty?, tags?}` loosely; anything unusable becomes a default.
pub fn meta_from_value(value: Option<&JsonValue>) -> QuizMeta {
    let obj = value.map(as_object).unwrap_or_default();
    QuizMeta {
        title: field(&obj, "title").map(stringify).unwrap_or_default().trim().to_string(),
        difficulty: field(&obj, "difficulty")
            .map(stringify)
            .unwrap_or_default()
            .trim()
            .to_string(),
        tags: string_list(field(&obj, "tags")).unwrap_or_default(),
    }
}

pub fn placeholder_title(meta: &QuizMeta, position: usize) -> String {
    match meta.title_or_none() {
        Some(title) => format!("{} {}", title, position),
        None => format!("퀴즈 {}", position),
    }
}

fn normalize_question(raw: &JsonValue, idx: usize) -> Question {
    let obj = as_object(raw);
    Question {
        id: integral_id(field(&obj, "id")).unwrap_or(idx as i64 + 1),
        text: field(&obj, "text").map(stringify).unwrap_or_default(),
        options: string_list(field(&obj, "options")).unwrap_or_default(),
        answer: field(&obj, "answer").map(stringify).unwrap_or_default(),
        explanation: field(&obj, "explanation").map(stringify).unwrap_or_default(),
    }
}

/// Coerces the record found at `idx` of a raw array. `created_at` is used
/// when the record carries no timestamp of its own.
pub fn normalize_one(raw: &JsonValue, idx: usize, meta: &QuizMeta, created_at: &str) -> Quiz {
    let obj = as_object(raw);
    let position = idx + 1;

    let questions = field(&obj, "questions")
        .and_then(JsonValue::as_array)
        .map(|items| {
            items
                .iter()
                .enumerate()
                .map(|(qidx, q)| normalize_question(q, qidx))
                .collect()
        })
        .unwrap_or_default();

    Quiz {
        id: field(&obj, "id")
            .map(stringify)
            .unwrap_or_else(|| position.to_string()),
        title: field(&obj, "title")
            .map(stringify)
            .unwrap_or_else(|| placeholder_title(meta, position)),
        topic: field(&obj, "topic")
            .map(stringify)
            .unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
        difficulty: field(&obj, "difficulty")
            .map(stringify)
            .unwrap_or_else(|| meta.difficulty_or_default().to_string()),
        created_at: field(&obj, "createdAt")
            .map(stringify)
            .unwrap_or_else(|| created_at.to_string()),
        tags: string_list(field(&obj, "tags")).unwrap_or_else(|| meta.tags.clone()),
        is_favorite: field(&obj, "isFavorite").map(truthy).unwrap_or(false),
        questions,
    }
}

pub fn normalize(raw: &[JsonValue], meta: &QuizMeta, clock: &dyn Clock) -> Vec<Quiz> {
    let now = to_iso_millis(clock.now());
    raw.iter()
        .enumerate()
        .map(|(idx, item)| normalize_one(item, idx, meta, &now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::MockClock;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn fixed_clock() -> MockClock {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .times(1)
            .returning(|| Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap());
        clock
    }

    fn meta(title: &str, difficulty: &str, tags: &[&str]) -> QuizMeta {
        QuizMeta {
            title: title.to_string(),
            difficulty: difficulty.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn empty_object_takes_every_default() {
        let clock = fixed_clock();
        let quizzes = normalize(&[json!({})], &meta("T", "hard", &["x"]), &clock);

        assert_eq!(quizzes.len(), 1);
        let quiz = &quizzes[0];
        assert_eq!(quiz.id, "1");
        assert!(quiz.title.contains('1'));
        assert_eq!(quiz.title, "T 1");
        assert_eq!(quiz.topic, "General");
        assert_eq!(quiz.difficulty, "hard");
        assert_eq!(quiz.tags, vec!["x".to_string()]);
        assert!(quiz.questions.is_empty());
        assert!(!quiz.is_favorite);
        assert_eq!(quiz.created_at, "2025-01-02T03:04:05.000Z");
    }

    #[test]
    fn placeholder_without_meta_title() {
        let clock = fixed_clock();
        let quizzes = normalize(&[json!({}), json!(null)], &QuizMeta::default(), &clock);
        assert_eq!(quizzes[0].title, "퀴즈 1");
        assert_eq!(quizzes[1].title, "퀴즈 2");
        assert_eq!(quizzes[1].id, "2");
        assert_eq!(quizzes[0].difficulty, "medium");
    }

    #[test]
    fn clock_is_read_once_per_call() {
        let clock = fixed_clock();
        let quizzes = normalize(&[json!({}), json!({}), json!({})], &QuizMeta::default(), &clock);
        assert!(quizzes.iter().all(|q| q.created_at == quizzes[0].created_at));
    }

    #[test]
    fn well_formed_record_is_unchanged() {
        let record = json!({
            "id": "42",
            "title": "운영체제 기초",
            "topic": "OS",
            "difficulty": "easy",
            "createdAt": "2024-12-17T11:00:00Z",
            "tags": ["os", "process"],
            "isFavorite": true,
            "questions": [
                {
                    "id": 1,
                    "text": "프로세스란?",
                    "options": ["A", "B", "C", "D"],
                    "answer": "B",
                    "explanation": "실행 중인 프로그램"
                }
            ]
        });

        let clock = fixed_clock();
        let quizzes = normalize(std::slice::from_ref(&record), &meta("ignored", "hard", &["y"]), &clock);
        assert_eq!(serde_json::to_value(&quizzes[0]).unwrap(), record);

        let again = normalize_one(
            &serde_json::to_value(&quizzes[0]).unwrap(),
            0,
            &QuizMeta::default(),
            "unused",
        );
        assert_eq!(again, quizzes[0]);
    }

    #[test]
    fn coerces_scalars_to_strings() {
        let raw = json!({
            "id": 7,
            "title": 2024,
            "topic": false,
            "difficulty": ["a", "b"],
            "tags": [1, true, "t"],
            "isFavorite": "yes",
            "questions": [{
                "id": "3",
                "text": 12.5,
                "options": [1, 2, {"k": "v"}],
                "answer": 2,
                "explanation": null
            }]
        });
        let clock = fixed_clock();
        let quiz = &normalize(&[raw], &QuizMeta::default(), &clock)[0];

        assert_eq!(quiz.id, "7");
        assert_eq!(quiz.title, "2024");
        assert_eq!(quiz.topic, "false");
        assert_eq!(quiz.difficulty, "a,b");
        assert_eq!(quiz.tags, vec!["1", "true", "t"]);
        assert!(quiz.is_favorite);

        let q = &quiz.questions[0];
        assert_eq!(q.id, 1, "string ids fall back to position");
        assert_eq!(q.text, "12.5");
        assert_eq!(q.options, vec!["1", "2", r#"{"k":"v"}"#]);
        assert_eq!(q.answer, "2");
        assert_eq!(q.explanation, "");
    }

    #[test]
    fn non_array_lists_are_treated_as_absent() {
        let raw = json!({
            "tags": "a,b",
            "questions": {"id": 1},
        });
        let clock = fixed_clock();
        let quiz = &normalize(&[raw], &meta("", "", &["meta"]), &clock)[0];
        assert_eq!(quiz.tags, vec!["meta"]);
        assert!(quiz.questions.is_empty());

        let q = normalize_question(&json!({"options": "A|B"}), 4);
        assert!(q.options.is_empty());
        assert_eq!(q.id, 5);
    }

    #[test]
    fn question_ids_need_integral_numbers() {
        assert_eq!(normalize_question(&json!({"id": 9}), 0).id, 9);
        assert_eq!(normalize_question(&json!({"id": 4.0}), 0).id, 4);
        assert_eq!(normalize_question(&json!({"id": 4.5}), 2).id, 3);
        assert_eq!(normalize_question(&json!("loose"), 1).id, 2);
    }

    #[test]
    fn favorite_uses_truthiness() {
        let fav = |v: JsonValue| normalize_one(&json!({"isFavorite": v}), 0, &QuizMeta::default(), "t").is_favorite;
        assert!(!fav(json!(0)));
        assert!(!fav(json!("")));
        assert!(!fav(json!(false)));
        assert!(fav(json!(1)));
        assert!(fav(json!([])));
    }

    #[test]
    fn meta_is_read_loosely() {
        let m = meta_from_value(Some(&json!({
            "title": "  Quiz  ",
            "difficulty": null,
            "tags": ["a", 2]
        })));
        assert_eq!(m.title, "Quiz");
        assert_eq!(m.difficulty_or_default(), "medium");
        assert_eq!(m.tags, vec!["a", "2"]);

        let m = meta_from_value(Some(&json!({"tags": "nope"})));
        assert!(m.tags.is_empty());
        assert_eq!(meta_from_value(None), QuizMeta::default());
        assert_eq!(meta_from_value(Some(&json!("junk"))), QuizMeta::default());
    }
}
