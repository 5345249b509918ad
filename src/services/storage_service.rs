use crate::error::{Error, Result};
use crate::models::quiz::Quiz;
use futures::future::join_all;
use reqwest::{Client, Response, StatusCode};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value as JsonValue;
use url::Url;

/// Result of persisting one record during the upload fan-out.
///
/// Serialized as `{ok: true, status, saved}` or `{ok: false, status, error, sent}`.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Saved {
        status: u16,
        saved: JsonValue,
    },
    Rejected {
        status: u16,
        error: JsonValue,
        sent: Quiz,
    },
}

impl UploadOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, UploadOutcome::Saved { .. })
    }

    pub fn status(&self) -> u16 {
        match self {
            UploadOutcome::Saved { status, .. } | UploadOutcome::Rejected { status, .. } => *status,
        }
    }
}

impl Serialize for UploadOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            UploadOutcome::Saved { status, saved } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("ok", &true)?;
                map.serialize_entry("status", status)?;
                map.serialize_entry("saved", saved)?;
                map.end()
            }
            UploadOutcome::Rejected {
                status,
                error,
                sent,
            } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("ok", &false)?;
                map.serialize_entry("status", status)?;
                map.serialize_entry("error", error)?;
                map.serialize_entry("sent", sent)?;
                map.end()
            }
        }
    }
}

async fn json_body(res: Response) -> JsonValue {
    let text = res.text().await.unwrap_or_default();
    serde_json::from_str(&text).unwrap_or_else(|_| JsonValue::Object(Default::default()))
}

/// REST client for the quiz collection (MockAPI-style `GET/POST /`, `GET/PUT/DELETE /:id`).
#[derive(Clone)]
pub struct QuizStore {
    client: Client,
    base_url: Url,
}

impl QuizStore {
    pub fn new(base_url: &str, client: Client) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| Error::Config(format!("Invalid quiz storage URL {}: {}", base_url, e)))?;
        Ok(Self { client, base_url })
    }

    /// `{base}/{id}` with `id` escaped as a single path segment.
    fn item_url(&self, id: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("Quiz storage URL cannot take an id: {}", self.base_url)))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    async fn check(res: Response, what: &str) -> Result<JsonValue> {
        let status = res.status();
        let body = json_body(res).await;
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("{} not found", what)));
        }
        if !status.is_success() {
            return Err(Error::Upstream {
                status: status.as_u16(),
                detail: format!("Quiz storage error (HTTP {})", status.as_u16()),
                raw: body,
            });
        }
        Ok(body)
    }

    pub async fn list(&self) -> Result<Vec<JsonValue>> {
        let res = self.client.get(self.base_url.clone()).send().await?;
        let body = Self::check(res, "Quiz collection").await?;
        Ok(match body {
            JsonValue::Array(items) => items,
            other => {
                tracing::warn!("Quiz storage returned a non-array listing: {}", other);
                vec![]
            }
        })
    }

    pub async fn get(&self, id: &str) -> Result<JsonValue> {
        let res = self.client.get(self.item_url(id)?).send().await?;
        Self::check(res, &format!("Quiz {}", id)).await
    }

    pub async fn update(&self, quiz: &Quiz) -> Result<JsonValue> {
        let res = self
            .client
            .put(self.item_url(&quiz.id)?)
            .json(quiz)
            .send()
            .await?;
        Self::check(res, &format!("Quiz {}", quiz.id)).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let res = self.client.delete(self.item_url(id)?).send().await?;
        Self::check(res, &format!("Quiz {}", id)).await?;
        Ok(())
    }

    async fn upload_one(&self, quiz: &Quiz) -> UploadOutcome {
        match self.client.post(self.base_url.clone()).json(quiz).send().await {
            Ok(res) => {
                let status = res.status();
                let body = json_body(res).await;
                if status.is_success() {
                    UploadOutcome::Saved {
                        status: status.as_u16(),
                        saved: body,
                    }
                } else {
                    tracing::warn!(quiz_id = %quiz.id, status = status.as_u16(), "Quiz upload rejected");
                    UploadOutcome::Rejected {
                        status: status.as_u16(),
                        error: body,
                        sent: quiz.clone(),
                    }
                }
            }
            Err(e) => {
                tracing::warn!(quiz_id = %quiz.id, error = %e, "Quiz upload failed");
                UploadOutcome::Rejected {
                    status: 0,
                    error: JsonValue::String(e.to_string()),
                    sent: quiz.clone(),
                }
            }
        }
    }

    /// Creates every record concurrently; outcomes come back in input order
    /// once all calls have settled.
    pub async fn upload_all(&self, quizzes: &[Quiz]) -> Vec<UploadOutcome> {
        join_all(quizzes.iter().map(|quiz| self.upload_one(quiz))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(base: &str) -> QuizStore {
        QuizStore::new(base, Client::new()).unwrap()
    }

    #[test]
    fn item_ids_are_escaped_as_one_segment() {
        let store = store("http://storage.test/Questions/");
        assert_eq!(
            store.item_url("x?search=y").unwrap().as_str(),
            "http://storage.test/Questions/x%3Fsearch=y"
        );
        assert_eq!(
            store.item_url("a/b#c").unwrap().as_str(),
            "http://storage.test/Questions/a%2Fb%23c"
        );
        assert_eq!(store.item_url("12").unwrap().as_str(), "http://storage.test/Questions/12");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(QuizStore::new("not a url", Client::new()), Err(Error::Config(_))));
    }
}
