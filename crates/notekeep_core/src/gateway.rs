//! HTTP boundary against the note collection backend.

use async_trait::async_trait;
use reqwest::{Response, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use crate::error::GatewayError;
use crate::models::{validate_fields, CreateNoteRequest, Note, NoteId, UpdateNoteRequest};

/// Operations against the remote note collection.
///
/// Implementations translate intents into backend calls and normalize
/// success/failure; they never mutate engine state themselves. Callers decide
/// how to fold results in.
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// Fetch the full collection.
    async fn list_notes(&self) -> Result<Vec<Note>, GatewayError>;

    /// Create a note. Fails fast on empty fields without touching the network.
    async fn create_note(&self, title: &str, content: &str) -> Result<Note, GatewayError>;

    /// Update an existing note by id. Same pre-validation as create; a stale
    /// id surfaces as the backend's non-2xx, i.e. a network failure.
    async fn update_note(
        &self,
        id: NoteId,
        title: &str,
        content: &str,
    ) -> Result<Note, GatewayError>;

    /// Delete a note by id.
    async fn delete_note(&self, id: NoteId) -> Result<(), GatewayError>;
}

/// reqwest-backed implementation of [`NotesApi`].
#[derive(Debug)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpGateway {
    /// Build a gateway for the given server base URL.
    pub fn new(server_url: &str) -> Result<Self, GatewayError> {
        let base_url = Url::parse(server_url).map_err(|err| {
            GatewayError::Network(format!("invalid server URL '{}': {}", server_url, err))
        })?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    /// Replace the default client with a preconfigured one (timeouts, proxies).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn api_url(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                GatewayError::Network(format!(
                    "server URL '{}' cannot be used as an API base",
                    self.base_url
                ))
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn notes_url(&self) -> Result<Url, GatewayError> {
        self.api_url(&["api", "notes"])
    }

    fn note_url(&self, id: NoteId) -> Result<Url, GatewayError> {
        self.api_url(&["api", "notes", &id.to_string()])
    }
}

/// Prefer the backend's JSON `error` field as the failure message.
fn error_message_for_response(status: StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return message.to_string();
        }
    }

    body.to_string()
}

/// Map any non-2xx response to [`GatewayError::Network`].
async fn ensure_success(res: Response, action: &str) -> Result<Response, GatewayError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    Err(GatewayError::Network(format!(
        "{} failed ({}): {}",
        action,
        status,
        error_message_for_response(status, &body)
    )))
}

#[async_trait]
impl NotesApi for HttpGateway {
    async fn list_notes(&self) -> Result<Vec<Note>, GatewayError> {
        let url = self.notes_url()?;
        debug!("GET {}", url);
        let res = self.client.get(url).send().await?;
        let res = ensure_success(res, "list").await?;
        Ok(res.json().await?)
    }

    async fn create_note(&self, title: &str, content: &str) -> Result<Note, GatewayError> {
        validate_fields(title, content)?;

        let url = self.notes_url()?;
        debug!("POST {}", url);
        let body = CreateNoteRequest {
            title: title.to_string(),
            content: content.to_string(),
        };
        let res = self.client.post(url).json(&body).send().await?;
        let res = ensure_success(res, "create").await?;
        Ok(res.json().await?)
    }

    async fn update_note(
        &self,
        id: NoteId,
        title: &str,
        content: &str,
    ) -> Result<Note, GatewayError> {
        validate_fields(title, content)?;

        let url = self.note_url(id)?;
        debug!("PUT {}", url);
        let body = UpdateNoteRequest {
            title: title.to_string(),
            content: content.to_string(),
        };
        let res = self.client.put(url).json(&body).send().await?;
        let res = ensure_success(res, "update").await?;
        Ok(res.json().await?)
    }

    async fn delete_note(&self, id: NoteId) -> Result<(), GatewayError> {
        let url = self.note_url(id)?;
        debug!("DELETE {}", url);
        let res = self.client.delete(url).send().await?;
        ensure_success(res, "delete").await?;
        Ok(())
    }
}
