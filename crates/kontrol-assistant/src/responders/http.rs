//! Responder backed by the portfolio backend's HTTP API.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use kontrol_common::Section;
use kontrol_config::schema::ResponderConfig;
use tracing::debug;

use crate::{Reply, Responder, ResponderError, Visualization};

/// Env var holding the bearer token sent with every question.
pub const API_TOKEN_ENV: &str = "KONTROL_API_TOKEN";

/// POSTs `{question, section}` to the backend and reads `{text, attachments?}`.
pub struct HttpResponder {
    endpoint: String,
    section: Section,
    token: Option<String>,
    http: reqwest::Client,
}

impl fmt::Debug for HttpResponder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponder")
            .field("endpoint", &self.endpoint)
            .field("section", &self.section)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl HttpResponder {
    /// Build a client for `config.endpoint`. Picks up a bearer token from
    /// `KONTROL_API_TOKEN` if set.
    pub fn new(config: &ResponderConfig, section: Section) -> Result<Self, ResponderError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_secs)))
            .build()
            .map_err(|e| ResponderError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            section,
            token: std::env::var(API_TOKEN_ENV).ok().filter(|t| !t.is_empty()),
            http,
        })
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub(crate) fn build_request_body(&self, question: &str) -> serde_json::Value {
        serde_json::json!({
            "question": question,
            "section": self.section.as_str(),
        })
    }

    /// Parse the backend's answer. `text` is required; `attachments` may be
    /// missing or null.
    pub(crate) fn parse_response(json: serde_json::Value) -> Result<Reply, ResponderError> {
        let text = json["text"]
            .as_str()
            .ok_or_else(|| ResponderError::Parse("response has no \"text\" field".into()))?
            .to_string();

        let attachments = match &json["attachments"] {
            serde_json::Value::Null => Vec::new(),
            serde_json::Value::Array(items) => {
                items.iter().cloned().map(Visualization::new).collect()
            }
            other => {
                return Err(ResponderError::Parse(format!(
                    "\"attachments\" must be an array, got {other}"
                )))
            }
        };

        Ok(Reply { text, attachments })
    }
}

#[async_trait]
impl Responder for HttpResponder {
    async fn respond(&self, question: &str) -> Result<Reply, ResponderError> {
        let body = self.build_request_body(question);

        debug!(endpoint = %self.endpoint, section = %self.section, "assistant backend request");

        let mut request = self
            .http
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&body);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ResponderError::Timeout
            } else {
                ResponderError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ResponderError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(ResponderError::Api(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ResponderError::Parse(e.to_string()))?;

        Self::parse_response(json)
    }
}
