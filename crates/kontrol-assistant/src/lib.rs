//! Assistant widget core for KONTROL.
//!
//! Provides the chat panel controller and its collaborators:
//! - `Responder` boundary to whatever answers portfolio questions
//! - Append-only transcript of `Message`s
//! - Single-flight submission with fallback messages on failure
//! - Section contexts (title, greeting, suggested questions)
//! - HTTP, canned and timeout-wrapping responders

pub mod controller;
pub mod hooks;
pub mod message;
pub mod responders;
pub mod sections;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use controller::{
    AssistantController, ControllerBuilder, RejectReason, SubmitOutcome, WidgetSnapshot,
};
pub use hooks::{NoopHooks, WidgetHooks};
pub use message::Message;
pub use responders::{CannedResponder, HttpResponder, TimeoutResponder};
pub use sections::SectionContext;

/// Answers a question typed into the widget.
///
/// Any error is treated the same way by the controller: the user sees the
/// configured fallback text.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, question: &str) -> Result<Reply, ResponderError>;
}

/// Successful responder answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<Visualization>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachments: Vec::new(),
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<Visualization>) -> Self {
        self.attachments = attachments;
        self
    }
}

/// Chart or table payload returned next to an answer. Passed through to the
/// renderer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Visualization(serde_json::Value);

impl Visualization {
    pub fn new(payload: serde_json::Value) -> Self {
        Self(payload)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResponderError {
    #[error("API error: {0}")]
    Api(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Timeout")]
    Timeout,
    #[error("Responder unavailable: {0}")]
    Unavailable(String),
}
