//! Responder configuration types.

use serde::{Deserialize, Serialize};

/// Which responder answers widget questions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum ResponderKind {
    /// POST questions to the portfolio backend.
    Http,
    /// Offline canned replies.
    #[default]
    Canned,
}

/// Responder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponderConfig {
    pub kind: ResponderKind,
    /// Backend URL questions are POSTed to (http kind only).
    pub endpoint: String,
    /// Whole-request deadline in seconds (valid range: 1-300).
    pub timeout_secs: u32,
    /// Connect deadline in seconds (valid range: 1-60).
    pub connect_timeout_secs: u32,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            kind: ResponderKind::Canned,
            endpoint: "http://localhost:8000/api/v1/assistant/query".into(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}
