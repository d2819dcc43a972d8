//! Transcript entries.

use chrono::{DateTime, Utc};
use kontrol_common::{MessageId, Role};
use serde::{Deserialize, Serialize};

use crate::Visualization;

/// One transcript entry. Fields are fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    role: Role,
    content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<Visualization>,
    is_error: bool,
    created_at: DateTime<Utc>,
}

impl Message {
    pub(crate) fn user(id: MessageId, content: String) -> Self {
        Self::build(id, Role::User, content, Vec::new(), false)
    }

    pub(crate) fn assistant(
        id: MessageId,
        content: String,
        attachments: Vec<Visualization>,
    ) -> Self {
        Self::build(id, Role::Assistant, content, attachments, false)
    }

    /// Assistant-authored entry standing in for a failed answer.
    pub(crate) fn failure(id: MessageId, fallback_text: String) -> Self {
        Self::build(id, Role::Assistant, fallback_text, Vec::new(), true)
    }

    fn build(
        id: MessageId,
        role: Role,
        content: String,
        attachments: Vec<Visualization>,
        is_error: bool,
    ) -> Self {
        Self {
            id,
            role,
            content,
            attachments,
            is_error,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn attachments(&self) -> &[Visualization] {
        &self.attachments
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
