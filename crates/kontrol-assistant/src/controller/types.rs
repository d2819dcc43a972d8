//! Controller result and snapshot types.

use kontrol_common::{MessageId, PanelVisibility, Theme, WidgetId};
use kontrol_config::schema::WidgetPosition;
use serde::Serialize;

use crate::message::Message;
use crate::{Reply, ResponderError};

/// Result of a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// User message appended with this id; a responder call is in flight.
    Accepted(MessageId),
    /// Nothing changed.
    Rejected(RejectReason),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

/// Why a submission was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Empty or whitespace-only text.
    Empty,
    /// Longer than `max_input_len` characters.
    TooLong,
    /// A previous submission has not settled yet.
    AwaitingResponse,
}

/// Completion of one responder call, sent back to the controller.
pub(super) struct Settlement {
    pub(super) request: u64,
    pub(super) outcome: Result<Reply, ResponderError>,
}

/// Everything a renderer needs to draw the widget.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetSnapshot {
    pub widget_id: WidgetId,
    pub visibility: PanelVisibility,
    pub position: WidgetPosition,
    pub theme: Theme,
    pub title: String,
    pub greeting: String,
    pub messages: Vec<Message>,
    pub awaiting_response: bool,
    /// Empty once the conversation has started.
    pub suggestions: Vec<String>,
    pub draft: String,
}
