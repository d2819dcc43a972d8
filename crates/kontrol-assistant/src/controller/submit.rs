//! Message submission, draft editing and settlement handling.

use std::sync::Arc;

use kontrol_common::{MessageId, WidgetEvent};
use tracing::{debug, warn};

use crate::message::Message;
use crate::ResponderError;

use super::manager::AssistantController;
use super::types::{RejectReason, Settlement, SubmitOutcome};

impl AssistantController {
    /// Append a user message and ask the responder for an answer.
    ///
    /// Rejected without any state change when the text is blank, longer than
    /// `max_input_len`, or a previous request is still in flight. Must be
    /// called inside a Tokio runtime; the responder runs as a spawned task.
    pub fn submit_message(&mut self, text: impl Into<String>) -> SubmitOutcome {
        let text = text.into();

        if let Some(reason) = self.check_submission(&text) {
            debug!(widget = %self.id, ?reason, "submission rejected");
            return SubmitOutcome::Rejected(reason);
        }

        let message = Message::user(self.next_message_id(), text.clone());
        let id = message.id();
        self.append(message);
        if let Some(last) = self.transcript.last() {
            self.hooks.on_submit(last);
        }

        let request = self.next_request;
        self.next_request += 1;
        self.in_flight = Some(request);
        self.events.publish(WidgetEvent::AwaitingChanged(true));

        let responder = Arc::clone(&self.responder);
        let tx = self.settle_tx.clone();
        let widget = self.id.clone();
        tokio::spawn(async move {
            // Inner task so a panicking responder still settles the request
            let call = tokio::spawn(async move { responder.respond(&text).await });
            let outcome = match call.await {
                Ok(outcome) => outcome,
                Err(e) => Err(ResponderError::Unavailable(format!("responder task failed: {e}"))),
            };
            if tx.send(Settlement { request, outcome }).is_err() {
                debug!(%widget, request, "widget unmounted before settlement, reply dropped");
            }
        });

        debug!(widget = %self.id, request, message = %id, "submission accepted");
        SubmitOutcome::Accepted(id)
    }

    /// Submit the draft buffer. The draft is cleared only if accepted.
    pub fn submit_draft(&mut self) -> SubmitOutcome {
        let text = self.draft.clone();
        let outcome = self.submit_message(text);
        if outcome.is_accepted() {
            self.draft.clear();
        }
        outcome
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn append_draft(&mut self, text: &str) {
        self.draft.push_str(text);
    }

    pub fn backspace_draft(&mut self) {
        self.draft.pop();
    }

    /// Copy visible suggestion `index` into the draft. Returns false when no
    /// such suggestion is shown.
    pub fn apply_suggestion(&mut self, index: usize) -> bool {
        match self.visible_suggestions().get(index).cloned() {
            Some(suggestion) => {
                self.draft = suggestion;
                true
            }
            None => false,
        }
    }

    /// Apply every settlement that has already arrived (non-blocking).
    /// Returns how many were applied.
    pub fn poll_settlements(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(settlement) = self.settle_rx.try_recv() {
            self.apply_settlement(settlement);
            applied += 1;
        }
        applied
    }

    /// Wait for the outstanding request to settle and apply it.
    ///
    /// Returns false immediately when nothing is in flight. Cancel-safe.
    pub async fn next_settlement(&mut self) -> bool {
        if self.in_flight.is_none() {
            return false;
        }
        match self.settle_rx.recv().await {
            Some(settlement) => {
                self.apply_settlement(settlement);
                true
            }
            None => false,
        }
    }

    fn check_submission(&self, text: &str) -> Option<RejectReason> {
        if self.in_flight.is_some() {
            return Some(RejectReason::AwaitingResponse);
        }
        if text.trim().is_empty() {
            return Some(RejectReason::Empty);
        }
        if text.chars().count() > self.config.max_input_len as usize {
            return Some(RejectReason::TooLong);
        }
        None
    }

    fn apply_settlement(&mut self, settlement: Settlement) {
        if self.in_flight != Some(settlement.request) {
            warn!(
                widget = %self.id,
                request = settlement.request,
                "ignoring settlement for a request that is not in flight"
            );
            return;
        }

        let id = self.next_message_id();
        let message = match settlement.outcome {
            Ok(reply) => Message::assistant(id, reply.text, reply.attachments),
            Err(e) => {
                warn!(widget = %self.id, request = settlement.request, error = %e, "responder failed");
                Message::failure(id, self.config.fallback_text.clone())
            }
        };
        self.append(message);

        self.in_flight = None;
        self.events.publish(WidgetEvent::AwaitingChanged(false));
    }

    fn append(&mut self, message: Message) {
        self.events.publish(WidgetEvent::MessageAppended {
            id: message.id(),
            role: message.role(),
            is_error: message.is_error(),
        });
        self.transcript.push(message);
    }

    fn next_message_id(&mut self) -> MessageId {
        let id = MessageId(self.next_message);
        self.next_message += 1;
        id
    }
}
