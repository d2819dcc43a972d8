//! Assistant widget controller.
//!
//! `AssistantController` owns panel visibility, the transcript and the
//! in-flight request. Responder calls run as spawned tasks; their results
//! come back over a channel and are applied by whoever owns the controller,
//! so every state change happens on the owner's thread.

mod manager;
mod panel;
mod submit;
mod types;

#[cfg(test)]
mod tests;

pub use manager::{AssistantController, ControllerBuilder};
pub use types::{RejectReason, SubmitOutcome, WidgetSnapshot};
