//! Deadline wrapper for any responder.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::{Reply, Responder, ResponderError};

/// Fails with `ResponderError::Timeout` when `inner` takes longer than the
/// deadline.
pub struct TimeoutResponder<R> {
    inner: R,
    deadline: Duration,
}

impl<R: Responder> TimeoutResponder<R> {
    pub fn new(inner: R, deadline: Duration) -> Self {
        Self { inner, deadline }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

#[async_trait]
impl<R: Responder> Responder for TimeoutResponder<R> {
    async fn respond(&self, question: &str) -> Result<Reply, ResponderError> {
        match tokio::time::timeout(self.deadline, self.inner.respond(question)).await {
            Ok(result) => result,
            Err(_) => {
                debug!(deadline = ?self.deadline, "responder timed out");
                Err(ResponderError::Timeout)
            }
        }
    }
}
