//! Offline responder with fixed Spanish replies.

use std::time::Duration;

use async_trait::async_trait;
use kontrol_common::Section;

use crate::{Reply, Responder, ResponderError};

const FISCAL_REPLY: &str = "Para optimizar tu fiscalidad, te recomiendo vender 0.3 BTC antes del \
31 de diciembre para compensar pérdidas. Esto reduciría tu deuda fiscal en aproximadamente \
1.250€. ¿Quieres que simule este escenario?";

/// Answers without a backend. Used for demos and when no endpoint is set.
pub struct CannedResponder {
    section: Section,
    delay: Option<Duration>,
}

impl CannedResponder {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn reply_for(&self, question: &str) -> String {
        match self.section {
            Section::Fiscal => FISCAL_REPLY.to_string(),
            _ => format!(
                "Entiendo tu consulta sobre \"{question}\". Basándome en tus datos actuales, te recomiendo..."
            ),
        }
    }
}

#[async_trait]
impl Responder for CannedResponder {
    async fn respond(&self, question: &str) -> Result<Reply, ResponderError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(Reply::text(self.reply_for(question)))
    }
}
