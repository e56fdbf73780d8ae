use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use wrenchbot_core::domain::lead::LeadRecord;
use wrenchbot_core::sanitize;

use crate::notification::render_lead;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    Markdown,
    #[serde(rename = "HTML")]
    Html,
}

/// One message on its way to the Bot API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub chat_id: i64,
    pub text: String,
    pub parse_mode: ParseMode,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("transport rejected the message: {0}")]
    Rejected(String),
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// The real transport (webhook or polling client) lives outside this
/// workspace and implements this trait.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_message(&self, message: OutboundMessage) -> Result<(), NotifyError>;
}

/// Dispatch path to the admin chat. Every text passes through the
/// sanitizer before it reaches the notifier, so the transport never sees
/// an oversized or structurally broken message.
pub struct AdminGateway<N> {
    admin_chat_id: i64,
    transport: N,
}

impl<N: Notifier> AdminGateway<N> {
    pub fn new(admin_chat_id: i64, transport: N) -> Self {
        Self { admin_chat_id, transport }
    }

    pub fn transport(&self) -> &N {
        &self.transport
    }

    pub async fn publish(&self, text: &str) -> Result<(), NotifyError> {
        let safe = sanitize::sanitize(text);
        if safe != text {
            warn!(chat_id = self.admin_chat_id, "outbound text needed repair before dispatch");
        }
        debug!(chat_id = self.admin_chat_id, chars = safe.chars().count(), "dispatching message");
        self.transport
            .send_message(OutboundMessage {
                chat_id: self.admin_chat_id,
                text: safe,
                parse_mode: ParseMode::Markdown,
            })
            .await
    }

    pub async fn publish_lead(&self, lead: &LeadRecord) -> Result<(), NotifyError> {
        self.publish(&render_lead(lead)).await
    }
}
