use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use wrenchbot_core::domain::estimate::CostEstimate;
use wrenchbot_core::domain::lead::{LeadRecord, Requester};
use wrenchbot_core::domain::service::ServiceTagSet;
use wrenchbot_core::domain::vehicle::VehicleProfile;

/// Confidence assigned to every lead built here. The upstream LLM already
/// judged the message to be a service request; no score is re-derived.
pub const DELEGATED_CONFIDENCE: f32 = 1.0;

/// The triggering tool call, as an explicit input type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeadSignal {
    pub message_text: String,
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub conversation_context: Option<String>,
}

impl LeadSignal {
    pub fn new(message_text: impl Into<String>, user_id: i64) -> Self {
        Self {
            message_text: message_text.into(),
            user_id,
            username: None,
            first_name: None,
            conversation_context: None,
        }
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn conversation_context(mut self, context: impl Into<String>) -> Self {
        self.conversation_context = Some(context.into());
        self
    }
}

/// Structured data computed ahead of the triggering event, and also the
/// shape of the inline fallback parameters a tool call may carry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LeadEnrichment {
    pub vehicle: Option<VehicleProfile>,
    pub services: Option<ServiceTagSet>,
    pub estimate: Option<CostEstimate>,
    pub dialog_context: Option<String>,
}

impl LeadEnrichment {
    pub fn is_empty(&self) -> bool {
        self.vehicle.is_none()
            && self.services.is_none()
            && self.estimate.is_none()
            && self.dialog_context.is_none()
    }
}

/// Snapshot of the configuration the detector needs, injected explicitly.
#[derive(Clone, Debug, Default)]
pub struct DetectorConfig {
    pub admin_chat_id: Option<i64>,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DetectError {
    #[error("admin chat is not configured; lead cannot be dispatched")]
    AdminChatUnconfigured,
}

/// Builds `LeadRecord`s from a triggering signal. Enrichment is attached
/// once at construction time; at build time it wins field-by-field over
/// any inline fallback.
#[derive(Clone, Debug, Default)]
pub struct RequestDetector {
    config: DetectorConfig,
    enrichment: Option<LeadEnrichment>,
}

impl RequestDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config, enrichment: None }
    }

    pub fn with_enrichment(mut self, enrichment: LeadEnrichment) -> Self {
        self.enrichment = Some(enrichment);
        self
    }

    pub fn enrichment(&self) -> Option<&LeadEnrichment> {
        self.enrichment.as_ref()
    }

    /// The chat qualified leads are dispatched to, or an error when the
    /// deployment never configured one.
    pub fn admin_chat_id(&self) -> Result<i64, DetectError> {
        self.config.admin_chat_id.ok_or(DetectError::AdminChatUnconfigured)
    }

    /// Merges enrichment over fallback and freezes the result into a
    /// record. Dialog context falls back once more to the signal's own
    /// conversation context before going empty.
    pub fn build_lead(&self, signal: &LeadSignal, fallback: &LeadEnrichment) -> LeadRecord {
        let enrichment = self.enrichment.clone().unwrap_or_default();
        debug!(
            enriched = !enrichment.is_empty(),
            user_id = signal.user_id,
            "building lead record"
        );

        let vehicle = enrichment.vehicle.or_else(|| fallback.vehicle.clone());
        let services = enrichment
            .services
            .or_else(|| fallback.services.clone())
            .unwrap_or_default();
        let estimate = enrichment.estimate.or_else(|| fallback.estimate.clone());
        let dialog_context = enrichment
            .dialog_context
            .or_else(|| fallback.dialog_context.clone())
            .or_else(|| signal.conversation_context.clone())
            .unwrap_or_default();

        let lead = LeadRecord {
            id: Uuid::new_v4(),
            confidence: DELEGATED_CONFIDENCE,
            original_text: signal.message_text.clone(),
            vehicle,
            services,
            estimate,
            dialog_context,
            requester: Requester {
                id: signal.user_id,
                handle: signal.username.clone(),
                first_name: signal.first_name.clone(),
            },
            created_at: Utc::now(),
        };
        info!(lead_id = %lead.id, user_id = signal.user_id, "lead qualified");
        lead
    }
}
