use tracing::{debug, warn};

use wrenchbot_core::analysis::DialogAnalyzer;
use wrenchbot_core::config::RateLimitConfig;
use wrenchbot_core::domain::conversation::ConversationTurn;
use wrenchbot_core::domain::lead::LeadRecord;
use wrenchbot_core::pricing::{CostCalculator, PriceCatalog};
use wrenchbot_core::ratelimit::RateLimiter;

use crate::detector::{LeadEnrichment, LeadSignal, RequestDetector};

/// Wires the core components into the inbound flow: throttle first, then
/// analyze the accumulated turns, then price what was asked for.
pub struct EnrichmentPipeline {
    analyzer: DialogAnalyzer,
    calculator: CostCalculator,
    limiter: RateLimiter<i64>,
}

impl EnrichmentPipeline {
    pub fn new(catalog: PriceCatalog, rate_limit: &RateLimitConfig) -> Self {
        Self {
            analyzer: DialogAnalyzer::new(),
            calculator: CostCalculator::new(catalog),
            limiter: RateLimiter::new(rate_limit.requests, rate_limit.window()),
        }
    }

    /// Admission gate for one inbound message. A denied sender gets no
    /// further processing.
    pub fn admit(&self, user_id: i64) -> bool {
        let admitted = self.limiter.allow(&user_id);
        if !admitted {
            warn!(user_id, "sender throttled");
        }
        admitted
    }

    pub fn remaining_requests(&self, user_id: i64) -> usize {
        self.limiter.remaining(&user_id)
    }

    pub fn reset_limit(&self, user_id: i64) {
        self.limiter.reset(&user_id);
    }

    /// Builds the enrichment for a conversation. Fields stay unset when
    /// the analyzer found nothing, so inline fallbacks can still fill
    /// them at lead-build time.
    pub fn enrich(&self, turns: &[ConversationTurn]) -> LeadEnrichment {
        let vehicle = self.analyzer.extract_car_info(turns);
        let services = self.analyzer.extract_services(turns);
        let estimate = self.calculator.calculate(&services, vehicle.tier);
        let dialog_context = self.analyzer.extract_dialog_context(turns);
        debug!(
            has_vehicle = !vehicle.is_empty(),
            services = services.len(),
            priced = estimate.is_some(),
            "conversation enriched"
        );

        LeadEnrichment {
            vehicle: (!vehicle.is_empty()).then_some(vehicle),
            services: (!services.is_empty()).then_some(services),
            estimate,
            dialog_context: (!dialog_context.trim().is_empty()).then_some(dialog_context),
        }
    }

    /// Full escalation path for a message the upstream LLM flagged as a
    /// service request: throttle, enrich, merge, freeze. Returns `None`
    /// when the sender is throttled.
    pub fn qualify(
        &self,
        detector: RequestDetector,
        turns: &[ConversationTurn],
        signal: &LeadSignal,
        fallback: &LeadEnrichment,
    ) -> Option<LeadRecord> {
        if !self.admit(signal.user_id) {
            return None;
        }
        let detector = detector.with_enrichment(self.enrich(turns));
        Some(detector.build_lead(signal, fallback))
    }
}
