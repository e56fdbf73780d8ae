use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::estimate::CostEstimate;
use crate::domain::service::ServiceTagSet;
use crate::domain::vehicle::VehicleProfile;

/// Identity of the person behind a qualified request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub id: i64,
    pub handle: Option<String>,
    pub first_name: Option<String>,
}

/// A qualified service request, assembled once at escalation time and
/// never mutated afterwards. Enrichment and fallback data are merged by
/// the detector before construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: Uuid,
    pub confidence: f32,
    pub original_text: String,
    pub vehicle: Option<VehicleProfile>,
    pub services: ServiceTagSet,
    pub estimate: Option<CostEstimate>,
    pub dialog_context: String,
    pub requester: Requester,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::{LeadRecord, Requester};
    use crate::domain::service::ServiceTagSet;
    use crate::domain::vehicle::{VehicleProfile, VehicleTier};

    #[test]
    fn lead_record_serializes_round_trip() {
        let lead = LeadRecord {
            id: Uuid::new_v4(),
            confidence: 1.0,
            original_text: "Toyota Camry, suspension diagnostics".to_string(),
            vehicle: Some(VehicleProfile {
                make_model: Some("Toyota Camry".to_string()),
                year: Some(2018),
                mileage_km: Some(85_000),
                tier: Some(VehicleTier::Business),
                tier_label: Some(VehicleTier::Business.label().to_string()),
            }),
            services: ["Diagnostics", "Suspension"].into_iter().collect::<ServiceTagSet>(),
            estimate: None,
            dialog_context: "Knocking noise over bumps".to_string(),
            requester: Requester { id: 12_345, handle: Some("driver".to_string()), first_name: None },
            created_at: Utc::now(),
        };

        let encoded = serde_json::to_string(&lead).expect("serialize lead");
        let decoded: LeadRecord = serde_json::from_str(&encoded).expect("deserialize lead");
        assert_eq!(decoded, lead);
    }
}
