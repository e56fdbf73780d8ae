use serde::{Deserialize, Serialize};

/// Label used when a make/model is known but no pricing bracket matched it.
pub const TIER_PENDING_LABEL: &str = "requires clarification";

/// Pricing bracket a vehicle falls into. Brackets are ordered: catalog
/// columns and the classification table both index them 1 to 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleTier {
    Compact,
    Business,
    Premium,
}

impl VehicleTier {
    pub const ALL: [VehicleTier; 3] = [Self::Compact, Self::Business, Self::Premium];

    pub fn rank(self) -> u8 {
        match self {
            Self::Compact => 1,
            Self::Business => 2,
            Self::Premium => 3,
        }
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            1 => Some(Self::Compact),
            2 => Some(Self::Business),
            3 => Some(Self::Premium),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Compact => "compact and mid-size cars",
            Self::Business => "business class and crossovers",
            Self::Premium => "premium, SUVs and minivans",
        }
    }
}

/// Vehicle facts recovered from a conversation. Every field is optional:
/// absent data stays absent instead of being guessed. `tier` is set only
/// when the classification table matched; a known make/model with no match
/// carries the pending label instead.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub make_model: Option<String>,
    pub year: Option<u16>,
    pub mileage_km: Option<u32>,
    pub tier: Option<VehicleTier>,
    pub tier_label: Option<String>,
}

impl VehicleProfile {
    pub fn is_empty(&self) -> bool {
        self.make_model.is_none() && self.year.is_none() && self.mileage_km.is_none()
    }
}
