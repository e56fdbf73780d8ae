use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::vehicle::VehicleTier;

/// Default note attached to every calculated estimate unless the caller
/// supplies a custom one.
pub const DEFAULT_ESTIMATE_NOTE: &str = "Final cost is determined after diagnostics";

/// A price that is either a concrete amount or deferred to a human quote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceLabel {
    Amount(u32),
    OnRequest,
}

impl fmt::Display for PriceLabel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(value) => write!(formatter, "{} ₽", group_thousands(u64::from(*value))),
            Self::OnRequest => formatter.write_str("on request"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLineItem {
    pub display_name: String,
    pub price: PriceLabel,
    /// Contribution to the estimate total; zero for on-request items.
    pub amount: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub line_items: Vec<CostLineItem>,
    pub total: PriceLabel,
    pub total_amount: u32,
    pub note: String,
    pub tier: VehicleTier,
}

/// Groups digits by spaces every three positions from the right.
pub fn group_thousands(value: u64) -> String {
    let digits: Vec<char> = value.to_string().chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.iter().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(*digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::{group_thousands, PriceLabel};

    #[test]
    fn groups_thousands_with_spaces() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(950), "950");
        assert_eq!(group_thousands(2_500), "2 500");
        assert_eq!(group_thousands(85_000), "85 000");
        assert_eq!(group_thousands(1_234_567), "1 234 567");
    }

    #[test]
    fn renders_amounts_and_the_sentinel() {
        assert_eq!(PriceLabel::Amount(2_500).to_string(), "2 500 ₽");
        assert_eq!(PriceLabel::OnRequest.to_string(), "on request");
    }
}
