use tracing::{debug, warn};

use crate::domain::estimate::{CostEstimate, CostLineItem, PriceLabel, DEFAULT_ESTIMATE_NOTE};
use crate::domain::service::ServiceTagSet;
use crate::domain::vehicle::VehicleTier;

use super::catalog::PriceCatalog;

/// Prices a set of requested services against one vehicle tier.
///
/// Services missing from the catalog are never dropped: they become
/// on-request line items contributing nothing to the total, so the
/// rendered estimate always accounts for everything the customer asked
/// for.
pub struct CostCalculator {
    catalog: PriceCatalog,
}

impl CostCalculator {
    pub fn new(catalog: PriceCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PriceCatalog {
        &self.catalog
    }

    pub fn calculate(
        &self,
        services: &ServiceTagSet,
        tier: Option<VehicleTier>,
    ) -> Option<CostEstimate> {
        let tier = tier?;
        if services.is_empty() {
            return None;
        }
        debug!(services = services.len(), tier = tier.rank(), "calculating estimate");

        let mut line_items = Vec::with_capacity(services.len());
        let mut total: u32 = 0;
        for service in services.iter() {
            match self.catalog.find_price(service, tier) {
                Some(entry) => {
                    line_items.push(CostLineItem {
                        display_name: format!("{service} ({})", tier.label()),
                        price: PriceLabel::Amount(entry.price),
                        amount: entry.price,
                    });
                    total = total.saturating_add(entry.price);
                }
                None => {
                    warn!(service, "service not in price list, quoting on request");
                    line_items.push(CostLineItem {
                        display_name: format!("{service} (quote on request)"),
                        price: PriceLabel::OnRequest,
                        amount: 0,
                    });
                }
            }
        }

        let total_label =
            if total > 0 { PriceLabel::Amount(total) } else { PriceLabel::OnRequest };
        Some(CostEstimate {
            line_items,
            total: total_label,
            total_amount: total,
            note: DEFAULT_ESTIMATE_NOTE.to_string(),
            tier,
        })
    }
}
