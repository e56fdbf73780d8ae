use wrenchbot_core::domain::estimate::{group_thousands, CostEstimate, PriceLabel, DEFAULT_ESTIMATE_NOTE};
use wrenchbot_core::domain::lead::LeadRecord;
use wrenchbot_core::domain::service::ServiceTagSet;
use wrenchbot_core::domain::vehicle::{VehicleProfile, TIER_PENDING_LABEL};
use wrenchbot_core::sanitize::escape_markdown;

/// Renders the admin-chat notification for a qualified lead.
///
/// Sections appear in a fixed order and are omitted entirely when they
/// have no data. User-supplied fragments (the original message and the
/// dialog context) are escaped before insertion; everything else is
/// produced from fixed vocabulary and balanced markup, so the rendered
/// text already satisfies the transport's dialect.
pub fn render_lead(lead: &LeadRecord) -> String {
    let mut text = String::new();

    text.push_str("🔔 **NEW SERVICE REQUEST**\n\n");
    text.push_str(&format!(
        "👤 **Client:** {} - `{}`\n",
        requester_display(lead),
        lead.requester.id
    ));
    text.push_str(&format!("⏰ **Time:** {}\n", lead.created_at.format("%Y-%m-%d %H:%M")));
    text.push_str(&format!("🎯 **Confidence:** {:.1}%\n\n", lead.confidence * 100.0));
    text.push_str("💬 **Message:**\n");
    text.push_str(&format!("```\n{}\n```\n\n", escape_markdown(&lead.original_text)));

    text.push_str(&vehicle_section(lead.vehicle.as_ref()));
    text.push_str(&services_section(&lead.services));
    text.push_str(&cost_section(lead.estimate.as_ref()));
    text.push_str(&context_section(&lead.dialog_context));
    text.push_str(&actions_section(lead.requester.id));

    text
}

/// Prefer a linked handle, then the first name, then a numeric placeholder.
fn requester_display(lead: &LeadRecord) -> String {
    if let Some(handle) = &lead.requester.handle {
        return format!("[@{handle}](https://t.me/{handle})");
    }
    if let Some(first_name) = &lead.requester.first_name {
        return first_name.clone();
    }
    format!("User#{}", lead.requester.id)
}

fn vehicle_section(vehicle: Option<&VehicleProfile>) -> String {
    let Some(vehicle) = vehicle else {
        return String::new();
    };
    if vehicle.is_empty() {
        return String::new();
    }

    let mut section = String::from("🚗 **Vehicle:**\n");
    if let Some(make_model) = &vehicle.make_model {
        section.push_str(&format!("• Make and model: {make_model}\n"));
    }
    if let Some(year) = vehicle.year {
        section.push_str(&format!("• Year: {year}\n"));
    }
    match (&vehicle.tier_label, &vehicle.make_model) {
        (Some(label), _) => section.push_str(&format!("• Class: {label}\n")),
        (None, Some(_)) => section.push_str(&format!("• Class: {TIER_PENDING_LABEL}\n")),
        (None, None) => {}
    }
    if let Some(mileage) = vehicle.mileage_km {
        section.push_str(&format!("• Mileage: {} km\n", group_thousands(u64::from(mileage))));
    }
    section.push('\n');
    section
}

fn services_section(services: &ServiceTagSet) -> String {
    if services.is_empty() {
        return String::new();
    }
    let mut section = String::from("🔧 **Requested work:**\n");
    for (index, service) in services.iter().enumerate() {
        section.push_str(&format!("{}. {service}\n", index + 1));
    }
    section.push('\n');
    section
}

fn cost_section(estimate: Option<&CostEstimate>) -> String {
    let Some(estimate) = estimate else {
        return String::new();
    };

    let mut section = String::from("💰 **Cost estimate:**\n");
    for item in &estimate.line_items {
        section.push_str(&format!("• {}: {}\n", item.display_name, item.price));
    }
    if let PriceLabel::Amount(_) = estimate.total {
        section.push_str(&format!("• **Base total:** {}\n", estimate.total));
    }
    let note =
        if estimate.note.trim().is_empty() { DEFAULT_ESTIMATE_NOTE } else { estimate.note.as_str() };
    section.push_str(&format!("{note}\n\n"));
    section
}

fn context_section(context: &str) -> String {
    if context.trim().is_empty() {
        return String::new();
    }
    format!("💬 **Dialog context:**\n{}\n\n", escape_markdown(context))
}

fn actions_section(user_id: i64) -> String {
    format!(
        "🔗 **Actions:**\n/answer_{user_id} - reply to the client\n/close_{user_id} - close the request"
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::render_lead;
    use wrenchbot_core::domain::estimate::{CostEstimate, CostLineItem, PriceLabel, DEFAULT_ESTIMATE_NOTE};
    use wrenchbot_core::domain::lead::{LeadRecord, Requester};
    use wrenchbot_core::domain::service::ServiceTagSet;
    use wrenchbot_core::domain::vehicle::{VehicleProfile, VehicleTier, TIER_PENDING_LABEL};
    use wrenchbot_core::sanitize;

    fn bare_lead() -> LeadRecord {
        LeadRecord {
            id: Uuid::new_v4(),
            confidence: 1.0,
            original_text: "need help".to_string(),
            vehicle: None,
            services: ServiceTagSet::new(),
            estimate: None,
            dialog_context: String::new(),
            requester: Requester { id: 12_345, handle: None, first_name: None },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn bare_lead_renders_header_and_actions_only() {
        let text = render_lead(&bare_lead());

        assert!(text.contains("NEW SERVICE REQUEST"));
        assert!(text.contains("User#12345"));
        assert!(text.contains("/answer_12345"));
        assert!(text.contains("/close_12345"));
        assert!(!text.contains("Vehicle:"));
        assert!(!text.contains("Requested work:"));
        assert!(!text.contains("Cost estimate:"));
        assert!(!text.contains("Dialog context:"));
    }

    #[test]
    fn handle_is_rendered_as_a_link() {
        let mut lead = bare_lead();
        lead.requester.handle = Some("driver".to_string());
        lead.requester.first_name = Some("Alex".to_string());

        let text = render_lead(&lead);
        assert!(text.contains("[@driver](https://t.me/driver)"));
        assert!(!text.contains("User#12345"));
    }

    #[test]
    fn first_name_is_used_without_a_handle() {
        let mut lead = bare_lead();
        lead.requester.first_name = Some("Alex".to_string());

        let text = render_lead(&lead);
        assert!(text.contains("**Client:** Alex"));
    }

    #[test]
    fn vehicle_section_lists_only_known_facts() {
        let mut lead = bare_lead();
        lead.vehicle = Some(VehicleProfile {
            make_model: Some("Toyota Camry".to_string()),
            year: Some(2018),
            mileage_km: Some(85_000),
            tier: Some(VehicleTier::Business),
            tier_label: Some(VehicleTier::Business.label().to_string()),
        });

        let text = render_lead(&lead);
        assert!(text.contains("🚗 **Vehicle:**"));
        assert!(text.contains("• Make and model: Toyota Camry"));
        assert!(text.contains("• Year: 2018"));
        assert!(text.contains("• Class: business class and crossovers"));
        assert!(text.contains("• Mileage: 85 000 km"));
    }

    #[test]
    fn partial_vehicle_omits_unknown_lines() {
        let mut lead = bare_lead();
        lead.vehicle = Some(VehicleProfile {
            make_model: Some("Porsche".to_string()),
            tier_label: Some(TIER_PENDING_LABEL.to_string()),
            ..VehicleProfile::default()
        });

        let text = render_lead(&lead);
        assert!(text.contains("• Make and model: Porsche"));
        assert!(text.contains(&format!("• Class: {TIER_PENDING_LABEL}")));
        assert!(!text.contains("• Year:"));
        assert!(!text.contains("• Mileage:"));
    }

    #[test]
    fn services_are_numbered_in_extraction_order() {
        let mut lead = bare_lead();
        lead.services = ["Diagnostics", "Brakes", "Oil"].into_iter().collect();

        let text = render_lead(&lead);
        assert!(text.contains("🔧 **Requested work:**"));
        assert!(text.contains("1. Diagnostics"));
        assert!(text.contains("2. Brakes"));
        assert!(text.contains("3. Oil"));
    }

    #[test]
    fn cost_section_bolds_a_known_total() {
        let mut lead = bare_lead();
        lead.estimate = Some(CostEstimate {
            line_items: vec![
                CostLineItem {
                    display_name: "Suspension diagnostics (business class and crossovers)"
                        .to_string(),
                    price: PriceLabel::Amount(2_500),
                    amount: 2_500,
                },
                CostLineItem {
                    display_name: "Antigravel film (quote on request)".to_string(),
                    price: PriceLabel::OnRequest,
                    amount: 0,
                },
            ],
            total: PriceLabel::Amount(2_500),
            total_amount: 2_500,
            note: DEFAULT_ESTIMATE_NOTE.to_string(),
            tier: VehicleTier::Business,
        });

        let text = render_lead(&lead);
        assert!(text.contains("💰 **Cost estimate:**"));
        assert!(text.contains("• Suspension diagnostics (business class and crossovers): 2 500 ₽"));
        assert!(text.contains("• Antigravel film (quote on request): on request"));
        assert!(text.contains("• **Base total:** 2 500 ₽"));
        assert!(text.contains(DEFAULT_ESTIMATE_NOTE));
    }

    #[test]
    fn on_request_total_is_not_bolded_in() {
        let mut lead = bare_lead();
        lead.estimate = Some(CostEstimate {
            line_items: vec![CostLineItem {
                display_name: "Unknown service (quote on request)".to_string(),
                price: PriceLabel::OnRequest,
                amount: 0,
            }],
            total: PriceLabel::OnRequest,
            total_amount: 0,
            note: DEFAULT_ESTIMATE_NOTE.to_string(),
            tier: VehicleTier::Compact,
        });

        let text = render_lead(&lead);
        assert!(!text.contains("Base total"));
    }

    #[test]
    fn dialog_context_is_escaped() {
        let mut lead = bare_lead();
        lead.dialog_context = "knocking *noise* over bumps".to_string();

        let text = render_lead(&lead);
        assert!(text.contains("💬 **Dialog context:**"));
        assert!(text.contains(r"knocking \*noise\* over bumps"));
    }

    #[test]
    fn original_message_markup_cannot_break_the_notification() {
        let mut lead = bare_lead();
        lead.original_text = "unbalanced ```fence and *stars".to_string();

        let text = render_lead(&lead);
        // A rendered notification is already within the dialect, so the
        // sanitizer treats it as a fixed point.
        assert_eq!(sanitize::sanitize(&text), text);
    }

    #[test]
    fn rendered_notification_is_sanitizer_stable() {
        let mut lead = bare_lead();
        lead.requester.handle = Some("driver".to_string());
        lead.services = ["Diagnostics"].into_iter().collect();
        lead.dialog_context = "context with `tick".to_string();

        let text = render_lead(&lead);
        assert_eq!(sanitize::sanitize(&text), text);
    }
}
