use std::sync::Mutex;

use async_trait::async_trait;
use wrenchbot_agent::detector::{DetectorConfig, LeadEnrichment, LeadSignal, RequestDetector};
use wrenchbot_agent::pipeline::EnrichmentPipeline;
use wrenchbot_core::config::RateLimitConfig;
use wrenchbot_core::domain::conversation::ConversationTurn;
use wrenchbot_core::domain::vehicle::VehicleProfile;
use wrenchbot_core::pricing::PriceCatalog;
use wrenchbot_core::sanitize;
use wrenchbot_telegram::notification::render_lead;
use wrenchbot_telegram::outbound::{AdminGateway, Notifier, NotifyError, OutboundMessage};

fn vehicle(make_model: &str) -> VehicleProfile {
    VehicleProfile { make_model: Some(make_model.to_string()), ..VehicleProfile::default() }
}

#[test]
fn enriched_vehicle_beats_the_inline_fallback_in_the_rendered_notification() {
    let detector = RequestDetector::new(DetectorConfig { admin_chat_id: Some(-1) })
        .with_enrichment(LeadEnrichment {
            vehicle: Some(vehicle("Toyota")),
            ..LeadEnrichment::default()
        });
    let fallback =
        LeadEnrichment { vehicle: Some(vehicle("Honda")), ..LeadEnrichment::default() };

    let lead = detector.build_lead(&LeadSignal::new("my car needs service", 42), &fallback);
    let text = render_lead(&lead);

    assert!(text.contains("Toyota"));
    assert!(!text.contains("Honda"));
}

#[test]
fn full_pipeline_output_renders_within_the_dialect() {
    let catalog = PriceCatalog::from_rows(vec![vec![
        "Suspension diagnostics".to_string(),
        "1000".to_string(),
        "1500".to_string(),
        "2000".to_string(),
    ]]);
    let pipeline =
        EnrichmentPipeline::new(catalog, &RateLimitConfig { requests: 10, window_secs: 60 });
    let turns = vec![ConversationTurn::user(
        "Toyota Camry 2018, 85000 km, need suspension diagnostics. Also *this* `that",
    )];

    let detector = RequestDetector::new(DetectorConfig { admin_chat_id: Some(-1) });
    let signal = LeadSignal::new(
        "Toyota Camry 2018, 85000 km, need suspension diagnostics. Also *this* `that",
        7,
    )
    .username("camry_driver");

    let lead = pipeline
        .qualify(detector, &turns, &signal, &LeadEnrichment::default())
        .expect("admitted");
    let text = render_lead(&lead);

    assert!(text.contains("Toyota Camry"));
    assert!(text.contains("business class and crossovers"));
    assert!(text.contains("85 000 km"));
    assert!(text.contains("Suspension"));
    assert!(text.contains("₽"));
    assert!(text.contains("[@camry_driver](https://t.me/camry_driver)"));
    // Raw user markup was escaped, so the whole notification is already a
    // sanitizer fixed point.
    assert_eq!(sanitize::sanitize(&text), text);
}

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<OutboundMessage>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_message(&self, message: OutboundMessage) -> Result<(), NotifyError> {
        self.sent.lock().expect("lock").push(message);
        Ok(())
    }
}

#[tokio::test]
async fn gateway_delivers_the_rendered_lead_to_the_admin_chat() {
    let notifier = RecordingNotifier::default();
    let detector = RequestDetector::new(DetectorConfig { admin_chat_id: Some(-100_500) })
        .with_enrichment(LeadEnrichment {
            vehicle: Some(vehicle("Toyota")),
            ..LeadEnrichment::default()
        });
    let lead = detector.build_lead(
        &LeadSignal::new("need diagnostics", 12_345).username("driver"),
        &LeadEnrichment::default(),
    );

    let gateway = AdminGateway::new(detector.admin_chat_id().expect("configured"), notifier);
    gateway.publish_lead(&lead).await.expect("send");

    let sent = gateway_messages(&gateway);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].chat_id, -100_500);
    assert!(sent[0].text.contains("Toyota"));
    assert!(sent[0].text.contains("/answer_12345"));
    assert!(sent[0].text.chars().count() <= sanitize::TELEGRAM_MAX_LENGTH);
}

fn gateway_messages(gateway: &AdminGateway<RecordingNotifier>) -> Vec<OutboundMessage> {
    gateway.transport().sent.lock().expect("lock").clone()
}
