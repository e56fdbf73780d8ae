//! Deterministic extraction of vehicle facts, requested work and dialog
//! context from accumulated conversation turns. Everything here is a pure
//! read over the turn list: absent data stays absent, and no call ever
//! fails.

mod tables;

use chrono::{Datelike, Utc};
use tracing::debug;

use crate::domain::conversation::{ChatRole, ConversationTurn};
use crate::domain::service::ServiceTagSet;
use crate::domain::vehicle::{VehicleProfile, VehicleTier, TIER_PENDING_LABEL};

use self::tables::{BRAND_RE, MILEAGE_RE, MODEL_RES, SERVICE_RES, TIER_RULES, YEAR_RE};

const MAX_CONTEXT_CHARS: usize = 200;
const MAX_MILEAGE_KM: u32 = 1_000_000;

#[derive(Clone, Copy, Debug, Default)]
pub struct DialogAnalyzer;

impl DialogAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Recovers the vehicle profile from user turns. The brand is taken
    /// from the first turn that mentions one (models are only searched in
    /// that same turn); year and mileage are scanned independently across
    /// all user turns.
    pub fn extract_car_info(&self, turns: &[ConversationTurn]) -> VehicleProfile {
        let make_model = extract_make_model(turns);
        let year = extract_year(turns);
        let mileage_km = extract_mileage(turns);
        let (tier, tier_label) = classify(make_model.as_deref());

        let profile = VehicleProfile { make_model, year, mileage_km, tier, tier_label };
        debug!(?profile, "car info extracted");
        profile
    }

    /// Collects every service category mentioned in any user turn,
    /// deduplicated in first-seen order. Categories are independent, so a
    /// single turn can contribute several.
    pub fn extract_services(&self, turns: &[ConversationTurn]) -> ServiceTagSet {
        let mut services = ServiceTagSet::new();
        for turn in user_turns(turns) {
            for (category, pattern) in SERVICE_RES.iter() {
                if pattern.is_match(&turn.text) {
                    services.insert(category.label());
                }
            }
        }
        debug!(count = services.len(), "services extracted");
        services
    }

    /// The last user turn, cut to a compact summary length.
    pub fn extract_dialog_context(&self, turns: &[ConversationTurn]) -> String {
        let Some(last) = user_turns(turns).last() else {
            return String::new();
        };
        if last.text.chars().count() <= MAX_CONTEXT_CHARS {
            return last.text.clone();
        }
        let mut context: String = last.text.chars().take(MAX_CONTEXT_CHARS - 3).collect();
        context.push_str("...");
        context
    }
}

fn user_turns(turns: &[ConversationTurn]) -> impl Iterator<Item = &ConversationTurn> {
    turns.iter().filter(|turn| turn.role == ChatRole::User)
}

fn extract_make_model(turns: &[ConversationTurn]) -> Option<String> {
    for turn in user_turns(turns) {
        let Some(brand_capture) = BRAND_RE.captures(&turn.text) else {
            continue;
        };
        let brand = brand_capture[1].to_lowercase();
        let model = MODEL_RES
            .get(brand.as_str())
            .and_then(|pattern| pattern.captures(&turn.text))
            .map(|capture| capture[1].to_lowercase());

        // First brand mention wins; later turns are never merged in.
        return Some(match model {
            Some(model) => format!("{} {}", capitalize(&brand), capitalize(&model)),
            None => capitalize(&brand),
        });
    }
    None
}

fn extract_year(turns: &[ConversationTurn]) -> Option<u16> {
    let current_year = Utc::now().year();
    for turn in user_turns(turns) {
        for capture in YEAR_RE.captures_iter(&turn.text) {
            if let Ok(year) = capture[1].parse::<i32>() {
                if (1970..=current_year + 1).contains(&year) {
                    return Some(year as u16);
                }
            }
        }
    }
    None
}

fn extract_mileage(turns: &[ConversationTurn]) -> Option<u32> {
    for turn in user_turns(turns) {
        for capture in MILEAGE_RE.captures_iter(&turn.text) {
            let digits: String =
                capture[1].chars().filter(|character| character.is_ascii_digit()).collect();
            let Ok(value) = digits.parse::<u64>() else {
                continue;
            };
            let unit = capture[2].to_lowercase();
            let kilometers = if unit == "thousand" || unit == "k" { value * 1_000 } else { value };
            if kilometers <= u64::from(MAX_MILEAGE_KM) {
                return Some(kilometers as u32);
            }
        }
    }
    None
}

/// Walks the classification table in order. Brand lists are consulted
/// before model lists within a row; an unclassified but known vehicle
/// gets the pending label, an unknown vehicle gets nothing.
fn classify(make_model: Option<&str>) -> (Option<VehicleTier>, Option<String>) {
    let Some(make_model) = make_model else {
        return (None, None);
    };
    let needle = make_model.to_lowercase();
    for rule in TIER_RULES {
        let brand_hit = rule.brands.iter().any(|brand| needle.contains(brand));
        let model_hit = rule.models.iter().any(|model| needle.contains(model));
        if brand_hit || model_hit {
            return (Some(rule.tier), Some(rule.tier.label().to_string()));
        }
    }
    (None, Some(TIER_PENDING_LABEL.to_string()))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
