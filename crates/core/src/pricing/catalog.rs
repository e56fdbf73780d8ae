use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::vehicle::VehicleTier;

/// First-cell prefixes marking section headers and disclaimers in the
/// price sheet. Rows starting with one of these carry no service data.
const SECTION_PREFIXES: [&str; 7] = [
    "Price list",
    "All prices are",
    "PAINTING",
    "RUSTPROOFING",
    "ANTI-CHROME",
    "ADDITIONAL SERVICES",
    "ADDITIONAL WORK",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceCatalogEntry {
    pub service_name: String,
    pub tier: VehicleTier,
    pub price: u32,
}

/// Tiered price table loaded once from tabular input.
///
/// A row contributes an entry per tier whose price cell parses; malformed
/// cells, malformed rows and unreadable files all degrade silently, so
/// the worst possible catalog is an empty one.
#[derive(Clone, Debug, Default)]
pub struct PriceCatalog {
    entries: Vec<PriceCatalogEntry>,
}

impl PriceCatalog {
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut entries = Vec::new();
        for row in rows {
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            let first = row.first().map(String::as_str).unwrap_or_default();
            if SECTION_PREFIXES.iter().any(|prefix| first.starts_with(prefix)) {
                continue;
            }
            let is_service_row = !first.trim().is_empty()
                && row.get(1).is_some_and(|cell| !cell.trim().is_empty());
            if !is_service_row {
                continue;
            }

            let service_name = first.trim().to_string();
            for tier in VehicleTier::ALL {
                let Some(cell) = row.get(tier.rank() as usize) else {
                    continue;
                };
                if let Some(price) = parse_price_cell(cell) {
                    entries.push(PriceCatalogEntry {
                        service_name: service_name.clone(),
                        tier,
                        price,
                    });
                }
            }
        }
        Self { entries }
    }

    /// Reads a headerless CSV price sheet. Any failure to open or decode
    /// the file yields an empty catalog rather than an error.
    pub fn load_from_path(path: &Path) -> Self {
        let mut reader = match csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
        {
            Ok(reader) => reader,
            Err(error) => {
                warn!(%error, path = %path.display(), "price list unreadable, catalog is empty");
                return Self::default();
            }
        };

        let mut rows = Vec::new();
        for record in reader.records() {
            match record {
                Ok(record) => rows.push(record.iter().map(str::to_string).collect()),
                Err(error) => warn!(%error, "skipping undecodable price list row"),
            }
        }

        let catalog = Self::from_rows(rows);
        info!(entries = catalog.len(), path = %path.display(), "price list loaded");
        catalog
    }

    /// Looks a service up within one tier: an exact pass over the whole
    /// tier first, then a fuzzy pass, each returning the first entry in
    /// load order.
    pub fn find_price(&self, service_name: &str, tier: VehicleTier) -> Option<&PriceCatalogEntry> {
        let exact = self
            .tier_entries(tier)
            .find(|entry| names_match_exactly(&entry.service_name, service_name));
        exact.or_else(|| {
            self.tier_entries(tier)
                .find(|entry| names_match_fuzzily(&entry.service_name, service_name))
        })
    }

    /// All entries, across tiers, whose name contains the keyword.
    pub fn search(&self, keyword: &str) -> Vec<&PriceCatalogEntry> {
        let keyword = keyword.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.service_name.to_lowercase().contains(&keyword))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn tier_len(&self, tier: VehicleTier) -> usize {
        self.tier_entries(tier).count()
    }

    fn tier_entries(&self, tier: VehicleTier) -> impl Iterator<Item = &PriceCatalogEntry> {
        self.entries.iter().filter(move |entry| entry.tier == tier)
    }
}

/// Parses one price cell: an optional leading "from" qualifier is
/// dropped, then every non-digit character; whatever digits remain are
/// the price. Cells with no digits are skipped.
fn parse_price_cell(cell: &str) -> Option<u32> {
    let trimmed = cell.trim();
    let without_prefix = match trimmed.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("from") => trimmed[4..].trim_start(),
        _ => trimmed,
    };
    let digits: String = without_prefix.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

fn names_match_exactly(catalog_name: &str, search_name: &str) -> bool {
    catalog_name.trim().to_lowercase() == search_name.trim().to_lowercase()
}

/// Symmetric word containment: every word of the search term must be a
/// substring of some catalog-name word, or contain one.
fn names_match_fuzzily(catalog_name: &str, search_name: &str) -> bool {
    let catalog_words: Vec<String> =
        catalog_name.to_lowercase().split_whitespace().map(str::to_string).collect();
    search_name.to_lowercase().split_whitespace().all(|search_word| {
        catalog_words
            .iter()
            .any(|catalog_word| catalog_word.contains(search_word) || search_word.contains(catalog_word.as_str()))
    })
}
