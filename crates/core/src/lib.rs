//! Wrenchbot Core - conversation intelligence for an auto-repair chat agent
//!
//! This crate holds the deterministic pipeline behind the bot:
//! - **Admission control** (`ratelimit`) - per-sender sliding-window throttling
//! - **Fact extraction** (`analysis`) - vehicle profile, requested work and
//!   dialog context recovered from conversation turns
//! - **Pricing** (`pricing`) - tiered price catalog with exact and fuzzy
//!   lookup, and estimate assembly with on-request degradation
//! - **Outbound safety** (`sanitize`) - repair and escaping for the
//!   transport's constrained Markdown dialect
//! - **Configuration** (`config`) - TOML file plus environment overrides
//!
//! # Design Principle
//!
//! The intelligence here is a deterministic, auditable rule engine.
//! Pattern tables are static data, every operation is total over its
//! input domain, and missing data degrades to explicit sentinels instead
//! of guesses. Detection of whether a message *is* a service request is
//! delegated to the upstream LLM; nothing in this crate re-scores it.

pub mod analysis;
pub mod config;
pub mod domain;
pub mod errors;
pub mod pricing;
pub mod ratelimit;
pub mod sanitize;

pub use analysis::DialogAnalyzer;
pub use config::{AppConfig, ConfigError, LoadOptions};
pub use domain::conversation::{ChatRole, ConversationTurn};
pub use domain::estimate::{CostEstimate, CostLineItem, PriceLabel};
pub use domain::lead::{LeadRecord, Requester};
pub use domain::service::{ServiceCategory, ServiceTagSet};
pub use domain::vehicle::{VehicleProfile, VehicleTier};
pub use errors::DomainError;
pub use pricing::{CostCalculator, PriceCatalog, PriceCatalogEntry};
pub use ratelimit::RateLimiter;
