//! Agent layer - lead qualification on top of the deterministic core
//!
//! The upstream LLM decides *that* a message is a service request; this
//! crate turns that decision into a structured lead:
//! - **Detection seam** (`detector`) - `LeadSignal` input, precomputed
//!   `LeadEnrichment`, and the precedence merge into a `LeadRecord`
//! - **Pipeline** (`pipeline`) - admission control plus analyzer and
//!   calculator wired over accumulated conversation turns
//!
//! # Precedence
//!
//! Enrichment is computed ahead of the triggering event and always wins
//! field-by-field over inline fallback parameters; fallbacks only fill
//! fields the enrichment omitted. Confidence is fixed at 1.0 because the
//! request/not-a-request judgement was already made upstream.

pub mod detector;
pub mod pipeline;

pub use detector::{DetectError, DetectorConfig, LeadEnrichment, LeadSignal, RequestDetector};
pub use pipeline::EnrichmentPipeline;
