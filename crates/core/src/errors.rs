use thiserror::Error;

/// Violations of the collaborator contract. Everything else in this crate
/// degrades to a sentinel instead of failing; a role value outside the
/// agreed set means the conversation source itself is broken.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown chat role `{0}` (expected user|assistant)")]
    UnknownRole(String),
}
