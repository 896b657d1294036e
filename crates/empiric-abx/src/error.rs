//! Error types for the fallible edges of the crate.
//!
//! Producing a recommendation never fails. Errors only arise when loading
//! a policy document or when checking an intake record against the
//! engine's preconditions.

use thiserror::Error;

/// Invalid or unreadable engine policy
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("invalid threshold {name}: {reason}")]
    InvalidThreshold { name: &'static str, reason: String },

    #[error("invalid risk weight {name}: {reason}")]
    InvalidWeight { name: &'static str, reason: String },

    #[error("failed to parse policy document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read policy file: {0}")]
    Io(#[from] std::io::Error),
}

/// Intake record that does not satisfy the engine's preconditions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntakeError {
    #[error("allergy status must be verified before generating a recommendation")]
    AllergiesNotVerified,

    #[error("{field} must be a finite number")]
    NonFiniteField { field: &'static str },

    #[error("{field} = {value} is out of range: {reason}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("allergy drug name cannot be empty")]
    EmptyAllergyName,

    #[error("no allergy at index {index} (list has {len} entries)")]
    AllergyIndexOutOfRange { index: usize, len: usize },
}
