//! Engine Policy
//!
//! Named policy constants for every threshold and weight the engine uses:
//! - MDRO risk-factor weights
//! - Risk tier thresholds
//! - Renal impairment thresholds (GFR)
//! - Severity warning thresholds (SOFA, lactate, liver enzymes)
//!
//! The policy is a plain value. `EnginePolicy::STANDARD` holds the
//! guideline defaults; alternate policies can be loaded from JSON, where
//! any omitted key keeps its standard value.
//!
//! # Example
//!
//! ```rust
//! use empiric_abx::EnginePolicy;
//!
//! let policy = EnginePolicy::from_json_str(r#"{"renal": {"severeBelow": 25.0}}"#).unwrap();
//! assert_eq!(policy.renal.severe_below, 25.0);
//! assert_eq!(policy.renal.moderate_below, 60.0);
//! ```

use crate::error::PolicyError;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Risk Scoring
// ============================================================================

/// Points contributed by each MDRO risk factor
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskWeights {
    pub hospitalization: u32,
    pub iv_antibiotics: u32,
    pub long_term_care: u32,
    pub mechanical_ventilation: u32,
    #[serde(rename = "priorMRSA")]
    pub prior_mrsa: u32,
    pub prior_pseudomonas: u32,
    pub immunosuppression: u32,
}

impl RiskWeights {
    pub const STANDARD: Self = Self {
        hospitalization: 2,
        iv_antibiotics: 2,
        long_term_care: 2,
        mechanical_ventilation: 2,
        prior_mrsa: 3,
        prior_pseudomonas: 3,
        immunosuppression: 1,
    };

    /// Highest score any patient can reach under these weights
    pub fn max_score(&self) -> u32 {
        self.hospitalization
            + self.iv_antibiotics
            + self.long_term_care
            + self.mechanical_ventilation
            + self.prior_mrsa
            + self.prior_pseudomonas
            + self.immunosuppression
    }
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Inclusive lower bounds of the moderate and high tiers
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskThresholds {
    pub moderate_at: u32,
    pub high_at: u32,
}

impl RiskThresholds {
    pub const STANDARD: Self = Self {
        moderate_at: 3,
        high_at: 6,
    };
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self::STANDARD
    }
}

// ============================================================================
// Renal and Severity Thresholds
// ============================================================================

/// Exclusive GFR upper bounds (mL/min) of the renal impairment tiers
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RenalThresholds {
    /// GFR below this is severe impairment
    pub severe_below: f64,
    /// GFR below this (and not severe) is moderate impairment
    pub moderate_below: f64,
}

impl RenalThresholds {
    pub const STANDARD: Self = Self {
        severe_below: 30.0,
        moderate_below: 60.0,
    };
}

impl Default for RenalThresholds {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Triggers for the global severity warnings
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SeverityThresholds {
    /// SOFA at or above this warns of high mortality
    pub sofa_high_mortality: u8,
    /// Lactate (mmol/L) at or above this warns of septic shock
    pub lactate_shock: f64,
    /// ALT or AST (U/L) strictly above this warns of hepatotoxicity
    pub hepatic_enzyme_limit: f64,
}

impl SeverityThresholds {
    pub const STANDARD: Self = Self {
        sofa_high_mortality: 6,
        lactate_shock: 4.0,
        hepatic_enzyme_limit: 120.0,
    };
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self::STANDARD
    }
}

// ============================================================================
// Engine Policy
// ============================================================================

/// Complete set of tunable policy values
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EnginePolicy {
    pub risk_weights: RiskWeights,
    pub risk_thresholds: RiskThresholds,
    pub renal: RenalThresholds,
    pub severity: SeverityThresholds,
}

impl EnginePolicy {
    /// IDSA/ATS CAP and Surviving Sepsis aligned defaults
    pub const STANDARD: Self = Self {
        risk_weights: RiskWeights::STANDARD,
        risk_thresholds: RiskThresholds::STANDARD,
        renal: RenalThresholds::STANDARD,
        severity: SeverityThresholds::STANDARD,
    };

    /// Parse a (possibly partial) JSON policy document and validate it
    pub fn from_json_str(json: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Read and parse a JSON policy file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check the policy is internally consistent
    ///
    /// # Constraints
    /// - `moderate_at` must be positive and not above `high_at`
    /// - `high_at` must be reachable under the configured weights
    /// - Renal and severity thresholds must be finite and positive
    /// - `severe_below` must not exceed `moderate_below`
    pub fn validate(&self) -> Result<(), PolicyError> {
        let thresholds = &self.risk_thresholds;
        if thresholds.moderate_at == 0 {
            return Err(PolicyError::InvalidThreshold {
                name: "riskThresholds.moderateAt",
                reason: "must be positive, otherwise no patient is low risk".to_string(),
            });
        }
        if thresholds.moderate_at > thresholds.high_at {
            return Err(PolicyError::InvalidThreshold {
                name: "riskThresholds.moderateAt",
                reason: format!(
                    "{} exceeds highAt {}",
                    thresholds.moderate_at, thresholds.high_at
                ),
            });
        }

        let max_score = self.risk_weights.max_score();
        if thresholds.high_at > max_score {
            return Err(PolicyError::InvalidWeight {
                name: "riskWeights",
                reason: format!(
                    "maximum attainable score {} never reaches highAt {}",
                    max_score, thresholds.high_at
                ),
            });
        }

        validate_positive("renal.severeBelow", self.renal.severe_below)?;
        validate_positive("renal.moderateBelow", self.renal.moderate_below)?;
        if self.renal.severe_below > self.renal.moderate_below {
            return Err(PolicyError::InvalidThreshold {
                name: "renal.severeBelow",
                reason: format!(
                    "{} exceeds moderateBelow {}",
                    self.renal.severe_below, self.renal.moderate_below
                ),
            });
        }

        validate_positive("severity.lactateShock", self.severity.lactate_shock)?;
        validate_positive(
            "severity.hepaticEnzymeLimit",
            self.severity.hepatic_enzyme_limit,
        )?;

        Ok(())
    }
}

impl Default for EnginePolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

fn validate_positive(name: &'static str, value: f64) -> Result<(), PolicyError> {
    if !value.is_finite() {
        return Err(PolicyError::InvalidThreshold {
            name,
            reason: "must be a finite number".to_string(),
        });
    }
    if value <= 0.0 {
        return Err(PolicyError::InvalidThreshold {
            name,
            reason: format!("{} must be positive", value),
        });
    }
    Ok(())
}
