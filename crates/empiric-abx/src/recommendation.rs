//! Therapy Recommendation
//!
//! Output types handed to the display layer and the assembler that builds
//! them. Regimen order is clinical priority; warnings and rationale keep the
//! order in which they were raised.

use crate::risk::MdroRiskTier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attached verbatim to every recommendation
pub const DEESCALATION_NOTES: &str = "Review culture and sensitivity data at 48-72 hours. \
De-escalate to narrowest effective spectrum based on identified pathogen(s). \
If cultures negative and clinical improvement, consider shortening duration.";

/// Attached verbatim to every recommendation
pub const GUIDELINE_COMPLIANCE: &str = "Recommendation aligns with IDSA/ATS 2019 CAP Guidelines \
and Surviving Sepsis Campaign 2021 recommendations.";

// ============================================================================
// Antibiotic Entry
// ============================================================================

/// One drug in a regimen
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AntibioticEntry {
    pub name: String,
    /// Dose with unit, possibly a range ("15-20 mg/kg")
    pub dose: String,
    pub frequency: String,
    pub route: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renal_adjustment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hepatic_adjustment: Option<String>,
}

impl fmt::Display for AntibioticEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} × {}",
            self.name, self.dose, self.route, self.frequency, self.duration
        )
    }
}

// ============================================================================
// Therapy Recommendation
// ============================================================================

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TherapyRecommendation {
    pub primary_regimen: Vec<AntibioticEntry>,
    /// Absent rather than empty when no alternative applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_regimen: Option<Vec<AntibioticEntry>>,
    pub rationale: Vec<String>,
    pub warnings: Vec<String>,
    pub mdro_risk_score: MdroRiskTier,
    pub predicted_pathogens: Vec<String>,
    pub deescalation_notes: String,
    pub guideline_compliance: String,
}

impl TherapyRecommendation {
    /// Whether any primary-regimen drug has the given name
    pub fn primary_contains(&self, name: &str) -> bool {
        self.primary_regimen.iter().any(|entry| entry.name == name)
    }
}

/// Package the pieces of a recommendation. An empty alternative regimen is
/// reported as absent.
pub fn assemble(
    risk_tier: MdroRiskTier,
    predicted_pathogens: Vec<String>,
    primary: Vec<AntibioticEntry>,
    alternative: Vec<AntibioticEntry>,
    rationale: Vec<String>,
    warnings: Vec<String>,
) -> TherapyRecommendation {
    TherapyRecommendation {
        primary_regimen: primary,
        alternative_regimen: if alternative.is_empty() {
            None
        } else {
            Some(alternative)
        },
        rationale,
        warnings,
        mdro_risk_score: risk_tier,
        predicted_pathogens,
        deescalation_notes: DEESCALATION_NOTES.to_string(),
        guideline_compliance: GUIDELINE_COMPLIANCE.to_string(),
    }
}
