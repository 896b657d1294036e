//! Recommendation Engine
//!
//! Wires the components together for one patient:
//!
//! ```text
//! PatientRecord -> MDRO risk tier -> regimen selection -> severity warnings -> assembly
//! ```
//!
//! The engine holds only its policy. Each call reads the record once and
//! returns a fresh recommendation, so one engine can serve concurrent
//! callers without synchronisation.

use crate::alerts::{severity_warnings, ClinicalNotes, NO_SAFE_REGIMEN_WARNING};
use crate::error::IntakeError;
use crate::intake::validate_record;
use crate::patient::PatientRecord;
use crate::policy::EnginePolicy;
use crate::recommendation::{assemble, TherapyRecommendation};
use crate::regimen::select_regimen_with;
use crate::risk::score_mdro_risk_with;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RecommendationEngine {
    policy: EnginePolicy,
}

impl RecommendationEngine {
    pub fn new(policy: EnginePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &EnginePolicy {
        &self.policy
    }

    /// Produce a recommendation. Assumes the caller has already confirmed
    /// the record's allergies are verified.
    pub fn recommend(&self, record: &PatientRecord) -> TherapyRecommendation {
        let tier = score_mdro_risk_with(record, &self.policy);
        let selection = select_regimen_with(record, tier, &self.policy);

        let mut notes = ClinicalNotes::new();
        for warning in selection.warnings {
            notes.warn(warning);
        }
        for line in selection.rationale {
            notes.explain(line);
        }
        if selection.primary.is_empty() {
            log::warn!("no allergy-safe primary regimen for {} risk patient", tier);
            notes.warn(NO_SAFE_REGIMEN_WARNING);
        }
        notes.extend(severity_warnings(record, &self.policy));

        let (warnings, rationale) = notes.into_parts();
        assemble(
            tier,
            selection.predicted_pathogens,
            selection.primary,
            selection.alternative,
            rationale,
            warnings,
        )
    }

    /// Check the intake preconditions first, then recommend
    pub fn recommend_verified(
        &self,
        record: &PatientRecord,
    ) -> Result<TherapyRecommendation, IntakeError> {
        validate_record(record)?;
        Ok(self.recommend(record))
    }
}

/// Recommend under the standard policy
pub fn generate_recommendation(record: &PatientRecord) -> TherapyRecommendation {
    RecommendationEngine::default().recommend(record)
}
