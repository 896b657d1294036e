//! Empiric ABX - Antibiotic Decision Support for Sepsis with Pneumonia
//!
//! Deterministic recommendation engine mapping a structured intake record
//! to an empiric antibiotic plan:
//!
//! - MDRO risk tier from weighted risk factors
//! - Predicted pathogens
//! - Primary and alternative regimens with renal dose adjustment
//! - Allergy-aware agent selection with next-line fallbacks
//! - Clinical warnings (QTc, renal, SOFA, lactate, liver enzymes) and rationale
//!
//! The engine is a pure function of its input: no I/O, no clocks, no
//! shared state. Output is decision support, not a prescription.
//!
//! # Example
//!
//! ```rust
//! use empiric_abx::{generate_recommendation, MdroRiskTier, PatientRecord};
//!
//! let mut record = PatientRecord::intake_defaults().with_verified_allergies(vec![]);
//! record.labs.gfr = 90.0;
//!
//! let recommendation = generate_recommendation(&record);
//! assert_eq!(recommendation.mdro_risk_score, MdroRiskTier::Low);
//! assert_eq!(recommendation.primary_regimen[0].name, "Ceftriaxone");
//! ```

pub mod alerts;
pub mod allergy;
pub mod engine;
pub mod error;
pub mod intake;
pub mod patient;
pub mod policy;
pub mod recommendation;
pub mod regimen;
pub mod renal;
pub mod report;
pub mod risk;

// Re-export commonly used items
pub use allergy::{is_allergic_to_class, AllergyProfile, DRUG_CLASS_TABLE};
pub use engine::{generate_recommendation, RecommendationEngine};
pub use error::{IntakeError, PolicyError};
pub use intake::{validate_record, AllergyGate};
pub use patient::{
    AllergyRecord, AllergySeverity, Comorbidities, Labs, PatientRecord, ReactionType,
    RiskFactors, Vitals,
};
pub use policy::{EnginePolicy, RenalThresholds, RiskThresholds, RiskWeights, SeverityThresholds};
pub use recommendation::{assemble, AntibioticEntry, TherapyRecommendation};
pub use regimen::{select_regimen, select_regimen_with, RegimenSelection};
pub use renal::RenalTier;
pub use report::render_text;
pub use risk::{mdro_risk_points, score_mdro_risk, score_mdro_risk_with, tier_for_score, MdroRiskTier};
