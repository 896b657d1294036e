//! Patient Intake Record
//!
//! Structured input consumed by the recommendation engine:
//! - Demographics, vitals and laboratory values
//! - Severity scores (SOFA, qSOFA) and QTc status
//! - Drug allergies as entered at the allergy gate
//! - Comorbidities and MDRO risk factors
//!
//! Field names serialize in camelCase so records produced by the intake
//! workflow deserialize without a mapping layer.

use serde::{Deserialize, Serialize};

// ============================================================================
// Vitals and Labs
// ============================================================================

/// Bedside vital signs. No range is enforced here; see `intake::validate_record`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    /// Beats per minute
    pub heart_rate: f64,
    /// mmHg
    #[serde(rename = "systolicBP")]
    pub systolic_bp: f64,
    /// mmHg
    #[serde(rename = "diastolicBP")]
    pub diastolic_bp: f64,
    /// Breaths per minute
    pub respiratory_rate: f64,
    /// SpO2, percent
    pub oxygen_saturation: f64,
    /// Degrees Celsius
    pub temperature: f64,
}

/// Laboratory panel
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Labs {
    /// mmol/L
    pub lactate: f64,
    pub wbc: f64,
    /// mg/dL
    pub creatinine: f64,
    /// Glomerular filtration rate, mL/min
    pub gfr: f64,
    /// U/L
    pub alt: f64,
    /// U/L
    pub ast: f64,
    /// ng/mL
    pub procalcitonin: f64,
    /// mg/L
    pub crp: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ph: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pco2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub po2: Option<f64>,
}

// ============================================================================
// Allergies
// ============================================================================

/// A single user-entered drug allergy. Duplicates are allowed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllergyRecord {
    /// Free-text drug name as entered (brand, generic or class)
    pub drug: String,
    pub reaction_type: ReactionType,
    pub severity: AllergySeverity,
}

impl AllergyRecord {
    pub fn new(drug: impl Into<String>, reaction_type: ReactionType, severity: AllergySeverity) -> Self {
        Self {
            drug: drug.into(),
            reaction_type,
            severity,
        }
    }
}

/// Reported reaction to the drug
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReactionType {
    Anaphylaxis,
    Rash,
    GiUpset,
    Other,
    Unknown,
}

/// Reported severity of the reaction
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AllergySeverity {
    Mild,
    Moderate,
    Severe,
}

// ============================================================================
// Comorbidities and Risk Factors
// ============================================================================

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comorbidities {
    pub copd: bool,
    pub diabetes: bool,
    pub immunosuppression: bool,
    pub heart_failure: bool,
    pub ckd: bool,
    pub esrd: bool,
    #[serde(rename = "priorMRSA")]
    pub prior_mrsa: bool,
    pub prior_pseudomonas: bool,
}

/// Healthcare exposures within the last 90 days that raise MDRO risk
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactors {
    pub hospitalization_last_90_days: bool,
    pub iv_antibiotics_last_90_days: bool,
    pub long_term_care_facility: bool,
    pub mechanical_ventilation: bool,
}

// ============================================================================
// Patient Record
// ============================================================================

/// Complete intake snapshot for one assessment.
///
/// The engine treats the record as immutable and reads it exactly once.
/// Callers are responsible for `allergies_verified` being true before
/// asking for a recommendation (see `RecommendationEngine::recommend_verified`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    /// Years
    pub age: f64,
    /// Kilograms
    pub weight: f64,
    pub vitals: Vitals,
    pub labs: Labs,
    /// Sequential Organ Failure Assessment, 0-24
    pub sofa: u8,
    /// Quick SOFA, 0-3
    pub qsofa: u8,
    pub qtc_prolonged: bool,
    /// Measured QTc in milliseconds, informational
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qtc_value: Option<f64>,
    #[serde(default)]
    pub allergies: Vec<AllergyRecord>,
    #[serde(default)]
    pub allergies_verified: bool,
    pub comorbidities: Comorbidities,
    pub risk_factors: RiskFactors,
    /// Free-text imaging summary, not used by any rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imaging_findings: Option<String>,
}

impl PatientRecord {
    /// Starting values of the intake form: a 68-year-old with diabetes,
    /// moderate renal impairment and no MDRO exposures.
    pub fn intake_defaults() -> Self {
        Self {
            age: 68.0,
            weight: 75.0,
            vitals: Vitals {
                heart_rate: 95.0,
                systolic_bp: 90.0,
                diastolic_bp: 60.0,
                respiratory_rate: 22.0,
                oxygen_saturation: 92.0,
                temperature: 38.9,
            },
            labs: Labs {
                lactate: 2.5,
                wbc: 15.2,
                creatinine: 1.4,
                gfr: 55.0,
                alt: 45.0,
                ast: 52.0,
                procalcitonin: 2.8,
                crp: 180.0,
                ph: None,
                pco2: None,
                po2: None,
            },
            sofa: 4,
            qsofa: 2,
            qtc_prolonged: false,
            qtc_value: Some(440.0),
            allergies: Vec::new(),
            allergies_verified: false,
            comorbidities: Comorbidities {
                diabetes: true,
                ..Comorbidities::default()
            },
            risk_factors: RiskFactors::default(),
            imaging_findings: None,
        }
    }

    /// Attach the allergy list confirmed at the allergy gate and mark it verified
    pub fn with_verified_allergies(mut self, allergies: Vec<AllergyRecord>) -> Self {
        self.allergies = allergies;
        self.allergies_verified = true;
        self
    }
}
