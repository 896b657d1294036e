//! Intake Preconditions
//!
//! The engine assumes a structurally sound, allergy-verified record. This
//! module gives intake workflows the tools to guarantee that:
//! - `AllergyGate` collects the allergy list and marks it verified
//! - `validate_record` checks every precondition before a recommendation

use crate::error::IntakeError;
use crate::patient::{AllergyRecord, AllergySeverity, PatientRecord, ReactionType};

/// Highest possible SOFA score
pub const MAX_SOFA: u8 = 24;

/// Highest possible qSOFA score
pub const MAX_QSOFA: u8 = 3;

// ============================================================================
// Allergy Gate
// ============================================================================

/// Allergy list under construction. Verification consumes the gate, so a
/// list cannot be edited after it has been confirmed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AllergyGate {
    allergies: Vec<AllergyRecord>,
}

impl AllergyGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an allergy. The drug name is trimmed and must not be empty.
    pub fn add(
        &mut self,
        drug: &str,
        reaction_type: ReactionType,
        severity: AllergySeverity,
    ) -> Result<(), IntakeError> {
        let drug = drug.trim();
        if drug.is_empty() {
            return Err(IntakeError::EmptyAllergyName);
        }
        self.allergies
            .push(AllergyRecord::new(drug, reaction_type, severity));
        Ok(())
    }

    /// Remove and return the allergy at `index`
    pub fn remove(&mut self, index: usize) -> Result<AllergyRecord, IntakeError> {
        if index >= self.allergies.len() {
            return Err(IntakeError::AllergyIndexOutOfRange {
                index,
                len: self.allergies.len(),
            });
        }
        Ok(self.allergies.remove(index))
    }

    pub fn allergies(&self) -> &[AllergyRecord] {
        &self.allergies
    }

    /// Confirm the list (possibly empty: "no known drug allergies")
    pub fn verify(self) -> Vec<AllergyRecord> {
        self.allergies
    }
}

// ============================================================================
// Record Validation
// ============================================================================

fn require_finite(field: &'static str, value: f64) -> Result<(), IntakeError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(IntakeError::NonFiniteField { field })
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), IntakeError> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(IntakeError::OutOfRange {
            field,
            value,
            reason: "must be greater than zero",
        });
    }
    Ok(())
}

/// Check the engine's preconditions, returning the first violation
///
/// # Constraints
/// - `allergies_verified` must be true
/// - Age and weight must be positive
/// - Every vital, lab and present optional measurement must be finite
/// - SOFA in 0-24, qSOFA in 0-3
pub fn validate_record(record: &PatientRecord) -> Result<(), IntakeError> {
    if !record.allergies_verified {
        return Err(IntakeError::AllergiesNotVerified);
    }

    require_positive("age", record.age)?;
    require_positive("weight", record.weight)?;

    let vitals = &record.vitals;
    for (field, value) in [
        ("vitals.heartRate", vitals.heart_rate),
        ("vitals.systolicBP", vitals.systolic_bp),
        ("vitals.diastolicBP", vitals.diastolic_bp),
        ("vitals.respiratoryRate", vitals.respiratory_rate),
        ("vitals.oxygenSaturation", vitals.oxygen_saturation),
        ("vitals.temperature", vitals.temperature),
    ] {
        require_finite(field, value)?;
    }

    let labs = &record.labs;
    for (field, value) in [
        ("labs.lactate", labs.lactate),
        ("labs.wbc", labs.wbc),
        ("labs.creatinine", labs.creatinine),
        ("labs.gfr", labs.gfr),
        ("labs.alt", labs.alt),
        ("labs.ast", labs.ast),
        ("labs.procalcitonin", labs.procalcitonin),
        ("labs.crp", labs.crp),
    ] {
        require_finite(field, value)?;
    }

    for (field, value) in [
        ("labs.ph", labs.ph),
        ("labs.pco2", labs.pco2),
        ("labs.po2", labs.po2),
        ("qtcValue", record.qtc_value),
    ] {
        if let Some(value) = value {
            require_finite(field, value)?;
        }
    }

    if record.sofa > MAX_SOFA {
        return Err(IntakeError::OutOfRange {
            field: "sofa",
            value: f64::from(record.sofa),
            reason: "SOFA ranges from 0 to 24",
        });
    }
    if record.qsofa > MAX_QSOFA {
        return Err(IntakeError::OutOfRange {
            field: "qsofa",
            value: f64::from(record.qsofa),
            reason: "qSOFA ranges from 0 to 3",
        });
    }

    Ok(())
}
