//! Clinical Warnings and Rationale
//!
//! Append-only accumulation of the free-text alerts and rationale raised
//! while a recommendation is built, plus the global checks that apply
//! regardless of which regimen branch ran:
//! - QTc prolongation and severe renal impairment (raised before selection)
//! - SOFA, lactate and liver enzyme severity (raised after selection)

use crate::patient::PatientRecord;
use crate::policy::{EnginePolicy, RenalThresholds};
use crate::renal::RenalTier;

pub const QTC_AVOIDANCE_WARNING: &str =
    "⚠️ QTc prolongation detected. Avoiding fluoroquinolones and macrolides.";

pub const NO_SAFE_REGIMEN_WARNING: &str = "⚠️ No allergy-safe empiric regimen identified for this risk profile. \
Consult infectious diseases or pharmacy before initiating therapy.";

// ============================================================================
// Notes Accumulator
// ============================================================================

/// Ordered warnings and rationale for one recommendation run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClinicalNotes {
    warnings: Vec<String>,
    rationale: Vec<String>,
}

impl ClinicalNotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn explain(&mut self, message: impl Into<String>) {
        self.rationale.push(message.into());
    }

    /// Append another set of notes after this one, preserving both orders
    pub fn extend(&mut self, other: ClinicalNotes) {
        self.warnings.extend(other.warnings);
        self.rationale.extend(other.rationale);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn rationale(&self) -> &[String] {
        &self.rationale
    }

    /// Split into `(warnings, rationale)`
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.warnings, self.rationale)
    }
}

// ============================================================================
// Global Checks
// ============================================================================

/// Warning for severe renal impairment, quoting the configured threshold
pub fn severe_renal_warning(thresholds: &RenalThresholds) -> String {
    format!(
        "⚠️ Severe renal impairment (GFR <{}). Dose adjustments applied.",
        thresholds.severe_below
    )
}

/// Warnings that shape drug selection: QTc first, then severe renal impairment
pub fn selection_warnings(
    record: &PatientRecord,
    renal_tier: RenalTier,
    policy: &EnginePolicy,
) -> ClinicalNotes {
    let mut notes = ClinicalNotes::new();
    if record.qtc_prolonged {
        notes.warn(QTC_AVOIDANCE_WARNING);
    }
    if renal_tier == RenalTier::Severe {
        notes.warn(severe_renal_warning(&policy.renal));
    }
    notes
}

/// Global severity indicators checked on every record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeverityCheck {
    HighMortality,
    SepticShock,
    Hepatotoxicity,
}

impl SeverityCheck {
    /// Evaluation order, which is also warning order
    pub const ALL: [SeverityCheck; 3] = [
        SeverityCheck::HighMortality,
        SeverityCheck::SepticShock,
        SeverityCheck::Hepatotoxicity,
    ];

    pub fn triggered(&self, record: &PatientRecord, policy: &EnginePolicy) -> bool {
        let limits = &policy.severity;
        match self {
            SeverityCheck::HighMortality => record.sofa >= limits.sofa_high_mortality,
            SeverityCheck::SepticShock => record.labs.lactate >= limits.lactate_shock,
            SeverityCheck::Hepatotoxicity => {
                record.labs.alt > limits.hepatic_enzyme_limit
                    || record.labs.ast > limits.hepatic_enzyme_limit
            }
        }
    }

    pub fn message(&self, policy: &EnginePolicy) -> String {
        let limits = &policy.severity;
        match self {
            SeverityCheck::HighMortality => format!(
                "🔴 SOFA ≥{}: High mortality risk. Consider ICU admission if not already.",
                limits.sofa_high_mortality
            ),
            SeverityCheck::SepticShock => format!(
                "🔴 Lactate ≥{} mmol/L: Septic shock likely. Ensure fluid resuscitation and vasopressors as needed.",
                limits.lactate_shock
            ),
            SeverityCheck::Hepatotoxicity => {
                "⚠️ Elevated liver enzymes detected. Monitor hepatotoxic medications.".to_string()
            }
        }
    }
}

/// Severity warnings raised by `record`, in `SeverityCheck::ALL` order
pub fn severity_warnings(record: &PatientRecord, policy: &EnginePolicy) -> ClinicalNotes {
    let mut notes = ClinicalNotes::new();
    for check in SeverityCheck::ALL {
        if check.triggered(record, policy) {
            log::debug!("severity check {:?} triggered", check);
            notes.warn(check.message(policy));
        }
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PatientRecord {
        PatientRecord::intake_defaults()
    }

    #[test]
    fn test_notes_keep_insertion_order() {
        let mut notes = ClinicalNotes::new();
        notes.warn("first");
        notes.warn("second");
        notes.explain("why");
        let mut later = ClinicalNotes::new();
        later.warn("third");
        notes.extend(later);
        let (warnings, rationale) = notes.into_parts();
        assert_eq!(warnings, vec!["first", "second", "third"]);
        assert_eq!(rationale, vec!["why"]);
    }

    #[test]
    fn test_selection_warnings_order() {
        let mut r = record();
        r.qtc_prolonged = true;
        let notes = selection_warnings(&r, RenalTier::Severe, &EnginePolicy::STANDARD);
        assert_eq!(notes.warnings().len(), 2);
        assert_eq!(notes.warnings()[0], QTC_AVOIDANCE_WARNING);
        assert_eq!(
            notes.warnings()[1],
            "⚠️ Severe renal impairment (GFR <30). Dose adjustments applied."
        );
    }

    #[test]
    fn test_moderate_renal_raises_nothing() {
        let notes = selection_warnings(&record(), RenalTier::Moderate, &EnginePolicy::STANDARD);
        assert!(notes.warnings().is_empty());
    }

    #[test]
    fn test_default_record_triggers_no_severity_warnings() {
        let notes = severity_warnings(&record(), &EnginePolicy::STANDARD);
        assert!(notes.warnings().is_empty());
    }

    #[test]
    fn test_sofa_boundary() {
        let mut r = record();
        r.sofa = 5;
        assert!(!SeverityCheck::HighMortality.triggered(&r, &EnginePolicy::STANDARD));
        r.sofa = 6;
        assert!(SeverityCheck::HighMortality.triggered(&r, &EnginePolicy::STANDARD));
    }

    #[test]
    fn test_lactate_boundary() {
        let mut r = record();
        r.labs.lactate = 3.99;
        assert!(!SeverityCheck::SepticShock.triggered(&r, &EnginePolicy::STANDARD));
        r.labs.lactate = 4.0;
        assert!(SeverityCheck::SepticShock.triggered(&r, &EnginePolicy::STANDARD));
    }

    #[test]
    fn test_hepatic_limit_is_strict() {
        let mut r = record();
        r.labs.alt = 120.0;
        r.labs.ast = 120.0;
        assert!(!SeverityCheck::Hepatotoxicity.triggered(&r, &EnginePolicy::STANDARD));
        r.labs.ast = 121.0;
        assert!(SeverityCheck::Hepatotoxicity.triggered(&r, &EnginePolicy::STANDARD));
    }

    #[test]
    fn test_severity_messages_in_order() {
        let mut r = record();
        r.sofa = 9;
        r.labs.lactate = 5.1;
        r.labs.alt = 300.0;
        let notes = severity_warnings(&r, &EnginePolicy::STANDARD);
        let warnings = notes.warnings();
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].starts_with("🔴 SOFA ≥6"));
        assert!(warnings[1].starts_with("🔴 Lactate ≥4 mmol/L"));
        assert!(warnings[2].contains("Elevated liver enzymes"));
    }
}
