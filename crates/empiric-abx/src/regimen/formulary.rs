//! Empiric Formulary
//!
//! Every agent the selector can place, with its allergy class, standard
//! schedule and renal adjustment. Agents whose duration depends on the
//! risk tier appear once per duration.

use crate::policy::RenalThresholds;
use crate::recommendation::AntibioticEntry;
use crate::renal::RenalTier;

/// Dose and interval pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DoseSchedule {
    pub dose: &'static str,
    pub frequency: &'static str,
}

/// Schedule change applied once renal impairment reaches `applies_from`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenalAdjustment {
    pub applies_from: RenalTier,
    pub schedule: DoseSchedule,
    /// Custom note; `None` writes "Adjusted for GFR <N" from the policy
    pub note: Option<&'static str>,
}

/// A drug the selector may place in a therapeutic role
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrugCandidate {
    pub name: &'static str,
    /// Class queried against the allergy list
    pub allergy_class: &'static str,
    pub route: &'static str,
    pub standard: DoseSchedule,
    pub duration: &'static str,
    pub renal: Option<RenalAdjustment>,
    /// Warning raised whenever this agent is placed
    pub warning: Option<&'static str>,
    /// Rationale line added whenever this agent is placed
    pub rationale: Option<&'static str>,
}

impl DrugCandidate {
    /// Build the regimen entry for a patient in `renal_tier`
    pub fn prescribe(&self, renal_tier: RenalTier, thresholds: &RenalThresholds) -> AntibioticEntry {
        let adjustment = self
            .renal
            .filter(|adjustment| renal_tier >= adjustment.applies_from);

        let (schedule, renal_note) = match adjustment {
            Some(adjustment) => {
                let note = match adjustment.note {
                    Some(text) => text.to_string(),
                    None => match adjustment.applies_from.upper_gfr_bound(thresholds) {
                        Some(bound) => format!("Adjusted for GFR <{}", bound),
                        None => "Adjusted for renal function".to_string(),
                    },
                };
                (adjustment.schedule, Some(note))
            }
            None => (self.standard, None),
        };

        AntibioticEntry {
            name: self.name.to_string(),
            dose: schedule.dose.to_string(),
            frequency: schedule.frequency.to_string(),
            route: self.route.to_string(),
            duration: self.duration.to_string(),
            renal_adjustment: renal_note,
            hepatic_adjustment: None,
        }
    }
}

// ============================================================================
// Beta-lactams
// ============================================================================

pub const CEFTRIAXONE: DrugCandidate = DrugCandidate {
    name: "Ceftriaxone",
    allergy_class: "cephalosporin",
    route: "IV",
    standard: DoseSchedule { dose: "2g", frequency: "q24h" },
    duration: "5-7 days",
    renal: None,
    warning: None,
    rationale: None,
};

pub const PIPERACILLIN_TAZOBACTAM: DrugCandidate = DrugCandidate {
    name: "Piperacillin-Tazobactam",
    allergy_class: "penicillin",
    route: "IV",
    standard: DoseSchedule { dose: "4.5g", frequency: "q6h" },
    duration: "7 days",
    renal: Some(RenalAdjustment {
        applies_from: RenalTier::Severe,
        schedule: DoseSchedule { dose: "2.25g", frequency: "q8h" },
        note: None,
    }),
    warning: None,
    rationale: None,
};

const MEROPENEM_RENAL: RenalAdjustment = RenalAdjustment {
    applies_from: RenalTier::Severe,
    schedule: DoseSchedule { dose: "500mg", frequency: "q8h" },
    note: None,
};

/// Carbapenem fallback at moderate risk
pub const MEROPENEM: DrugCandidate = DrugCandidate {
    name: "Meropenem",
    allergy_class: "carbapenem",
    route: "IV",
    standard: DoseSchedule { dose: "1g", frequency: "q8h" },
    duration: "7 days",
    renal: Some(MEROPENEM_RENAL),
    warning: None,
    rationale: None,
};

/// Carbapenem fallback at high risk
pub const MEROPENEM_EXTENDED: DrugCandidate = DrugCandidate {
    duration: "7-10 days",
    ..MEROPENEM
};

pub const CEFEPIME: DrugCandidate = DrugCandidate {
    name: "Cefepime",
    allergy_class: "cephalosporin",
    route: "IV",
    standard: DoseSchedule { dose: "2g", frequency: "q8h" },
    duration: "7-10 days",
    renal: Some(RenalAdjustment {
        applies_from: RenalTier::Severe,
        schedule: DoseSchedule { dose: "1g", frequency: "q8h" },
        note: None,
    }),
    warning: None,
    rationale: None,
};

// ============================================================================
// Atypical coverage
// ============================================================================

pub const AZITHROMYCIN: DrugCandidate = DrugCandidate {
    name: "Azithromycin",
    allergy_class: "macrolide",
    route: "IV",
    standard: DoseSchedule { dose: "500mg", frequency: "q24h" },
    duration: "5 days",
    renal: None,
    warning: None,
    rationale: None,
};

/// Respiratory fluoroquinolone, CAP course
pub const LEVOFLOXACIN: DrugCandidate = DrugCandidate {
    name: "Levofloxacin",
    allergy_class: "fluoroquinolone",
    route: "IV",
    standard: DoseSchedule { dose: "750mg", frequency: "q24h" },
    duration: "5 days",
    renal: Some(RenalAdjustment {
        applies_from: RenalTier::Moderate,
        schedule: DoseSchedule { dose: "500mg", frequency: "q24h" },
        note: None,
    }),
    warning: None,
    rationale: None,
};

/// Respiratory fluoroquinolone, high-risk course
pub const LEVOFLOXACIN_EXTENDED: DrugCandidate = DrugCandidate {
    duration: "7 days",
    ..LEVOFLOXACIN
};

// ============================================================================
// MRSA coverage
// ============================================================================

pub const VANCOMYCIN: DrugCandidate = DrugCandidate {
    name: "Vancomycin",
    allergy_class: "vancomycin",
    route: "IV",
    standard: DoseSchedule { dose: "15-20 mg/kg", frequency: "q8-12h" },
    duration: "7-10 days (based on cultures)",
    renal: Some(RenalAdjustment {
        applies_from: RenalTier::Moderate,
        schedule: DoseSchedule { dose: "15-20 mg/kg", frequency: "q8-12h" },
        note: Some("Monitor levels closely, adjust per pharmacy"),
    }),
    warning: None,
    rationale: Some("Vancomycin added for MRSA coverage given high-risk features"),
};

/// Not in the class table; the allergy check matches the name itself
pub const LINEZOLID: DrugCandidate = DrugCandidate {
    name: "Linezolid",
    allergy_class: "linezolid",
    route: "IV",
    standard: DoseSchedule { dose: "600mg", frequency: "q12h" },
    duration: "7-10 days",
    renal: None,
    warning: Some("⚠️ Linezolid: Monitor for thrombocytopenia and serotonin syndrome"),
    rationale: None,
};
