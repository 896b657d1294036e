//! Regimen Rule Table
//!
//! The selection policy as data. Each risk tier has a `TierPlan` with its
//! rationale and an ordered list of `RoleRule`s. A rule fills one
//! therapeutic role with the first candidate the patient is not allergic
//! to; if every candidate is excluded the role is left empty.
//!
//! Predicted pathogens are a separate table of `PathogenRule`s evaluated in
//! order after the baseline organisms.

use super::formulary::*;
use crate::patient::PatientRecord;
use crate::risk::MdroRiskTier;
use serde::{Deserialize, Serialize};

// ============================================================================
// Regimen Rules
// ============================================================================

/// Slot a drug occupies within a regimen. At most one agent per role.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TherapeuticRole {
    BetaLactam,
    Atypical,
    MrsaCoverage,
}

impl TherapeuticRole {
    pub fn label(&self) -> &'static str {
        match self {
            TherapeuticRole::BetaLactam => "beta-lactam",
            TherapeuticRole::Atypical => "atypical coverage",
            TherapeuticRole::MrsaCoverage => "MRSA coverage",
        }
    }

    /// Raised when every candidate for this primary role is allergy-excluded
    pub fn gap_warning(&self) -> String {
        format!(
            "⚠️ No allergy-safe {} identified. Consult infectious diseases or pharmacy.",
            self.label()
        )
    }
}

/// Which regimen list a rule writes to
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RegimenSlot {
    Primary,
    Alternative,
}

/// One therapeutic role to fill
#[derive(Clone, Copy, Debug)]
pub struct RoleRule {
    pub role: TherapeuticRole,
    pub slot: RegimenSlot,
    /// Skipped when QTc is prolonged
    pub qtc_sensitive: bool,
    /// Only evaluated once this primary role has been filled
    pub requires_filled: Option<TherapeuticRole>,
    /// Tried in order; first allergy-safe candidate wins
    pub candidates: &'static [DrugCandidate],
}

/// Everything the selector does for one risk tier
#[derive(Clone, Copy, Debug)]
pub struct TierPlan {
    pub tier: MdroRiskTier,
    /// The whole plan is skipped when QTc is prolonged
    pub requires_normal_qtc: bool,
    pub rationale: &'static [&'static str],
    pub rules: &'static [RoleRule],
    /// Raised after all rules have run
    pub closing_warnings: &'static [&'static str],
}

pub const DEESCALATION_REVIEW_WARNING: &str =
    "⚠️ Broad-spectrum therapy initiated. Plan for de-escalation at 48-72h based on culture results.";

const LOW_RISK_PLAN: TierPlan = TierPlan {
    tier: MdroRiskTier::Low,
    requires_normal_qtc: true,
    rationale: &[
        "Low MDRO risk - standard CAP coverage recommended",
        "IDSA/ATS guideline-concordant therapy for non-severe CAP with sepsis",
    ],
    rules: &[
        RoleRule {
            role: TherapeuticRole::BetaLactam,
            slot: RegimenSlot::Primary,
            qtc_sensitive: false,
            requires_filled: None,
            candidates: &[CEFTRIAXONE],
        },
        RoleRule {
            role: TherapeuticRole::Atypical,
            slot: RegimenSlot::Primary,
            qtc_sensitive: true,
            requires_filled: Some(TherapeuticRole::BetaLactam),
            candidates: &[AZITHROMYCIN, LEVOFLOXACIN],
        },
        // Fluoroquinolone monotherapy for beta-lactam allergic patients
        RoleRule {
            role: TherapeuticRole::Atypical,
            slot: RegimenSlot::Alternative,
            qtc_sensitive: true,
            requires_filled: None,
            candidates: &[LEVOFLOXACIN],
        },
    ],
    closing_warnings: &[],
};

const MODERATE_RISK_PLAN: TierPlan = TierPlan {
    tier: MdroRiskTier::Moderate,
    requires_normal_qtc: false,
    rationale: &[
        "Moderate MDRO risk - broadened coverage recommended",
        "Consider dual therapy with anti-pseudomonal coverage",
    ],
    rules: &[
        RoleRule {
            role: TherapeuticRole::BetaLactam,
            slot: RegimenSlot::Primary,
            qtc_sensitive: false,
            requires_filled: None,
            candidates: &[PIPERACILLIN_TAZOBACTAM, MEROPENEM],
        },
        RoleRule {
            role: TherapeuticRole::Atypical,
            slot: RegimenSlot::Primary,
            qtc_sensitive: true,
            requires_filled: None,
            candidates: &[AZITHROMYCIN],
        },
    ],
    closing_warnings: &[],
};

const HIGH_RISK_PLAN: TierPlan = TierPlan {
    tier: MdroRiskTier::High,
    requires_normal_qtc: false,
    rationale: &[
        "High MDRO risk - empiric MRSA and Pseudomonas coverage recommended",
        "Recommend early ID consultation and de-escalation when cultures available",
    ],
    rules: &[
        RoleRule {
            role: TherapeuticRole::BetaLactam,
            slot: RegimenSlot::Primary,
            qtc_sensitive: false,
            requires_filled: None,
            candidates: &[CEFEPIME, MEROPENEM_EXTENDED],
        },
        RoleRule {
            role: TherapeuticRole::MrsaCoverage,
            slot: RegimenSlot::Primary,
            qtc_sensitive: false,
            requires_filled: None,
            candidates: &[VANCOMYCIN, LINEZOLID],
        },
        RoleRule {
            role: TherapeuticRole::Atypical,
            slot: RegimenSlot::Primary,
            qtc_sensitive: true,
            requires_filled: None,
            candidates: &[LEVOFLOXACIN_EXTENDED],
        },
    ],
    closing_warnings: &[DEESCALATION_REVIEW_WARNING],
};

/// One plan per tier, lowest risk first
pub const REGIMEN_PLANS: &[TierPlan] = &[LOW_RISK_PLAN, MODERATE_RISK_PLAN, HIGH_RISK_PLAN];

/// Plan for a tier. Every tier has exactly one plan.
pub fn plan_for(tier: MdroRiskTier) -> &'static TierPlan {
    match tier {
        MdroRiskTier::Low => &REGIMEN_PLANS[0],
        MdroRiskTier::Moderate => &REGIMEN_PLANS[1],
        MdroRiskTier::High => &REGIMEN_PLANS[2],
    }
}

// ============================================================================
// Pathogen Rules
// ============================================================================

/// Seeded for every patient
pub const BASELINE_PATHOGENS: &[&str] = &["Streptococcus pneumoniae", "Haemophilus influenzae"];

/// Adds `pathogen` when `applies` holds
#[derive(Clone, Copy)]
pub struct PathogenRule {
    pub pathogen: &'static str,
    pub applies: fn(&PatientRecord, MdroRiskTier) -> bool,
}

/// Evaluated in order after the baseline; each pathogen appears once
pub const PATHOGEN_RULES: &[PathogenRule] = &[
    PathogenRule {
        pathogen: "MRSA",
        applies: |record, tier| tier == MdroRiskTier::High || record.comorbidities.prior_mrsa,
    },
    PathogenRule {
        pathogen: "Pseudomonas aeruginosa",
        applies: |record, tier| {
            tier == MdroRiskTier::High || record.comorbidities.prior_pseudomonas
        },
    },
    PathogenRule {
        pathogen: "Moraxella catarrhalis",
        applies: |record, _| record.comorbidities.copd,
    },
];

/// Baseline organisms followed by every rule that applies
pub fn predicted_pathogens(record: &PatientRecord, tier: MdroRiskTier) -> Vec<String> {
    BASELINE_PATHOGENS
        .iter()
        .copied()
        .chain(
            PATHOGEN_RULES
                .iter()
                .filter(|rule| (rule.applies)(record, tier))
                .map(|rule| rule.pathogen),
        )
        .map(str::to_string)
        .collect()
}
