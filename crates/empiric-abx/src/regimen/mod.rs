//! Regimen Selection
//!
//! Interprets the rule table in `rules` for one patient:
//!
//! 1. Seed predicted pathogens (baseline, then MRSA, Pseudomonas, Moraxella)
//! 2. Raise the QTc and severe-renal warnings
//! 3. Run the tier's plan: rationale, then each role rule in order, trying
//!    the preferred agent before its allergy-safe fallback
//! 4. Raise the plan's closing warnings
//!
//! Selection never fails. A role whose candidates are all excluded is
//! omitted, which can leave a regimen empty; an omitted primary role raises
//! a gap warning at its position in the rule order.

pub mod formulary;
pub mod rules;

use crate::allergy::AllergyProfile;
use crate::alerts::selection_warnings;
use crate::patient::PatientRecord;
use crate::policy::EnginePolicy;
use crate::recommendation::AntibioticEntry;
use crate::renal::RenalTier;
use crate::risk::MdroRiskTier;
use rules::{plan_for, predicted_pathogens, RegimenSlot, TherapeuticRole};

/// Output of the selector before assembly
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegimenSelection {
    pub primary: Vec<AntibioticEntry>,
    pub alternative: Vec<AntibioticEntry>,
    pub rationale: Vec<String>,
    pub warnings: Vec<String>,
    pub predicted_pathogens: Vec<String>,
}

/// Select regimens under the standard policy
pub fn select_regimen(record: &PatientRecord, tier: MdroRiskTier) -> RegimenSelection {
    select_regimen_with(record, tier, &EnginePolicy::STANDARD)
}

/// Select regimens under `policy`
pub fn select_regimen_with(
    record: &PatientRecord,
    tier: MdroRiskTier,
    policy: &EnginePolicy,
) -> RegimenSelection {
    let renal_tier = RenalTier::classify(record.labs.gfr, &policy.renal);
    log::debug!("renal tier {:?} for tier {} selection", renal_tier, tier);

    let mut selection = RegimenSelection {
        predicted_pathogens: predicted_pathogens(record, tier),
        ..RegimenSelection::default()
    };

    let mut notes = selection_warnings(record, renal_tier, policy);
    let allergies = AllergyProfile::new(&record.allergies);
    if log::log_enabled!(log::Level::Trace) {
        log::trace!("excluded classes: {:?}", allergies.excluded_classes());
    }
    let plan = plan_for(tier);

    if plan.requires_normal_qtc && record.qtc_prolonged {
        log::debug!("{} risk plan skipped: QTc prolonged", tier);
    } else {
        for line in plan.rationale {
            notes.explain(*line);
        }

        let mut filled: Vec<TherapeuticRole> = Vec::new();
        for rule in plan.rules {
            if rule.qtc_sensitive && record.qtc_prolonged {
                log::trace!("{:?} skipped: QTc prolonged", rule.role);
                continue;
            }
            if let Some(required) = rule.requires_filled {
                if !filled.contains(&required) {
                    log::trace!("{:?} skipped: {:?} not placed", rule.role, required);
                    continue;
                }
            }

            let chosen = rule
                .candidates
                .iter()
                .find(|candidate| !allergies.excludes(candidate.allergy_class));

            let Some(candidate) = chosen else {
                log::debug!(
                    "{:?} omitted: every candidate excluded by allergy",
                    rule.role
                );
                if rule.slot == RegimenSlot::Primary {
                    notes.warn(rule.role.gap_warning());
                }
                continue;
            };

            let entry = candidate.prescribe(renal_tier, &policy.renal);
            log::debug!("{:?} -> {} ({:?})", rule.role, entry.name, rule.slot);
            match rule.slot {
                RegimenSlot::Primary => {
                    filled.push(rule.role);
                    selection.primary.push(entry);
                }
                RegimenSlot::Alternative => selection.alternative.push(entry),
            }
            if let Some(warning) = candidate.warning {
                notes.warn(warning);
            }
            if let Some(rationale) = candidate.rationale {
                notes.explain(rationale);
            }
        }

        for warning in plan.closing_warnings {
            notes.warn(*warning);
        }
    }

    let (warnings, rationale) = notes.into_parts();
    selection.warnings = warnings;
    selection.rationale = rationale;
    selection
}
