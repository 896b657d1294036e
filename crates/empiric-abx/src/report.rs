//! Plain-text rendering of a recommendation for terminals and logs.

use crate::recommendation::{AntibioticEntry, TherapyRecommendation};
use std::fmt::Write;

fn write_regimen(out: &mut String, regimen: &[AntibioticEntry]) {
    for (index, entry) in regimen.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, entry);
        if let Some(note) = &entry.renal_adjustment {
            let _ = writeln!(out, "     Renal: {}", note);
        }
        if let Some(note) = &entry.hepatic_adjustment {
            let _ = writeln!(out, "     Hepatic: {}", note);
        }
    }
}

fn write_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}:", title);
    for item in items {
        let _ = writeln!(out, "  - {}", item);
    }
}

/// Render every section of `recommendation` in display order
pub fn render_text(recommendation: &TherapyRecommendation) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "MDRO risk: {}",
        recommendation.mdro_risk_score.as_str().to_uppercase()
    );
    let _ = writeln!(
        out,
        "Predicted pathogens: {}",
        recommendation.predicted_pathogens.join(", ")
    );

    let _ = writeln!(out, "\nPrimary regimen:");
    if recommendation.primary_regimen.is_empty() {
        let _ = writeln!(out, "  (none)");
    } else {
        write_regimen(&mut out, &recommendation.primary_regimen);
    }

    if let Some(alternative) = &recommendation.alternative_regimen {
        let _ = writeln!(out, "\nAlternative regimen:");
        write_regimen(&mut out, alternative);
    }

    write_list(&mut out, "Warnings", &recommendation.warnings);
    write_list(&mut out, "Rationale", &recommendation.rationale);

    let _ = writeln!(out, "\nDe-escalation: {}", recommendation.deescalation_notes);
    let _ = writeln!(out, "Guidelines: {}", recommendation.guideline_compliance);
    out
}
