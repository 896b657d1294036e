//! Allergy Class Resolution
//!
//! Answers "is this patient allergic to drug class X" from the free-text
//! allergy list entered at the allergy gate.
//!
//! Matching is case-insensitive substring containment: an allergy matches a
//! class when the recorded drug name contains any member drug of the class.
//! "Amoxicillin-clavulanate" therefore matches the penicillin class.

use crate::patient::AllergyRecord;

/// Drug class membership used for cross-reactivity checks
pub const DRUG_CLASS_TABLE: &[(&str, &[&str])] = &[
    (
        "penicillin",
        &["penicillin", "amoxicillin", "ampicillin", "piperacillin"],
    ),
    (
        "cephalosporin",
        &["cephalexin", "ceftriaxone", "cefepime", "ceftazidime"],
    ),
    (
        "fluoroquinolone",
        &["levofloxacin", "ciprofloxacin", "moxifloxacin"],
    ),
    (
        "macrolide",
        &["azithromycin", "clarithromycin", "erythromycin"],
    ),
    ("carbapenem", &["meropenem", "imipenem", "ertapenem"]),
    ("vancomycin", &["vancomycin"]),
    ("aminoglycoside", &["gentamicin", "tobramycin", "amikacin"]),
];

/// Member drugs of a class.
///
/// A class missing from `DRUG_CLASS_TABLE` is its own single member, so
/// `class_members("linezolid")` is `["linezolid"]`.
pub fn class_members(drug_class: &str) -> Vec<String> {
    let wanted = drug_class.to_lowercase();
    DRUG_CLASS_TABLE
        .iter()
        .find(|(name, _)| *name == wanted)
        .map(|(_, members)| members.iter().map(|m| m.to_string()).collect())
        .unwrap_or_else(|| vec![wanted])
}

/// Whether any recorded allergy matches a member of `drug_class`
pub fn is_allergic_to_class(allergies: &[AllergyRecord], drug_class: &str) -> bool {
    let members = class_members(drug_class);
    allergies.iter().any(|allergy| {
        let recorded = allergy.drug.to_lowercase();
        members.iter().any(|member| recorded.contains(member.as_str()))
    })
}

/// Borrowed view over a patient's allergies for repeated class queries
#[derive(Clone, Copy, Debug)]
pub struct AllergyProfile<'a> {
    allergies: &'a [AllergyRecord],
}

impl<'a> AllergyProfile<'a> {
    pub fn new(allergies: &'a [AllergyRecord]) -> Self {
        Self { allergies }
    }

    pub fn excludes(&self, drug_class: &str) -> bool {
        is_allergic_to_class(self.allergies, drug_class)
    }

    /// Every class in `DRUG_CLASS_TABLE` the patient must avoid, in table order
    pub fn excluded_classes(&self) -> Vec<&'static str> {
        DRUG_CLASS_TABLE
            .iter()
            .map(|(name, _)| *name)
            .filter(|name| self.excludes(name))
            .collect()
    }
}
