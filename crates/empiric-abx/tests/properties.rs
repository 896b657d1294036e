//! Property-Based Tests for the Recommendation Engine
//!
//! These tests verify invariants that must hold for every intake record:
//! - Determinism (same record, same recommendation)
//! - One agent per therapeutic role
//! - QTc prolongation excludes fluoroquinolones and macrolides
//! - No agent the patient is allergic to (by class) is ever recommended
//! - Arbitrary numeric input never panics
//!
//! Uses proptest for randomized property testing with shrinking.

use empiric_abx::{
    generate_recommendation, is_allergic_to_class, AllergyRecord, AllergySeverity, Comorbidities,
    Labs, MdroRiskTier, PatientRecord, ReactionType, RiskFactors, Vitals,
};
use proptest::prelude::*;

const ALLERGY_NAMES: &[&str] = &[
    "Penicillin",
    "AMOXICILLIN",
    "Ceftriaxone",
    "cefepime",
    "Levofloxacin",
    "Azithromycin",
    "Meropenem",
    "Vancomycin",
    "Linezolid",
    "Gentamicin",
    "Sulfa/Trimethoprim",
    "Doxycycline",
];

/// Class each recommended drug belongs to, for allergy cross-checks
const AGENT_CLASSES: &[(&str, &str)] = &[
    ("Ceftriaxone", "cephalosporin"),
    ("Cefepime", "cephalosporin"),
    ("Piperacillin-Tazobactam", "penicillin"),
    ("Meropenem", "carbapenem"),
    ("Azithromycin", "macrolide"),
    ("Levofloxacin", "fluoroquinolone"),
    ("Vancomycin", "vancomycin"),
    ("Linezolid", "linezolid"),
];

fn allergy_strategy() -> impl Strategy<Value = Vec<AllergyRecord>> {
    proptest::collection::vec(
        proptest::sample::select(ALLERGY_NAMES).prop_map(|drug| {
            AllergyRecord::new(drug, ReactionType::Unknown, AllergySeverity::Moderate)
        }),
        0..5,
    )
}

fn record_strategy() -> impl Strategy<Value = PatientRecord> {
    (
        proptest::array::uniform8(any::<bool>()),
        proptest::array::uniform4(any::<bool>()),
        any::<bool>(),
        0.0f64..150.0,
        0.0f64..12.0,
        0.0f64..400.0,
        0.0f64..400.0,
        0u8..25,
        allergy_strategy(),
    )
        .prop_map(
            |(comorb, factors, qtc_prolonged, gfr, lactate, alt, ast, sofa, allergies)| {
                let mut record = PatientRecord::intake_defaults().with_verified_allergies(allergies);
                record.comorbidities = Comorbidities {
                    copd: comorb[0],
                    diabetes: comorb[1],
                    immunosuppression: comorb[2],
                    heart_failure: comorb[3],
                    ckd: comorb[4],
                    esrd: comorb[5],
                    prior_mrsa: comorb[6],
                    prior_pseudomonas: comorb[7],
                };
                record.risk_factors = RiskFactors {
                    hospitalization_last_90_days: factors[0],
                    iv_antibiotics_last_90_days: factors[1],
                    long_term_care_facility: factors[2],
                    mechanical_ventilation: factors[3],
                };
                record.qtc_prolonged = qtc_prolonged;
                record.labs.gfr = gfr;
                record.labs.lactate = lactate;
                record.labs.alt = alt;
                record.labs.ast = ast;
                record.sofa = sofa;
                record
            },
        )
}

proptest! {
    #[test]
    fn prop_recommendation_is_deterministic(record in record_strategy()) {
        prop_assert_eq!(generate_recommendation(&record), generate_recommendation(&record.clone()));
    }

    #[test]
    fn prop_one_agent_per_role(record in record_strategy()) {
        let rec = generate_recommendation(&record);
        prop_assert!(!(rec.primary_contains("Vancomycin") && rec.primary_contains("Linezolid")));
        prop_assert!(!(rec.primary_contains("Cefepime") && rec.primary_contains("Meropenem")));
        prop_assert!(!(rec.primary_contains("Piperacillin-Tazobactam") && rec.primary_contains("Meropenem")));
        prop_assert!(!(rec.primary_contains("Azithromycin") && rec.primary_contains("Levofloxacin")));
        prop_assert!(rec.primary_regimen.len() <= 3);
    }

    #[test]
    fn prop_qtc_prolonged_excludes_qt_agents(record in record_strategy()) {
        let mut record = record;
        record.qtc_prolonged = true;
        let rec = generate_recommendation(&record);
        let alternative = rec.alternative_regimen.clone().unwrap_or_default();
        for entry in rec.primary_regimen.iter().chain(alternative.iter()) {
            prop_assert!(entry.name != "Levofloxacin" && entry.name != "Azithromycin");
        }
        prop_assert!(rec.warnings.iter().any(|w| w.contains("QTc prolongation")));
    }

    #[test]
    fn prop_never_recommends_allergen_class(record in record_strategy()) {
        let rec = generate_recommendation(&record);
        let alternative = rec.alternative_regimen.clone().unwrap_or_default();
        for entry in rec.primary_regimen.iter().chain(alternative.iter()) {
            let class = AGENT_CLASSES
                .iter()
                .find(|(name, _)| *name == entry.name)
                .map(|(_, class)| *class)
                .expect("every recommended agent has a class");
            prop_assert!(
                !is_allergic_to_class(&record.allergies, class),
                "{} recommended despite {} allergy",
                entry.name,
                class
            );
        }
    }

    #[test]
    fn prop_pathogens_unique_and_baseline_first(record in record_strategy()) {
        let rec = generate_recommendation(&record);
        prop_assert_eq!(&rec.predicted_pathogens[0], "Streptococcus pneumoniae");
        prop_assert_eq!(&rec.predicted_pathogens[1], "Haemophilus influenzae");
        let mut seen = std::collections::HashSet::new();
        for pathogen in &rec.predicted_pathogens {
            prop_assert!(seen.insert(pathogen.clone()), "duplicate {}", pathogen);
        }
    }

    #[test]
    fn prop_high_tier_always_plans_deescalation(record in record_strategy()) {
        let rec = generate_recommendation(&record);
        let planned = rec.warnings.iter().any(|w| w.contains("de-escalation at 48-72h"));
        prop_assert_eq!(planned, rec.mdro_risk_score == MdroRiskTier::High);
    }

    /// High tier either places an MRSA agent or says it could not
    #[test]
    fn prop_high_tier_mrsa_role_filled_or_flagged(record in record_strategy()) {
        let rec = generate_recommendation(&record);
        if rec.mdro_risk_score == MdroRiskTier::High {
            let placed = rec.primary_contains("Vancomycin") || rec.primary_contains("Linezolid");
            let flagged = rec
                .warnings
                .iter()
                .any(|w| w.contains("No allergy-safe MRSA coverage identified"));
            prop_assert!(placed != flagged);
        }
    }

    #[test]
    fn prop_empty_alternative_is_absent(record in record_strategy()) {
        let rec = generate_recommendation(&record);
        if let Some(alternative) = &rec.alternative_regimen {
            prop_assert!(!alternative.is_empty());
        }
    }

    /// Any float, including NaN and infinities, yields a recommendation
    #[test]
    fn prop_arbitrary_numbers_never_panic(
        values in proptest::collection::vec(any::<f64>(), 14),
        sofa in any::<u8>(),
        qsofa in any::<u8>(),
    ) {
        let mut record = PatientRecord::intake_defaults().with_verified_allergies(vec![]);
        record.age = values[0];
        record.weight = values[1];
        record.vitals = Vitals {
            heart_rate: values[2],
            systolic_bp: values[3],
            diastolic_bp: values[4],
            respiratory_rate: values[5],
            oxygen_saturation: values[6],
            temperature: values[7],
        };
        record.labs = Labs {
            lactate: values[8],
            wbc: values[9],
            creatinine: values[10],
            gfr: values[11],
            alt: values[12],
            ast: values[13],
            procalcitonin: 0.0,
            crp: 0.0,
            ph: None,
            pco2: None,
            po2: None,
        };
        record.sofa = sofa;
        record.qsofa = qsofa;
        let rec = generate_recommendation(&record);
        prop_assert!(!rec.predicted_pathogens.is_empty());
    }
}
