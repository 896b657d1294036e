//! MDRO Risk Scoring
//!
//! Weighted additive score over healthcare exposures and colonisation
//! history, bucketed into three tiers:
//!
//! | Factor                          | Points |
//! |---------------------------------|--------|
//! | Hospitalization, last 90 days   | 2      |
//! | IV antibiotics, last 90 days    | 2      |
//! | Long-term care facility         | 2      |
//! | Mechanical ventilation          | 2      |
//! | Prior MRSA                      | 3      |
//! | Prior Pseudomonas               | 3      |
//! | Immunosuppression               | 1      |
//!
//! score ≥ 6 is high, 3 ≤ score < 6 is moderate, otherwise low. Weights and
//! thresholds come from `EnginePolicy`.

use crate::patient::PatientRecord;
use crate::policy::{EnginePolicy, RiskThresholds, RiskWeights};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Multidrug-resistant organism risk tier
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MdroRiskTier {
    Low,
    Moderate,
    High,
}

impl MdroRiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MdroRiskTier::Low => "low",
            MdroRiskTier::Moderate => "moderate",
            MdroRiskTier::High => "high",
        }
    }
}

impl fmt::Display for MdroRiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw additive score. Comorbidities other than the three weighted ones
/// contribute nothing.
pub fn mdro_risk_points(record: &PatientRecord, weights: &RiskWeights) -> u32 {
    let factors = &record.risk_factors;
    let comorbidities = &record.comorbidities;

    [
        (factors.hospitalization_last_90_days, weights.hospitalization),
        (factors.iv_antibiotics_last_90_days, weights.iv_antibiotics),
        (factors.long_term_care_facility, weights.long_term_care),
        (comorbidities.prior_mrsa, weights.prior_mrsa),
        (comorbidities.prior_pseudomonas, weights.prior_pseudomonas),
        (comorbidities.immunosuppression, weights.immunosuppression),
        (factors.mechanical_ventilation, weights.mechanical_ventilation),
    ]
    .iter()
    .filter(|(present, _)| *present)
    .map(|(_, points)| points)
    .sum()
}

/// Map a score onto its tier
pub fn tier_for_score(score: u32, thresholds: &RiskThresholds) -> MdroRiskTier {
    if score >= thresholds.high_at {
        MdroRiskTier::High
    } else if score >= thresholds.moderate_at {
        MdroRiskTier::Moderate
    } else {
        MdroRiskTier::Low
    }
}

/// Score a record under `policy` and return its tier
pub fn score_mdro_risk_with(record: &PatientRecord, policy: &EnginePolicy) -> MdroRiskTier {
    let score = mdro_risk_points(record, &policy.risk_weights);
    let tier = tier_for_score(score, &policy.risk_thresholds);
    log::debug!("MDRO risk score {} -> {}", score, tier);
    tier
}

/// Score a record under the standard policy
pub fn score_mdro_risk(record: &PatientRecord) -> MdroRiskTier {
    score_mdro_risk_with(record, &EnginePolicy::STANDARD)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PatientRecord {
        PatientRecord::intake_defaults()
    }

    #[test]
    fn test_no_factors_is_low() {
        let r = record();
        assert_eq!(mdro_risk_points(&r, &RiskWeights::STANDARD), 0);
        assert_eq!(score_mdro_risk(&r), MdroRiskTier::Low);
    }

    #[test]
    fn test_unweighted_comorbidities_score_zero() {
        let mut r = record();
        r.comorbidities.copd = true;
        r.comorbidities.diabetes = true;
        r.comorbidities.heart_failure = true;
        r.comorbidities.ckd = true;
        r.comorbidities.esrd = true;
        assert_eq!(mdro_risk_points(&r, &RiskWeights::STANDARD), 0);
    }

    #[test]
    fn test_score_two_is_low() {
        let mut r = record();
        r.risk_factors.hospitalization_last_90_days = true;
        assert_eq!(mdro_risk_points(&r, &RiskWeights::STANDARD), 2);
        assert_eq!(score_mdro_risk(&r), MdroRiskTier::Low);
    }

    #[test]
    fn test_score_three_is_moderate() {
        let mut r = record();
        r.comorbidities.prior_mrsa = true;
        assert_eq!(mdro_risk_points(&r, &RiskWeights::STANDARD), 3);
        assert_eq!(score_mdro_risk(&r), MdroRiskTier::Moderate);
    }

    #[test]
    fn test_score_five_is_moderate() {
        let mut r = record();
        r.comorbidities.prior_pseudomonas = true;
        r.risk_factors.mechanical_ventilation = true;
        assert_eq!(mdro_risk_points(&r, &RiskWeights::STANDARD), 5);
        assert_eq!(score_mdro_risk(&r), MdroRiskTier::Moderate);
    }

    #[test]
    fn test_score_six_is_high() {
        let mut r = record();
        r.risk_factors.hospitalization_last_90_days = true;
        r.risk_factors.iv_antibiotics_last_90_days = true;
        r.risk_factors.long_term_care_facility = true;
        assert_eq!(mdro_risk_points(&r, &RiskWeights::STANDARD), 6);
        assert_eq!(score_mdro_risk(&r), MdroRiskTier::High);
    }

    #[test]
    fn test_all_factors_reach_max_score() {
        let mut r = record();
        r.risk_factors.hospitalization_last_90_days = true;
        r.risk_factors.iv_antibiotics_last_90_days = true;
        r.risk_factors.long_term_care_facility = true;
        r.risk_factors.mechanical_ventilation = true;
        r.comorbidities.prior_mrsa = true;
        r.comorbidities.prior_pseudomonas = true;
        r.comorbidities.immunosuppression = true;
        assert_eq!(
            mdro_risk_points(&r, &RiskWeights::STANDARD),
            RiskWeights::STANDARD.max_score()
        );
    }

    #[test]
    fn test_tier_for_score_boundaries() {
        let t = RiskThresholds::STANDARD;
        assert_eq!(tier_for_score(0, &t), MdroRiskTier::Low);
        assert_eq!(tier_for_score(2, &t), MdroRiskTier::Low);
        assert_eq!(tier_for_score(3, &t), MdroRiskTier::Moderate);
        assert_eq!(tier_for_score(5, &t), MdroRiskTier::Moderate);
        assert_eq!(tier_for_score(6, &t), MdroRiskTier::High);
        assert_eq!(tier_for_score(15, &t), MdroRiskTier::High);
    }

    #[test]
    fn test_custom_thresholds() {
        let mut policy = EnginePolicy::STANDARD;
        policy.risk_thresholds.high_at = 9;
        let mut r = record();
        r.risk_factors.hospitalization_last_90_days = true;
        r.risk_factors.iv_antibiotics_last_90_days = true;
        r.risk_factors.long_term_care_facility = true;
        assert_eq!(score_mdro_risk_with(&r, &policy), MdroRiskTier::Moderate);
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MdroRiskTier::High).unwrap(), "\"high\"");
        assert_eq!(MdroRiskTier::Moderate.to_string(), "moderate");
    }
}
