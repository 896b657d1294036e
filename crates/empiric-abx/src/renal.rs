//! Renal impairment tiers derived from GFR.

use crate::policy::RenalThresholds;
use serde::{Deserialize, Serialize};

/// Ordered from normal to worst, so `tier >= RenalTier::Moderate` reads as
/// "moderate or worse".
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RenalTier {
    None,
    Moderate,
    Severe,
}

impl RenalTier {
    /// Classify a GFR (mL/min). Both bounds are strict: GFR exactly at
    /// `severe_below` is moderate, exactly at `moderate_below` is none.
    /// A non-finite GFR fails every comparison and classifies as none.
    pub fn classify(gfr: f64, thresholds: &RenalThresholds) -> Self {
        if gfr < thresholds.severe_below {
            RenalTier::Severe
        } else if gfr < thresholds.moderate_below {
            RenalTier::Moderate
        } else {
            RenalTier::None
        }
    }

    /// The GFR bound below which this tier begins, for note text
    pub fn upper_gfr_bound(&self, thresholds: &RenalThresholds) -> Option<f64> {
        match self {
            RenalTier::None => None,
            RenalTier::Moderate => Some(thresholds.moderate_below),
            RenalTier::Severe => Some(thresholds.severe_below),
        }
    }
}
