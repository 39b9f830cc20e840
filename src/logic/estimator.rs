//! Time-to-Failure Estimator
//!
//! Maps a failure probability to remaining operating hours with a three-branch
//! policy over one year of runtime:
//!
//! | probability  | hours                      | band   |
//! |--------------|----------------------------|--------|
//! | `< 0.3`      | `MAX * (1 - p)`            | Low    |
//! | `< 0.7`      | `MAX * (0.7 - p)`          | Medium |
//! | otherwise    | `MAX * (1 - p) * 0.5`      | High   |
//!
//! The result never drops below one hour. The branches do not meet at 0.3
//! and 0.7; the jumps are part of the policy.

use serde::{Deserialize, Serialize};

/// One year of continuous operation
pub const MAX_HOURS: f64 = 365.0 * 24.0;

/// Upper bound (exclusive) of the low-risk branch
pub const LOW_RISK_CEILING: f64 = 0.3;

/// Lower bound (inclusive) of the high-risk branch
pub const HIGH_RISK_FLOOR: f64 = 0.7;

/// Extra shrink applied to high-risk estimates
pub const HIGH_RISK_COMPRESSION: f64 = 0.5;

/// Smallest estimate ever reported
pub const MIN_HOURS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub fn of(probability: f64) -> Self {
        if probability < LOW_RISK_CEILING {
            RiskBand::Low
        } else if probability < HIGH_RISK_FLOOR {
            RiskBand::Medium
        } else {
            RiskBand::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "low",
            RiskBand::Medium => "medium",
            RiskBand::High => "high",
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Estimated remaining hours plus the branch that produced them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeToFailure {
    pub hours: f64,
    pub band: RiskBand,
}

/// Remaining hours for a failure probability in [0, 1]
pub fn estimate_hours(probability: f64) -> f64 {
    let hours = match RiskBand::of(probability) {
        RiskBand::Low => MAX_HOURS * (1.0 - probability),
        RiskBand::Medium => MAX_HOURS * (HIGH_RISK_FLOOR - probability),
        RiskBand::High => MAX_HOURS * (1.0 - probability) * HIGH_RISK_COMPRESSION,
    };
    hours.max(MIN_HOURS)
}

pub fn estimate(probability: f64) -> TimeToFailure {
    TimeToFailure {
        hours: estimate_hours(probability),
        band: RiskBand::of(probability),
    }
}
