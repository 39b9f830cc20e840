//! Reporting Assembler
//!
//! Pure aggregation of one prediction and its time-to-failure estimate.

use serde::{Deserialize, Serialize};

use super::estimator::{RiskBand, TimeToFailure};
use super::model::{FailureLabel, Prediction};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub label: FailureLabel,
    pub probability: f64,
    pub estimate_hours: f64,
    pub risk_band: RiskBand,
}

/// Operator-facing lines for a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMessages {
    pub condition: String,
    pub probability: String,
    pub time_to_failure: String,
}

pub fn assemble(prediction: Prediction, estimate: TimeToFailure) -> Report {
    Report {
        label: prediction.label,
        probability: prediction.probability,
        estimate_hours: estimate.hours,
        risk_band: estimate.band,
    }
}

impl Report {
    pub fn is_failure(&self) -> bool {
        self.label.is_failure()
    }

    pub fn messages(&self) -> ReportMessages {
        ReportMessages {
            condition: self.label.condition().to_string(),
            probability: format!("Probability of Failure: {:.2}", self.probability),
            time_to_failure: format!(
                "Estimated Time to Failure: {:.2} hours",
                self.estimate_hours
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::estimator::estimate;

    #[test]
    fn test_assemble_copies_fields() {
        let prediction = Prediction::new(FailureLabel::Failure, 0.85).unwrap();
        let report = assemble(prediction, estimate(0.85));

        assert_eq!(report.label, FailureLabel::Failure);
        assert_eq!(report.probability, 0.85);
        assert!((report.estimate_hours - 657.0).abs() < 1e-6);
        assert_eq!(report.risk_band, RiskBand::High);
        assert!(report.is_failure());
    }

    #[test]
    fn test_messages() {
        let prediction = Prediction::new(FailureLabel::Failure, 0.85).unwrap();
        let messages = assemble(prediction, estimate(0.85)).messages();

        assert_eq!(messages.condition, "Machine Failure, Need Maintenance");
        assert_eq!(messages.probability, "Probability of Failure: 0.85");
        assert_eq!(messages.time_to_failure, "Estimated Time to Failure: 657.00 hours");
    }

    #[test]
    fn test_messages_low_risk() {
        let prediction = Prediction::new(FailureLabel::NoFailure, 0.1).unwrap();
        let messages = assemble(prediction, estimate(0.1)).messages();

        assert_eq!(messages.condition, "Machine Still in Good Condition to Run");
        assert_eq!(messages.probability, "Probability of Failure: 0.10");
        assert_eq!(messages.time_to_failure, "Estimated Time to Failure: 7884.00 hours");
    }

    #[test]
    fn test_report_serializes_snake_case() {
        let prediction = Prediction::new(FailureLabel::NoFailure, 0.1).unwrap();
        let json = serde_json::to_value(assemble(prediction, estimate(0.1))).unwrap();
        assert_eq!(json["label"], "no_failure");
        assert_eq!(json["risk_band"], "low");
    }
}
