//! Prediction Pipeline
//!
//! validate -> build vector -> oracle -> estimate -> report
//!
//! Each stage finishes or fails before the next one starts. The only shared
//! state is the oracle slot, read-only after startup.

use std::sync::Arc;
use std::time::Instant;

use super::error::PipelineError;
use super::estimator;
use super::features::{trend_series, FeatureSeries, FeatureVector};
use super::model::{OracleSlot, PredictionOracle};
use super::records::RecordSet;
use super::report::{assemble, Report};
use super::schema::{self, Schema, CHART_FIELDS};

pub struct Pipeline {
    schema: Schema,
    oracle: Arc<OracleSlot>,
}

impl Pipeline {
    pub fn new(schema: Schema, oracle: Arc<OracleSlot>) -> Self {
        Self { schema, oracle }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn oracle(&self) -> &OracleSlot {
        &self.oracle
    }

    /// Check that every required field is present
    pub fn validate(&self, records: &RecordSet) -> Result<(), PipelineError> {
        schema::validate(records, &self.schema).map_err(|e| {
            log::warn!("Validation failed: {}", e);
            e
        })
    }

    /// Score the last selected row
    pub fn run(&self, records: &RecordSet, selection: &[usize]) -> Result<Report, PipelineError> {
        let start = Instant::now();

        let result = self.run_stages(records, selection);

        match &result {
            Ok(report) => log::info!(
                "Prediction complete: {} (p={:.3}, {:.1}h, {}) in {}us",
                report.label,
                report.probability,
                report.estimate_hours,
                report.risk_band,
                start.elapsed().as_micros()
            ),
            Err(e) => log::warn!("Prediction request failed [{}]: {}", e.kind(), e),
        }

        result
    }

    fn run_stages(&self, records: &RecordSet, selection: &[usize]) -> Result<Report, PipelineError> {
        schema::validate(records, &self.schema)?;
        log::debug!("Schema check passed ({} rows)", records.len());

        let vector = FeatureVector::build(records, selection, &self.schema)?;
        log::debug!("Feature vector: {}", vector.to_log_entry());

        let oracle = self.oracle.get()?;
        let prediction = predict_with(oracle.as_ref(), &vector)?;
        log::debug!(
            "Oracle {} -> {} @ {:.3}",
            oracle.name(),
            prediction.label,
            prediction.probability
        );

        let estimate = estimator::estimate(prediction.probability);
        Ok(assemble(prediction, estimate))
    }

    /// Chart data for the selected rows
    pub fn trends(
        &self,
        records: &RecordSet,
        selection: &[usize],
    ) -> Result<Vec<FeatureSeries>, PipelineError> {
        trend_series(records, selection, CHART_FIELDS)
    }
}

fn predict_with(
    oracle: &dyn PredictionOracle,
    vector: &FeatureVector,
) -> Result<super::model::Prediction, PipelineError> {
    oracle.predict(vector).map_err(|e| PipelineError::Prediction {
        cause: e.to_string(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::logic::estimator::RiskBand;
    use crate::logic::model::{FailureLabel, OracleError};
    use crate::logic::records::RawValue;
    use crate::logic::schema::REQUIRED_FIELDS;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Oracle returning a fixed answer and counting calls
    pub(crate) struct StubOracle {
        pub label: FailureLabel,
        pub probability: f64,
        pub calls: AtomicUsize,
    }

    impl StubOracle {
        pub(crate) fn new(label: FailureLabel, probability: f64) -> Self {
            Self {
                label,
                probability,
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PredictionOracle for StubOracle {
        fn name(&self) -> &str {
            "stub"
        }

        fn classify(&self, _: &FeatureVector) -> Result<FailureLabel, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.label)
        }

        fn failure_probability(&self, _: &FeatureVector) -> Result<f64, OracleError> {
            Ok(self.probability)
        }
    }

    pub(crate) fn machining_row(seed: f64) -> Vec<RawValue> {
        REQUIRED_FIELDS
            .iter()
            .enumerate()
            .map(|(i, _)| RawValue::Numeric(seed + i as f64))
            .collect()
    }

    pub(crate) fn machining_records(rows: usize) -> RecordSet {
        let data = (0..rows).map(|i| machining_row(i as f64 * 10.0)).collect();
        RecordSet::from_rows(REQUIRED_FIELDS.iter().copied(), data).unwrap()
    }

    fn pipeline_with(stub: Arc<StubOracle>) -> Pipeline {
        Pipeline::new(Schema::machining(), Arc::new(OracleSlot::with_oracle(stub)))
    }

    #[test]
    fn test_end_to_end_high_risk() {
        let stub = Arc::new(StubOracle::new(FailureLabel::Failure, 0.85));
        let pipeline = pipeline_with(stub.clone());

        let report = pipeline.run(&machining_records(1), &[0]).unwrap();
        assert_eq!(report.label, FailureLabel::Failure);
        assert_eq!(report.probability, 0.85);
        assert!((report.estimate_hours - 657.0).abs() < 1e-6);
        assert_eq!(report.risk_band, RiskBand::High);
        assert_eq!(stub.calls(), 1);
    }

    #[test]
    fn test_end_to_end_low_risk() {
        let stub = Arc::new(StubOracle::new(FailureLabel::NoFailure, 0.10));
        let pipeline = pipeline_with(stub);

        let report = pipeline.run(&machining_records(3), &[0, 2]).unwrap();
        assert_eq!(report.label, FailureLabel::NoFailure);
        assert!((report.estimate_hours - 7884.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_selection_never_calls_oracle() {
        let stub = Arc::new(StubOracle::new(FailureLabel::Failure, 0.9));
        let pipeline = pipeline_with(stub.clone());

        assert_eq!(
            pipeline.run(&machining_records(2), &[]),
            Err(PipelineError::NoSelection)
        );
        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn test_missing_columns_stop_before_oracle() {
        let stub = Arc::new(StubOracle::new(FailureLabel::Failure, 0.9));
        let pipeline = pipeline_with(stub.clone());

        let records = RecordSet::from_rows(
            ["Cutting_speed", "Feed"],
            vec![vec![RawValue::Numeric(1.0), RawValue::Numeric(2.0)]],
        )
        .unwrap();

        match pipeline.run(&records, &[0]) {
            Err(PipelineError::MissingColumns { fields }) => {
                assert_eq!(fields.len(), REQUIRED_FIELDS.len() - 2);
                assert_eq!(fields[0], "Feed_rate");
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn test_non_numeric_target_stops_before_oracle() {
        let stub = Arc::new(StubOracle::new(FailureLabel::Failure, 0.9));
        let pipeline = pipeline_with(stub.clone());

        let mut row = machining_row(0.0);
        row[4] = RawValue::Text("high".into());
        let records = RecordSet::from_rows(REQUIRED_FIELDS.iter().copied(), vec![row]).unwrap();

        assert_eq!(
            pipeline.run(&records, &[0]),
            Err(PipelineError::non_numeric("Cooling", "high"))
        );
        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn test_unavailable_oracle() {
        let slot = OracleSlot::new();
        slot.mark_unavailable("Model file not found: models/model.onnx");
        let pipeline = Pipeline::new(Schema::machining(), Arc::new(slot));

        match pipeline.run(&machining_records(1), &[0]) {
            Err(PipelineError::OracleUnavailable { reason }) => {
                assert!(reason.contains("models/model.onnx"))
            }
            other => panic!("expected OracleUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_probability_is_prediction_error() {
        let stub = Arc::new(StubOracle::new(FailureLabel::Failure, 1.7));
        let pipeline = pipeline_with(stub);

        assert!(matches!(
            pipeline.run(&machining_records(1), &[0]),
            Err(PipelineError::Prediction { .. })
        ));
    }

    #[test]
    fn test_trends_use_chart_fields() {
        let stub = Arc::new(StubOracle::new(FailureLabel::NoFailure, 0.2));
        let pipeline = pipeline_with(stub);

        let series = pipeline.trends(&machining_records(3), &[2, 0]).unwrap();
        assert_eq!(series.len(), CHART_FIELDS.len());
        assert_eq!(series[0].field, "Cutting_speed");
        assert_eq!(series[0].points[0].row, 2);
        assert_eq!(series[0].points[0].value, Some(20.0));
    }
}
