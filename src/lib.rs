//! Failure Predictor - machine failure prediction core
//!
//! Validates a table of machining work cycles, scores the selected cycle with
//! a trained classifier and estimates the remaining hours until failure.

pub mod api;
pub mod constants;
pub mod logic;

pub use logic::estimator::{estimate_hours, RiskBand, TimeToFailure};
pub use logic::model::{FailureLabel, OracleSlot, Prediction, PredictionOracle};
pub use logic::records::{RawValue, RecordSet};
pub use logic::report::Report;
pub use logic::schema::Schema;
pub use logic::{Pipeline, PipelineError};
