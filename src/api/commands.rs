//! Commands - entry points for the presentation layer
//!
//! Every command returns a serialisable response or an `ErrorPayload` the
//! caller can render verbatim.

use serde::{Deserialize, Serialize};

use crate::logic::error::PipelineError;
use crate::logic::features::{target_row, FeatureSeries};
use crate::logic::records::{RawValue, RecordSet};
use crate::logic::report::{Report, ReportMessages};
use crate::logic::schema::missing_fields;
use crate::logic::Pipeline;
use super::engine_status::EngineStatus;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Structured rendering of a pipeline error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl From<&PipelineError> for ErrorPayload {
    fn from(err: &PipelineError) -> Self {
        let mut payload = ErrorPayload {
            kind: err.kind().to_string(),
            message: err.to_string(),
            fields: None,
            field: None,
            value: None,
        };

        match err {
            PipelineError::MissingColumns { fields } => payload.fields = Some(fields.clone()),
            PipelineError::NonNumericField { field, value } => {
                payload.field = Some(field.clone());
                payload.value = Some(value.clone());
            }
            _ => {}
        }

        payload
    }
}

impl From<PipelineError> for ErrorPayload {
    fn from(err: PipelineError) -> Self {
        ErrorPayload::from(&err)
    }
}

/// Schema check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub rows: usize,
    pub missing_fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewRow {
    pub index: usize,
    pub values: Vec<RawValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub columns: Vec<String>,
    pub total_rows: usize,
    pub rows: Vec<PreviewRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub target_row: usize,
    pub report: Report,
    pub messages: ReportMessages,
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Report which required fields are missing; never fails
pub fn validate_records(pipeline: &Pipeline, records: &RecordSet) -> ValidationResponse {
    let missing: Vec<String> = missing_fields(records, pipeline.schema())
        .into_iter()
        .map(String::from)
        .collect();

    ValidationResponse {
        valid: missing.is_empty(),
        rows: records.len(),
        missing_fields: missing,
    }
}

/// First `rows` records for display
pub fn preview_records(records: &RecordSet, rows: usize) -> PreviewResponse {
    PreviewResponse {
        columns: records.columns().to_vec(),
        total_rows: records.len(),
        rows: records
            .preview(rows)
            .iter()
            .map(|r| PreviewRow {
                index: r.index(),
                values: r.values().to_vec(),
            })
            .collect(),
    }
}

/// Score the last selected row
pub fn run_prediction(
    pipeline: &Pipeline,
    records: &RecordSet,
    selection: &[usize],
) -> Result<PredictResponse, ErrorPayload> {
    let report = pipeline.run(records, selection)?;
    let target_row = target_row(selection)?;

    Ok(PredictResponse {
        target_row,
        messages: report.messages(),
        report,
    })
}

pub fn get_trends(
    pipeline: &Pipeline,
    records: &RecordSet,
    selection: &[usize],
) -> Result<Vec<FeatureSeries>, ErrorPayload> {
    Ok(pipeline.trends(records, selection)?)
}

pub fn get_engine_status(pipeline: &Pipeline) -> EngineStatus {
    EngineStatus::collect(pipeline.schema(), pipeline.oracle())
}

// ============================================================================
// TESTS
// ============================================================================
