//! Pipeline Errors
//!
//! Every variant is terminal for the current request. Variants carry the
//! field names and offending values the presentation layer needs to render a
//! precise message.

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Required fields absent from the record set, in schema order
    MissingColumns { fields: Vec<String> },
    /// Caller selected no rows
    NoSelection,
    /// A selected index does not exist in the record set
    UnknownRow { index: usize },
    /// A required field of the target row cannot be read as a finite number
    NonNumericField { field: String, value: String },
    /// No classifier is loaded
    OracleUnavailable { reason: String },
    /// The classifier failed while scoring
    Prediction { cause: String },
}

impl PipelineError {
    /// Stable machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::MissingColumns { .. } => "missing_columns",
            PipelineError::NoSelection => "no_selection",
            PipelineError::UnknownRow { .. } => "unknown_row",
            PipelineError::NonNumericField { .. } => "non_numeric_field",
            PipelineError::OracleUnavailable { .. } => "oracle_unavailable",
            PipelineError::Prediction { .. } => "prediction",
        }
    }

    pub fn missing_columns<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PipelineError::MissingColumns {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn non_numeric(field: impl Into<String>, value: impl Into<String>) -> Self {
        PipelineError::NonNumericField {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::MissingColumns { fields } => {
                write!(f, "Missing required columns: {}", fields.join(", "))
            }
            PipelineError::NoSelection => write!(f, "Please select at least one row."),
            PipelineError::UnknownRow { index } => {
                write!(f, "Row {} is not in the uploaded data", index)
            }
            PipelineError::NonNumericField { field, value } => write!(
                f,
                "Error with input value for {}: {:?} is not numeric",
                field, value
            ),
            PipelineError::OracleUnavailable { reason } => {
                write!(f, "Model not loaded: {}", reason)
            }
            PipelineError::Prediction { cause } => {
                write!(f, "Error during prediction: {}", cause)
            }
        }
    }
}

impl std::error::Error for PipelineError {}
