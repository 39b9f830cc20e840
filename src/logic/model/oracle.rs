//! Prediction Oracle - the classifier contract
//!
//! The pipeline only relies on this trait; the trained classifier behind it
//! is opaque. Implementations must keep their internal state read-only after
//! loading so one instance can serve concurrent requests.

use serde::{Deserialize, Serialize};

use crate::logic::features::FeatureVector;

// ============================================================================
// LABEL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureLabel {
    NoFailure,
    Failure,
}

impl FailureLabel {
    /// Map a classifier class id; class 1 is the failure class
    pub fn from_class(class: i64) -> Self {
        if class == 1 {
            FailureLabel::Failure
        } else {
            FailureLabel::NoFailure
        }
    }

    pub fn class_index(&self) -> i64 {
        match self {
            FailureLabel::NoFailure => 0,
            FailureLabel::Failure => 1,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FailureLabel::Failure)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureLabel::NoFailure => "no_failure",
            FailureLabel::Failure => "failure",
        }
    }

    /// Operator-facing condition text
    pub fn condition(&self) -> &'static str {
        match self {
            FailureLabel::NoFailure => "Machine Still in Good Condition to Run",
            FailureLabel::Failure => "Machine Failure, Need Maintenance",
        }
    }
}

impl std::fmt::Display for FailureLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PREDICTION
// ============================================================================

/// Classifier output for one feature vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: FailureLabel,
    /// Probability of the failure class, 0.0 - 1.0
    pub probability: f64,
}

impl Prediction {
    pub fn new(label: FailureLabel, probability: f64) -> Result<Self, OracleError> {
        check_probability(probability)?;
        Ok(Self { label, probability })
    }
}

/// Reject probabilities outside [0, 1] and non-finite values
pub fn check_probability(probability: f64) -> Result<f64, OracleError> {
    if probability.is_finite() && (0.0..=1.0).contains(&probability) {
        Ok(probability)
    } else {
        Err(OracleError::InvalidOutput(format!(
            "failure probability {} outside [0, 1]",
            probability
        )))
    }
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub enum OracleError {
    ModelNotFound(String),
    ChecksumMismatch { expected: String, actual: String },
    LayoutMismatch(String),
    Metadata(String),
    AlreadyLoaded,
    Runtime(String),
    InvalidOutput(String),
    Io(std::io::Error),
}

impl std::fmt::Display for OracleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OracleError::ModelNotFound(path) => write!(f, "Model file not found: {}", path),
            OracleError::ChecksumMismatch { expected, actual } => write!(
                f,
                "Model checksum mismatch: expected {}, got {}",
                expected, actual
            ),
            OracleError::LayoutMismatch(msg) => write!(f, "Model layout mismatch: {}", msg),
            OracleError::Metadata(msg) => write!(f, "Model metadata error: {}", msg),
            OracleError::AlreadyLoaded => write!(f, "A model is already loaded"),
            OracleError::Runtime(msg) => write!(f, "Inference failed: {}", msg),
            OracleError::InvalidOutput(msg) => write!(f, "Invalid model output: {}", msg),
            OracleError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for OracleError {}

impl From<std::io::Error> for OracleError {
    fn from(err: std::io::Error) -> Self {
        OracleError::Io(err)
    }
}

// ============================================================================
// ORACLE TRAIT
// ============================================================================

/// Trait for failure classifiers (ONNX, remote, test doubles, ...)
pub trait PredictionOracle: Send + Sync {
    /// Engine name for status and logs
    fn name(&self) -> &str;

    fn classify(&self, vector: &FeatureVector) -> Result<FailureLabel, OracleError>;

    /// Probability of the failure class
    fn failure_probability(&self, vector: &FeatureVector) -> Result<f64, OracleError>;

    /// Label and probability together
    ///
    /// Engines that produce both from a single run should override this.
    fn predict(&self, vector: &FeatureVector) -> Result<Prediction, OracleError> {
        let label = self.classify(vector)?;
        let probability = self.failure_probability(vector)?;
        Prediction::new(label, probability)
    }

    /// Model details, when the engine has any
    fn metadata(&self) -> Option<super::ModelMetadata> {
        None
    }

    /// (inference count, average latency in ms)
    fn stats(&self) -> (u64, f32) {
        (0, 0.0)
    }
}
