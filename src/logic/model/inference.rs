//! Inference Engine - ONNX Runtime Integration
//!
//! Runs an exported binary classifier. Expected graph:
//! - input: float tensor `[1, FEATURE_COUNT]` in schema order
//! - output 0: class label tensor (int64), optional
//! - output 1: class probability tensor `[1, 2]` (or `[1]` = failure class)
//!
//! Output names can be pinned in the model sidecar when the export uses a
//! different order.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use crate::logic::features::FeatureVector;
use crate::logic::schema::Schema;
use super::metadata::{ModelMetadata, ModelSidecar, DEFAULT_MODEL_TYPE};
use super::oracle::{check_probability, FailureLabel, OracleError, Prediction, PredictionOracle};

/// Raw result of one session run
#[derive(Debug, Clone, Copy, PartialEq)]
struct RawOutput {
    label: Option<i64>,
    probability: f64,
}

pub struct OnnxOracle {
    // Session::run needs &mut
    session: Mutex<Session>,
    schema: Schema,
    metadata: ModelMetadata,
    label_output: Option<String>,
    probability_output: String,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl OnnxOracle {
    /// Load ONNX model from file
    pub fn load(
        model_path: &Path,
        schema: Schema,
        sidecar: &ModelSidecar,
        sha256: Option<String>,
    ) -> Result<Self, OracleError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(OracleError::ModelNotFound(model_path.display().to_string()));
        }

        let session = Session::builder()
            .map_err(|e| OracleError::Runtime(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| OracleError::Runtime(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| OracleError::Runtime(format!("Failed to load model: {}", e)))?;

        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        let (label_output, probability_output) = resolve_outputs(&output_names, sidecar)?;

        log::info!(
            "ONNX model loaded successfully (label: {:?}, probability: {})",
            label_output,
            probability_output
        );

        let metadata = ModelMetadata {
            model_path: model_path.display().to_string(),
            model_type: sidecar
                .model_type
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL_TYPE.to_string()),
            features: schema.len(),
            feature_names: schema.fields().iter().map(|s| s.to_string()).collect(),
            decision_threshold: sidecar.decision_threshold(),
            sha256,
            loaded_at: chrono::Utc::now(),
        };

        Ok(Self {
            session: Mutex::new(session),
            schema,
            metadata,
            label_output,
            probability_output,
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        })
    }

    fn run(&self, vector: &FeatureVector) -> Result<RawOutput, OracleError> {
        vector
            .validate_layout(&self.schema)
            .map_err(|e| OracleError::LayoutMismatch(e.to_string()))?;

        let start_time = Instant::now();

        let input_array = Array2::<f32>::from_shape_vec((1, vector.len()), vector.to_f32())
            .map_err(|e| OracleError::Runtime(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| OracleError::Runtime(format!("Tensor error: {}", e)))?;

        let raw = {
            let mut session = self.session.lock();
            let outputs = session
                .run(ort::inputs![input_tensor])
                .map_err(|e| OracleError::Runtime(format!("Inference failed: {}", e)))?;

            let probs = outputs
                .get(self.probability_output.as_str())
                .ok_or_else(|| OracleError::InvalidOutput(format!("no output {}", self.probability_output)))?
                .try_extract_tensor::<f32>()
                .map_err(|e| {
                    OracleError::InvalidOutput(format!(
                        "{} is not a float tensor (export with zipmap disabled): {}",
                        self.probability_output, e
                    ))
                })?
                .1;
            let probability = failure_column(probs)?;

            let label = match &self.label_output {
                Some(name) => {
                    let labels = outputs
                        .get(name.as_str())
                        .ok_or_else(|| OracleError::InvalidOutput(format!("no output {}", name)))?
                        .try_extract_tensor::<i64>()
                        .map_err(|e| OracleError::InvalidOutput(format!("{}: {}", name, e)))?
                        .1;
                    Some(
                        *labels
                            .first()
                            .ok_or_else(|| OracleError::InvalidOutput(format!("{} is empty", name)))?,
                    )
                }
                None => None,
            };

            RawOutput { label, probability }
        };

        let elapsed = start_time.elapsed().as_micros() as u64;
        self.latency_sum_us.fetch_add(elapsed, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);
        log::debug!("ONNX inference took {}us", elapsed);

        Ok(raw)
    }

    fn label_of(&self, raw: &RawOutput) -> FailureLabel {
        match raw.label {
            Some(class) => FailureLabel::from_class(class),
            None if raw.probability >= self.metadata.decision_threshold => FailureLabel::Failure,
            None => FailureLabel::NoFailure,
        }
    }
}

impl PredictionOracle for OnnxOracle {
    fn name(&self) -> &str {
        "onnx"
    }

    fn classify(&self, vector: &FeatureVector) -> Result<FailureLabel, OracleError> {
        let raw = self.run(vector)?;
        Ok(self.label_of(&raw))
    }

    fn failure_probability(&self, vector: &FeatureVector) -> Result<f64, OracleError> {
        Ok(self.run(vector)?.probability)
    }

    fn predict(&self, vector: &FeatureVector) -> Result<Prediction, OracleError> {
        let raw = self.run(vector)?;
        Prediction::new(self.label_of(&raw), raw.probability)
    }

    fn metadata(&self) -> Option<ModelMetadata> {
        Some(self.metadata.clone())
    }

    fn stats(&self) -> (u64, f32) {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };
        (count, avg)
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Pick (label output, probability output) names
fn resolve_outputs(
    names: &[String],
    sidecar: &ModelSidecar,
) -> Result<(Option<String>, String), OracleError> {
    let require = |name: &String| {
        if names.contains(name) {
            Ok(name.clone())
        } else {
            Err(OracleError::LayoutMismatch(format!(
                "output {} not in model outputs [{}]",
                name,
                names.join(", ")
            )))
        }
    };

    if let Some(prob) = &sidecar.probability_output {
        let label = sidecar.label_output.as_ref().map(require).transpose()?;
        return Ok((label, require(prob)?));
    }

    match names {
        [] => Err(OracleError::InvalidOutput("model defines no outputs".to_string())),
        [prob] => Ok((None, prob.clone())),
        [label, prob, ..] => Ok((Some(label.clone()), prob.clone())),
    }
}

/// Failure-class probability from a single-row probability tensor
fn failure_column(probs: &[f32]) -> Result<f64, OracleError> {
    let value = match probs {
        [p] => *p,
        [_, p] => *p,
        other => {
            return Err(OracleError::InvalidOutput(format!(
                "expected 1 or 2 probabilities, got {}",
                other.len()
            )))
        }
    };
    check_probability(value as f64)
}

// ============================================================================
// UNIT TESTS
// ============================================================================
