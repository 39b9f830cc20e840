//! Model metadata and the optional JSON sidecar shipped next to a model.
//!
//! Sidecar format (`<model file>.json`, every key optional):
//! ```json
//! {
//!   "model_type": "random_forest",
//!   "feature_names": ["Cutting_speed", "Feed", "..."],
//!   "threshold": 0.5,
//!   "label_output": "output_label",
//!   "probability_output": "output_probability"
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::logic::schema::Schema;
use super::oracle::OracleError;

/// Probability at or above which a probability-only model reports Failure
pub const DEFAULT_DECISION_THRESHOLD: f64 = 0.5;

/// Default model type when the sidecar doesn't name one
pub const DEFAULT_MODEL_TYPE: &str = "random_forest";

/// Loaded model details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub model_type: String,
    pub features: usize,
    pub feature_names: Vec<String>,
    pub decision_threshold: f64,
    pub sha256: Option<String>,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Sidecar contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSidecar {
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub label_output: Option<String>,
    #[serde(default)]
    pub probability_output: Option<String>,
}

impl ModelSidecar {
    /// `<model>.json` next to the model file
    pub fn default_path(model_path: &Path) -> PathBuf {
        let mut name = model_path.as_os_str().to_os_string();
        name.push(".json");
        PathBuf::from(name)
    }

    pub fn load(path: &Path) -> Result<Self, OracleError> {
        let content = std::fs::read_to_string(path)?;
        let sidecar: ModelSidecar = serde_json::from_str(&content)
            .map_err(|e| OracleError::Metadata(format!("{}: {}", path.display(), e)))?;

        if let Some(threshold) = sidecar.threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(OracleError::Metadata(format!(
                    "threshold {} outside [0, 1]",
                    threshold
                )));
            }
        }

        log::info!("Model metadata loaded from: {}", path.display());
        Ok(sidecar)
    }

    /// Load the sidecar if present, otherwise fall back to defaults
    pub fn load_optional(path: &Path) -> Result<Self, OracleError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("No model metadata at {}", path.display());
            Ok(Self::default())
        }
    }

    /// The model must have been trained on exactly the schema's fields, in order
    pub fn check_layout(&self, schema: &Schema) -> Result<(), OracleError> {
        let Some(names) = &self.feature_names else {
            return Ok(());
        };

        let matches = names.len() == schema.len()
            && names.iter().zip(schema.fields()).all(|(a, b)| a == b);

        if matches {
            Ok(())
        } else {
            Err(OracleError::LayoutMismatch(format!(
                "model features [{}] != schema fields [{}]",
                names.join(", "),
                schema.fields().join(", ")
            )))
        }
    }

    pub fn decision_threshold(&self) -> f64 {
        self.threshold.unwrap_or(DEFAULT_DECISION_THRESHOLD)
    }
}
