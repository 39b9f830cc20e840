use serde::{Serialize, Deserialize};

use crate::constants;
use crate::logic::model::OracleSlot;
use crate::logic::schema::{LayoutInfo, Schema};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub app_name: String,
    pub app_version: String,

    pub schema: LayoutInfo,
    pub model: ModelStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub loaded: bool,
    pub engine: Option<String>, // "onnx" | test doubles
    pub model_path: Option<String>,
    pub model_type: Option<String>,
    pub sha256: Option<String>,
    pub loaded_at: Option<String>,
    pub inference_count: u64,
    pub avg_latency_ms: f32,
    pub unavailable_reason: Option<String>,
}

impl ModelStatus {
    pub fn from_slot(slot: &OracleSlot) -> Self {
        let loaded_at = slot.loaded_at().map(|t| t.to_rfc3339());

        match slot.get() {
            Ok(oracle) => {
                let metadata = oracle.metadata();
                let (inference_count, avg_latency_ms) = oracle.stats();
                Self {
                    loaded: true,
                    engine: Some(oracle.name().to_string()),
                    model_path: metadata.as_ref().map(|m| m.model_path.clone()),
                    model_type: metadata.as_ref().map(|m| m.model_type.clone()),
                    sha256: metadata.and_then(|m| m.sha256),
                    loaded_at,
                    inference_count,
                    avg_latency_ms,
                    unavailable_reason: None,
                }
            }
            Err(_) => Self {
                loaded: false,
                engine: None,
                model_path: None,
                model_type: None,
                sha256: None,
                loaded_at: None,
                inference_count: 0,
                avg_latency_ms: 0.0,
                unavailable_reason: slot.unavailable_reason(),
            },
        }
    }
}

impl EngineStatus {
    pub fn collect(schema: &Schema, slot: &OracleSlot) -> Self {
        Self {
            app_name: constants::APP_NAME.to_string(),
            app_version: constants::APP_VERSION.to_string(),
            schema: schema.info(),
            model: ModelStatus::from_slot(slot),
        }
    }
}
