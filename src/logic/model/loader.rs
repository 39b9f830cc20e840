//! Model loading at startup
//!
//! Resolve path -> verify checksum -> read sidecar -> check layout -> open
//! session. Any failure leaves the slot unavailable with the reason.

use std::path::PathBuf;
use std::sync::Arc;

use crate::logic::config::PredictorConfig;
use crate::logic::schema::Schema;
use super::checksum::verify_checksum;
use super::inference::OnnxOracle;
use super::metadata::ModelSidecar;
use super::oracle::OracleError;
use super::slot::OracleSlot;

/// Build the ONNX oracle described by `config`
pub fn load_oracle(config: &PredictorConfig, schema: Schema) -> Result<OnnxOracle, OracleError> {
    let model_path = config.resolve_model_path().ok_or_else(|| {
        let tried: Vec<String> = config
            .model_candidates()
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        OracleError::ModelNotFound(tried.join(", "))
    })?;

    let sha256 = match &config.model_sha256 {
        Some(expected) => Some(verify_checksum(&model_path, expected)?),
        None => {
            log::debug!("No model checksum configured, skipping verification");
            None
        }
    };

    let sidecar_path: PathBuf = config
        .metadata_path
        .clone()
        .unwrap_or_else(|| ModelSidecar::default_path(&model_path));
    let sidecar = ModelSidecar::load_optional(&sidecar_path)?;
    sidecar.check_layout(&schema)?;

    OnnxOracle::load(&model_path, schema, &sidecar, sha256)
}

/// Load the model into `slot`; returns whether an oracle is now available
pub fn init(slot: &OracleSlot, config: &PredictorConfig, schema: Schema) -> bool {
    let result = load_oracle(config, schema).and_then(|oracle| slot.install(Arc::new(oracle)));

    match result {
        Ok(()) => true,
        Err(OracleError::AlreadyLoaded) => {
            log::debug!("Model already loaded, keeping existing oracle");
            true
        }
        Err(e) => {
            log::warn!("Prediction model unavailable: {}", e);
            slot.mark_unavailable(e.to_string());
            false
        }
    }
}
