//! Predictor Configuration
//!
//! Defaults, then an optional JSON file, then environment overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Cannot read config {}: {}", path.display(), e),
            ConfigError::Parse(path, e) => write!(f, "Invalid config {}: {}", path.display(), e),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Explicit model path; when unset the default locations are searched
    pub model_path: Option<PathBuf>,
    /// Expected SHA-256 of the model file (hex)
    pub model_sha256: Option<String>,
    /// Sidecar metadata path; defaults to `<model>.json`
    pub metadata_path: Option<PathBuf>,
    /// Rows shown in the data preview
    pub preview_rows: usize,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            model_sha256: None,
            metadata_path: None,
            preview_rows: constants::DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl PredictorConfig {
    /// Load from `FP_CONFIG` (if set) and apply env overrides
    pub fn load() -> Result<Self, ConfigError> {
        let base = match constants::get_config_path() {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        Ok(base.with_env())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        log::info!("Config loaded from: {}", path.display());
        Ok(config)
    }

    /// Environment variables win over file values
    pub fn with_env(mut self) -> Self {
        if let Some(path) = constants::get_model_path() {
            self.model_path = Some(PathBuf::from(path));
        }
        if let Some(sha) = constants::get_model_sha256() {
            self.model_sha256 = Some(sha);
        }
        if let Some(rows) = constants::get_preview_rows() {
            self.preview_rows = rows;
        }
        self
    }

    /// Model locations in lookup order
    pub fn model_candidates(&self) -> Vec<PathBuf> {
        if let Some(path) = &self.model_path {
            return vec![path.clone()];
        }

        let mut candidates = Vec::new();
        if let Some(data_dir) = dirs::data_local_dir() {
            candidates.push(
                data_dir
                    .join(constants::APP_DIR_NAME)
                    .join("models")
                    .join(constants::DEFAULT_MODEL_FILE),
            );
        }
        candidates.push(PathBuf::from("models").join(constants::DEFAULT_MODEL_FILE));
        candidates
    }

    /// First candidate that exists on disk
    pub fn resolve_model_path(&self) -> Option<PathBuf> {
        self.model_candidates().into_iter().find(|p| p.exists())
    }
}

// ============================================================================
// TESTS
// ============================================================================
