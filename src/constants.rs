//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Environment variables override the defaults below; a JSON config file
//! (see `logic::config`) sits between the two.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Failure Predictor";

/// Directory name used under the platform data dir
pub const APP_DIR_NAME: &str = "failure-predictor";

/// Model file name looked up in the default search locations
pub const DEFAULT_MODEL_FILE: &str = "model.onnx";

/// Number of rows shown by the data preview
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Env var: explicit path to the ONNX classifier
pub const ENV_MODEL_PATH: &str = "FP_MODEL_PATH";

/// Env var: expected SHA-256 (hex) of the model file
pub const ENV_MODEL_SHA256: &str = "FP_MODEL_SHA256";

/// Env var: path to a JSON config file
pub const ENV_CONFIG_PATH: &str = "FP_CONFIG";

/// Env var: preview row count
pub const ENV_PREVIEW_ROWS: &str = "FP_PREVIEW_ROWS";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get explicit model path from environment
pub fn get_model_path() -> Option<String> {
    std::env::var(ENV_MODEL_PATH).ok().filter(|s| !s.trim().is_empty())
}

/// Get expected model checksum from environment
pub fn get_model_sha256() -> Option<String> {
    std::env::var(ENV_MODEL_SHA256)
        .ok()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}

/// Get config file path from environment
pub fn get_config_path() -> Option<String> {
    std::env::var(ENV_CONFIG_PATH).ok().filter(|s| !s.trim().is_empty())
}

/// Get preview row count from environment
pub fn get_preview_rows() -> Option<usize> {
    std::env::var(ENV_PREVIEW_ROWS)
        .ok()
        .and_then(|s| s.parse().ok())
}
