//! Model Module - failure classifier behind a trait
//!
//! The pipeline talks to `PredictionOracle` only. `OnnxOracle` is the
//! production engine; `OracleSlot` holds whichever oracle loaded at startup.

pub mod checksum;
pub mod inference;
pub mod loader;
pub mod metadata;
pub mod oracle;
pub mod slot;

// Re-export common types
pub use checksum::{sha256_file, verify_checksum};
pub use inference::OnnxOracle;
pub use metadata::{ModelMetadata, ModelSidecar, DEFAULT_DECISION_THRESHOLD};
pub use oracle::{FailureLabel, OracleError, Prediction, PredictionOracle};
pub use slot::OracleSlot;
