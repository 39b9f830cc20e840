//! Oracle Slot - process-wide classifier handle
//!
//! Lifecycle:
//! 1. Created empty at startup: `Unavailable` with a reason.
//! 2. `install` succeeds at most once; the oracle is read-only afterwards.
//! 3. A failed load records why via `mark_unavailable`; every request then
//!    fails with `OracleUnavailable` carrying that reason.
//!
//! The slot is injected into the pipeline explicitly; there is no global.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;

use crate::logic::error::PipelineError;
use super::oracle::{OracleError, PredictionOracle};

const NOT_LOADED: &str = "no model has been loaded";

pub struct OracleSlot {
    oracle: OnceCell<Arc<dyn PredictionOracle>>,
    loaded_at: OnceCell<DateTime<Utc>>,
    unavailable_reason: RwLock<String>,
}

impl OracleSlot {
    pub fn new() -> Self {
        Self {
            oracle: OnceCell::new(),
            loaded_at: OnceCell::new(),
            unavailable_reason: RwLock::new(NOT_LOADED.to_string()),
        }
    }

    /// Slot that is ready from the start
    pub fn with_oracle(oracle: Arc<dyn PredictionOracle>) -> Self {
        let slot = Self::new();
        // A fresh slot is always empty
        let _ = slot.install(oracle);
        slot
    }

    /// Install the oracle; only the first install wins
    pub fn install(&self, oracle: Arc<dyn PredictionOracle>) -> Result<(), OracleError> {
        let name = oracle.name().to_string();
        self.oracle.set(oracle).map_err(|_| OracleError::AlreadyLoaded)?;
        let _ = self.loaded_at.set(Utc::now());
        log::info!("Prediction oracle ready ({})", name);
        Ok(())
    }

    /// Record why no oracle is available
    pub fn mark_unavailable(&self, reason: impl Into<String>) {
        if self.is_available() {
            log::warn!("Ignoring unavailable mark: oracle already installed");
            return;
        }
        *self.unavailable_reason.write() = reason.into();
    }

    pub fn is_available(&self) -> bool {
        self.oracle.get().is_some()
    }

    /// The installed oracle, or `OracleUnavailable`
    pub fn get(&self) -> Result<Arc<dyn PredictionOracle>, PipelineError> {
        self.oracle
            .get()
            .cloned()
            .ok_or_else(|| PipelineError::OracleUnavailable {
                reason: self.unavailable_reason.read().clone(),
            })
    }

    pub fn unavailable_reason(&self) -> Option<String> {
        if self.is_available() {
            None
        } else {
            Some(self.unavailable_reason.read().clone())
        }
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at.get().copied()
    }
}

impl Default for OracleSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::FeatureVector;
    use crate::logic::model::FailureLabel;

    struct Fixed;

    impl PredictionOracle for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn classify(&self, _: &FeatureVector) -> Result<FailureLabel, OracleError> {
            Ok(FailureLabel::NoFailure)
        }

        fn failure_probability(&self, _: &FeatureVector) -> Result<f64, OracleError> {
            Ok(0.1)
        }
    }

    #[test]
    fn test_empty_slot_is_unavailable() {
        let slot = OracleSlot::new();
        assert!(!slot.is_available());
        assert!(slot.loaded_at().is_none());

        match slot.get() {
            Err(PipelineError::OracleUnavailable { reason }) => assert_eq!(reason, NOT_LOADED),
            _ => panic!("expected OracleUnavailable"),
        }
    }

    #[test]
    fn test_unavailable_reason_is_reported() {
        let slot = OracleSlot::new();
        slot.mark_unavailable("Model file not found: models/model.onnx");

        let err = slot.get().err().unwrap();
        assert!(err.to_string().contains("models/model.onnx"));
        assert_eq!(
            slot.unavailable_reason().as_deref(),
            Some("Model file not found: models/model.onnx")
        );
    }

    #[test]
    fn test_install_once() {
        let slot = OracleSlot::new();
        slot.install(Arc::new(Fixed)).unwrap();

        assert!(slot.is_available());
        assert!(slot.loaded_at().is_some());
        assert_eq!(slot.get().unwrap().name(), "fixed");
        assert!(matches!(
            slot.install(Arc::new(Fixed)),
            Err(OracleError::AlreadyLoaded)
        ));
    }

    #[test]
    fn test_mark_unavailable_after_install_is_ignored() {
        let slot = OracleSlot::with_oracle(Arc::new(Fixed));
        slot.mark_unavailable("late failure");
        assert!(slot.get().is_ok());
        assert_eq!(slot.unavailable_reason(), None);
    }
}
