//! Logic Module - prediction core
//!
//! - `records/` - materialised input rows and raw values
//! - `schema/` - required field layout and validation
//! - `features/` - feature vector builder and trend series
//! - `model/` - classifier contract, ONNX engine, oracle slot
//! - `estimator` - time-to-failure policy
//! - `report` - result assembly
//! - `pipeline` - the stages wired together

pub mod config;
pub mod error;
pub mod estimator;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod records;
pub mod report;
pub mod schema;

pub use error::PipelineError;
pub use pipeline::Pipeline;
