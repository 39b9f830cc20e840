//! API Module
//!
//! Structure:
//! - commands.rs: operations for the presentation layer
//! - engine_status.rs: schema and model status snapshot

pub mod commands;
pub mod engine_status;

pub use commands::*;
pub use engine_status::{EngineStatus, ModelStatus};
