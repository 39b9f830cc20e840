//! Records Module - Tabular input model
//!
//! Materialized record sets handed over by the ingestion layer.
//! Parsing of spreadsheet formats stays outside the core; JSON tables are
//! accepted as the interchange format.

pub mod set;
pub mod value;

pub use set::{Record, RecordSet, RecordSetError};
pub use value::RawValue;
