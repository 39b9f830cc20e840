//! Schema Module - Required input fields
//!
//! Ordered field layout shared by the validator, the feature builder and the
//! classifier, plus the validator itself.

pub mod layout;
pub mod validate;

pub use layout::{
    display_name, LayoutInfo, LayoutMismatchError, Schema, CHART_FIELDS, FEATURE_COUNT,
    REQUIRED_FIELDS, SCHEMA_VERSION,
};
pub use validate::{missing_fields, validate};
