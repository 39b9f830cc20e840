//! Features Module - turns raw records into model input
//!
//! `vector` builds the single feature vector the classifier scores.
//! `series` extracts the per-field trend data shown next to the result.

pub mod series;
pub mod vector;

#[cfg(test)]
mod tests;

// Re-export common types
pub use series::{trend_series, FeatureSeries, SeriesPoint};
pub use vector::{target_row, FeatureVector, FeatureVectorBuilder};
