//! Trend Series - data behind the per-field line charts
//!
//! One series per chart field over every selected row, in the caller's
//! selection order. A cell that can't be read as a number becomes a gap in its
//! own series; other series are unaffected. Rendering happens elsewhere.

use serde::{Deserialize, Serialize};

use crate::logic::error::PipelineError;
use crate::logic::records::RecordSet;
use crate::logic::schema::display_name;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub row: usize,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSeries {
    pub field: String,
    /// Chart title, e.g. "Feed Rate over Selected Rows"
    pub title: String,
    /// Y axis label, e.g. "Feed Rate"
    pub axis_label: String,
    pub points: Vec<SeriesPoint>,
}

impl FeatureSeries {
    /// Number of points with no plottable value
    pub fn gaps(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_none()).count()
    }
}

/// Build one series per field for the selected rows
pub fn trend_series(
    records: &RecordSet,
    selection: &[usize],
    fields: &[&str],
) -> Result<Vec<FeatureSeries>, PipelineError> {
    if selection.is_empty() {
        return Err(PipelineError::NoSelection);
    }
    if let Some(&index) = selection.iter().find(|&&i| records.row(i).is_none()) {
        return Err(PipelineError::UnknownRow { index });
    }

    let series = fields
        .iter()
        .map(|field| {
            let points: Vec<SeriesPoint> = selection
                .iter()
                .map(|&row| SeriesPoint {
                    row,
                    value: records.value(row, field).and_then(|v| v.as_number()),
                })
                .collect();

            let label = display_name(field);
            let series = FeatureSeries {
                field: field.to_string(),
                title: format!("{} over Selected Rows", label),
                axis_label: label,
                points,
            };
            if series.gaps() > 0 {
                log::warn!("Series {} has {} non-numeric points", field, series.gaps());
            }
            series
        })
        .collect();

    Ok(series)
}
