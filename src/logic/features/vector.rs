//! Feature Vector - Core data structure for ML input
//!
//! **Schema-bound feature vector**
//!
//! Values are positionally aligned with the schema the vector was built for;
//! the vector keeps that schema so its layout hash can be checked by the
//! classifier before scoring.

use crate::logic::error::PipelineError;
use crate::logic::records::RecordSet;
use crate::logic::schema::{LayoutMismatchError, Schema};

// ============================================================================
// FEATURE VECTOR
// ============================================================================

/// Ordered, finite feature values for one record
///
/// Only constructed through [`FeatureVectorBuilder`], so length always equals
/// the schema field count and every value is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    schema: Schema,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Assemble the vector for the last selected row
    ///
    /// Earlier selections only feed the trend charts and never influence the
    /// vector.
    pub fn build(
        records: &RecordSet,
        selection: &[usize],
        schema: &Schema,
    ) -> Result<Self, PipelineError> {
        let target = target_row(selection)?;
        FeatureVectorBuilder::new(*schema)
            .from_record(records, target)?
            .build()
    }

    /// Create from values already in schema order
    pub fn from_values(schema: Schema, values: &[f64]) -> Result<Self, PipelineError> {
        let mut builder = FeatureVectorBuilder::new(schema);
        for (name, value) in schema.fields().iter().zip(values) {
            builder = builder.set(name, *value);
        }
        builder.build()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn version(&self) -> u8 {
        self.schema.version()
    }

    pub fn layout_hash(&self) -> u32 {
        self.schema.layout_hash()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        self.schema.field_index(name).and_then(|i| self.get(i))
    }

    /// (field, value) pairs in schema order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.schema.fields().iter().copied().zip(self.values.iter().copied())
    }

    /// Check this vector against the layout a consumer expects
    pub fn validate_layout(&self, expected: &Schema) -> Result<(), LayoutMismatchError> {
        expected.validate_layout(self.version(), self.layout_hash())
    }

    /// Single-precision copy for tensor input
    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "schema_version": self.version(),
            "layout_hash": self.layout_hash(),
            "values": self.values,
            "named_values": self
                .named()
                .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
                .collect::<serde_json::Map<_, _>>(),
        })
    }
}

/// Index of the row a vector is built from: the last one the caller selected
pub fn target_row(selection: &[usize]) -> Result<usize, PipelineError> {
    selection.last().copied().ok_or(PipelineError::NoSelection)
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating FeatureVector with named setters
#[derive(Debug, Clone)]
pub struct FeatureVectorBuilder {
    schema: Schema,
    values: Vec<Option<f64>>,
}

impl FeatureVectorBuilder {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            values: vec![None; schema.len()],
        }
    }

    /// Fill every schema field from one row of the record set
    ///
    /// This is the only place raw values get coerced to numbers. The first
    /// field that is absent or not numeric aborts the whole build.
    pub fn from_record(mut self, records: &RecordSet, index: usize) -> Result<Self, PipelineError> {
        let row = records
            .row(index)
            .ok_or(PipelineError::UnknownRow { index })?;

        for (slot, field) in self.schema.fields().iter().enumerate() {
            let col = records
                .column_index(field)
                .ok_or_else(|| PipelineError::missing_columns([*field]))?;
            let raw = &row.values()[col];

            match raw.as_number() {
                Some(value) => self.values[slot] = Some(value),
                None => {
                    log::debug!("Row {} field {} is not numeric: {:?}", index, field, raw);
                    return Err(PipelineError::non_numeric(*field, raw.to_string()));
                }
            }
        }

        Ok(self)
    }

    /// Set feature by name; unknown names are ignored
    pub fn set(mut self, name: &str, value: f64) -> Self {
        if let Some(index) = self.schema.field_index(name) {
            self.values[index] = Some(value);
        }
        self
    }

    pub fn build(self) -> Result<FeatureVector, PipelineError> {
        let mut values = Vec::with_capacity(self.values.len());

        for (field, value) in self.schema.fields().iter().zip(self.values) {
            match value {
                Some(v) if v.is_finite() => values.push(v),
                Some(v) => return Err(PipelineError::non_numeric(*field, v.to_string())),
                None => return Err(PipelineError::non_numeric(*field, "<missing>")),
            }
        }

        Ok(FeatureVector {
            schema: self.schema,
            values,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::records::RawValue;
    use crate::logic::schema::{FEATURE_COUNT, REQUIRED_FIELDS};

    fn full_row(offset: f64) -> Vec<RawValue> {
        (0..FEATURE_COUNT)
            .map(|i| RawValue::Numeric(offset + i as f64))
            .collect()
    }

    #[test]
    fn test_target_row_is_last_selected() {
        assert_eq!(target_row(&[4, 1, 7]), Ok(7));
        assert_eq!(target_row(&[9, 2]), Ok(2));
        assert_eq!(target_row(&[]), Err(PipelineError::NoSelection));
    }

    #[test]
    fn test_build_aligns_with_schema() {
        let set = RecordSet::from_rows(REQUIRED_FIELDS.iter().copied(), vec![full_row(10.0)]).unwrap();
        let vector = FeatureVector::build(&set, &[0], &Schema::machining()).unwrap();

        assert_eq!(vector.len(), FEATURE_COUNT);
        for (i, field) in REQUIRED_FIELDS.iter().enumerate() {
            assert_eq!(vector.get(i), Some(10.0 + i as f64));
            assert_eq!(vector.get_by_name(field), Some(10.0 + i as f64));
        }
    }

    #[test]
    fn test_build_follows_schema_not_column_order() {
        let mut columns: Vec<&str> = REQUIRED_FIELDS.to_vec();
        columns.reverse();
        let row: Vec<RawValue> = (0..FEATURE_COUNT)
            .rev()
            .map(|i| RawValue::Numeric(i as f64))
            .collect();
        let set = RecordSet::from_rows(columns, vec![row]).unwrap();

        let vector = FeatureVector::build(&set, &[0], &Schema::machining()).unwrap();
        let expected: Vec<f64> = (0..FEATURE_COUNT).map(|i| i as f64).collect();
        assert_eq!(vector.values(), expected.as_slice());
    }

    #[test]
    fn test_empty_selection() {
        let set = RecordSet::from_rows(REQUIRED_FIELDS.iter().copied(), vec![full_row(0.0)]).unwrap();
        assert_eq!(
            FeatureVector::build(&set, &[], &Schema::machining()),
            Err(PipelineError::NoSelection)
        );
    }

    #[test]
    fn test_unknown_row() {
        let set = RecordSet::from_rows(REQUIRED_FIELDS.iter().copied(), vec![full_row(0.0)]).unwrap();
        assert_eq!(
            FeatureVector::build(&set, &[0, 3], &Schema::machining()),
            Err(PipelineError::UnknownRow { index: 3 })
        );
    }

    #[test]
    fn test_text_numbers_are_coerced() {
        let mut row = full_row(0.0);
        row[2] = RawValue::from("0.125");
        let set = RecordSet::from_rows(REQUIRED_FIELDS.iter().copied(), vec![row]).unwrap();

        let vector = FeatureVector::build(&set, &[0], &Schema::machining()).unwrap();
        assert_eq!(vector.get_by_name("Feed_rate"), Some(0.125));
    }

    #[test]
    fn test_builder_set_and_missing() {
        const TWO: &[&str] = &["a", "b"];
        let schema = Schema::new(1, TWO);

        let err = FeatureVectorBuilder::new(schema).set("a", 1.0).build().unwrap_err();
        assert_eq!(err, PipelineError::non_numeric("b", "<missing>"));

        let vector = FeatureVectorBuilder::new(schema)
            .set("b", 2.0)
            .set("a", 1.0)
            .set("zzz", 9.0)
            .build()
            .unwrap();
        assert_eq!(vector.values(), &[1.0, 2.0]);
    }

    #[test]
    fn test_builder_rejects_non_finite() {
        const ONE: &[&str] = &["a"];
        let err = FeatureVector::from_values(Schema::new(1, ONE), &[f64::NAN]).unwrap_err();
        assert_eq!(err.kind(), "non_numeric_field");
    }

    #[test]
    fn test_layout_validation() {
        const ONE: &[&str] = &["a"];
        let vector = FeatureVector::from_values(Schema::new(1, ONE), &[1.0]).unwrap();
        assert!(vector.validate_layout(&Schema::new(1, ONE)).is_ok());
        assert!(vector.validate_layout(&Schema::machining()).is_err());
    }

    #[test]
    fn test_to_log_entry() {
        const TWO: &[&str] = &["a", "b"];
        let vector = FeatureVector::from_values(Schema::new(1, TWO), &[1.5, 2.5]).unwrap();

        let log = vector.to_log_entry();
        assert_eq!(log["schema_version"], 1);
        assert_eq!(log["named_values"]["b"], 2.5);
        assert!(log["layout_hash"].as_u64().is_some());
        assert_eq!(vector.to_f32(), vec![1.5f32, 2.5f32]);
    }
}
