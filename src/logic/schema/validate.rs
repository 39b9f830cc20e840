use crate::logic::error::PipelineError;
use crate::logic::records::RecordSet;
use super::layout::Schema;

/// Required fields the record set does not expose, in schema order
pub fn missing_fields(records: &RecordSet, schema: &Schema) -> Vec<&'static str> {
    schema
        .fields()
        .iter()
        .copied()
        .filter(|field| !records.has_column(field))
        .collect()
}

/// Check that every required field is present before anything downstream runs
pub fn validate(records: &RecordSet, schema: &Schema) -> Result<(), PipelineError> {
    let missing = missing_fields(records, schema);

    if missing.is_empty() {
        Ok(())
    } else {
        log::debug!("Schema validation failed, missing: {:?}", missing);
        Err(PipelineError::missing_columns(missing))
    }
}
