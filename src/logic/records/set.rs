//! Record Set - materialized tabular input
//!
//! Rows are stored positionally against one shared column list, so every
//! record has the same field universe by construction.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::value::RawValue;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug)]
pub enum RecordSetError {
    DuplicateColumn(String),
    DuplicateIndex(usize),
    RaggedRow {
        index: usize,
        expected: usize,
        actual: usize,
    },
    IndexLength {
        expected: usize,
        actual: usize,
    },
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl std::fmt::Display for RecordSetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordSetError::DuplicateColumn(name) => write!(f, "Duplicate column: {}", name),
            RecordSetError::DuplicateIndex(index) => write!(f, "Duplicate row index: {}", index),
            RecordSetError::RaggedRow { index, expected, actual } => write!(
                f,
                "Row {} has {} values, expected {}",
                index, actual, expected
            ),
            RecordSetError::IndexLength { expected, actual } => write!(
                f,
                "Index has {} entries but data has {} rows",
                actual, expected
            ),
            RecordSetError::Json(e) => write!(f, "Error reading the data: {}", e),
            RecordSetError::Io(e) => write!(f, "Error reading the file: {}", e),
        }
    }
}

impl std::error::Error for RecordSetError {}

impl From<serde_json::Error> for RecordSetError {
    fn from(err: serde_json::Error) -> Self {
        RecordSetError::Json(err)
    }
}

impl From<std::io::Error> for RecordSetError {
    fn from(err: std::io::Error) -> Self {
        RecordSetError::Io(err)
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// One work cycle: a stable index plus values aligned with the set's columns
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    index: usize,
    values: Vec<RawValue>,
}

impl Record {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn values(&self) -> &[RawValue] {
        &self.values
    }
}

// ============================================================================
// RECORD SET
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    columns: Vec<String>,
    column_lookup: HashMap<String, usize>,
    rows: Vec<Record>,
    row_lookup: HashMap<usize, usize>,
}

impl RecordSet {
    /// Empty record set exposing the given field universe
    pub fn new<I, S>(columns: I) -> Result<Self, RecordSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = RecordSet::default();
        for name in columns {
            let name = name.into();
            if set.column_lookup.contains_key(&name) {
                return Err(RecordSetError::DuplicateColumn(name));
            }
            set.column_lookup.insert(name.clone(), set.columns.len());
            set.columns.push(name);
        }
        Ok(set)
    }

    /// Build from positional rows, indexed 0..n
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<RawValue>>) -> Result<Self, RecordSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new(columns)?;
        for (index, values) in rows.into_iter().enumerate() {
            set.push_row(index, values)?;
        }
        Ok(set)
    }

    /// Append a row under an explicit stable index
    pub fn push_row(&mut self, index: usize, values: Vec<RawValue>) -> Result<(), RecordSetError> {
        if values.len() != self.columns.len() {
            return Err(RecordSetError::RaggedRow {
                index,
                expected: self.columns.len(),
                actual: values.len(),
            });
        }
        if self.row_lookup.contains_key(&index) {
            return Err(RecordSetError::DuplicateIndex(index));
        }

        self.row_lookup.insert(index, self.rows.len());
        self.rows.push(Record { index, values });
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_lookup.contains_key(name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_lookup.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Stable row indices in storage order
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().map(|r| r.index)
    }

    /// Look up a row by its stable index
    pub fn row(&self, index: usize) -> Option<&Record> {
        self.row_lookup.get(&index).map(|&pos| &self.rows[pos])
    }

    /// Raw value of `field` in row `index`
    pub fn value(&self, index: usize, field: &str) -> Option<&RawValue> {
        let col = self.column_index(field)?;
        self.row(index).and_then(|r| r.values.get(col))
    }

    /// First `n` rows for display
    pub fn preview(&self, n: usize) -> &[Record] {
        &self.rows[..n.min(self.rows.len())]
    }

    // ------------------------------------------------------------------------
    // JSON ingestion
    // ------------------------------------------------------------------------

    /// Parse a table serialized as a list of row objects or as a
    /// `{columns, index, data}` split object.
    pub fn from_json_str(input: &str) -> Result<Self, RecordSetError> {
        match serde_json::from_str::<TableLayout>(input)? {
            TableLayout::Split { columns, index, data } => Self::from_split(columns, index, data),
            TableLayout::Records(rows) => Self::from_objects(rows),
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RecordSetError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let set = Self::from_json_str(&content)?;
        log::debug!(
            "Loaded {} rows x {} columns from {}",
            set.len(),
            set.columns.len(),
            path.as_ref().display()
        );
        Ok(set)
    }

    fn from_split(
        columns: Vec<String>,
        index: Option<Vec<usize>>,
        data: Vec<Vec<RawValue>>,
    ) -> Result<Self, RecordSetError> {
        let index = match index {
            Some(index) if index.len() != data.len() => {
                return Err(RecordSetError::IndexLength {
                    expected: data.len(),
                    actual: index.len(),
                });
            }
            Some(index) => index,
            None => (0..data.len()).collect(),
        };

        let mut set = Self::new(columns)?;
        for (idx, values) in index.into_iter().zip(data) {
            set.push_row(idx, values)?;
        }
        Ok(set)
    }

    fn from_objects(rows: Vec<Map<String, Value>>) -> Result<Self, RecordSetError> {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        let mut set = Self::new(columns)?;
        for (index, mut row) in rows.into_iter().enumerate() {
            // Absent keys become Missing so all rows share one field universe
            let values = set
                .columns
                .iter()
                .map(|c| row.remove(c).map(RawValue::from).unwrap_or(RawValue::Missing))
                .collect();
            set.push_row(index, values)?;
        }
        Ok(set)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TableLayout {
    Split {
        columns: Vec<String>,
        #[serde(default)]
        index: Option<Vec<usize>>,
        data: Vec<Vec<RawValue>>,
    },
    Records(Vec<Map<String, Value>>),
}
