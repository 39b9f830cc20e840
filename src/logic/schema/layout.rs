//! Schema Layout - Centralized Field Definition
//!
//! **CRITICAL: This file controls the model input schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add field → increment SCHEMA_VERSION
//! 2. Change order → increment SCHEMA_VERSION
//! 3. Remove field → increment SCHEMA_VERSION
//!
//! The classifier consumes features positionally, so the order below is the
//! contract with every exported model.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// SCHEMA VERSION
// ============================================================================

/// Current schema layout version
pub const SCHEMA_VERSION: u8 = 1;

// ============================================================================
// REQUIRED FIELDS (Authoritative source)
// ============================================================================

/// Field names in exact order they appear in the feature vector
pub const REQUIRED_FIELDS: &[&str] = &[
    // === Process parameters (0-5) ===
    "Cutting_speed",
    "Feed",
    "Feed_rate",
    "Power",
    "Cooling",
    "Process_Time",

    // === Material grade, one-hot (6-8) ===
    "Material_K",
    "Material_N",
    "Material_P",

    // === Drill bit type, one-hot (9-11) ===
    "Drill_Bit_Type_H",
    "Drill_Bit_Type_N",
    "Drill_Bit_Type_W",
];

/// Total number of required fields
/// IMPORTANT: Must match REQUIRED_FIELDS.len()!
pub const FEATURE_COUNT: usize = 12;

/// Process fields plotted over the selected rows
pub const CHART_FIELDS: &[&str] = &[
    "Cutting_speed",
    "Feed",
    "Feed_rate",
    "Power",
    "Cooling",
    "Process_Time",
];

// ============================================================================
// SCHEMA
// ============================================================================

/// Immutable, ordered set of required fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    version: u8,
    fields: &'static [&'static str],
}

impl Schema {
    pub const fn new(version: u8, fields: &'static [&'static str]) -> Self {
        Self { version, fields }
    }

    /// The machining schema every shipped model is trained on
    pub const fn machining() -> Self {
        Self::new(SCHEMA_VERSION, REQUIRED_FIELDS)
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get field index by name (O(n) but fields are few)
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|&n| n == name)
    }

    /// Get field name by index
    pub fn field_name(&self, index: usize) -> Option<&'static str> {
        self.fields.get(index).copied()
    }

    /// CRC32 over version and ordered field names
    /// Used to detect layout mismatches at runtime
    pub fn layout_hash(&self) -> u32 {
        let mut hasher = Hasher::new();

        hasher.update(&[self.version]);

        for name in self.fields {
            hasher.update(name.as_bytes());
            hasher.update(&[0]); // Separator
        }

        hasher.finalize()
    }

    /// Validate that incoming data matches this layout
    pub fn validate_layout(&self, version: u8, hash: u32) -> Result<(), LayoutMismatchError> {
        let current_hash = self.layout_hash();

        if version != self.version || hash != current_hash {
            return Err(LayoutMismatchError {
                expected_version: self.version,
                expected_hash: current_hash,
                actual_version: version,
                actual_hash: hash,
            });
        }

        Ok(())
    }

    pub fn info(&self) -> LayoutInfo {
        LayoutInfo {
            version: self.version,
            hash: self.layout_hash(),
            field_count: self.len(),
            field_names: self.fields.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::machining()
    }
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub field_count: usize,
    pub field_names: Vec<String>,
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when a vector or model layout doesn't match the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Schema layout mismatch: expected v{} (hash: {:08x}), got v{} (hash: {:08x})",
            self.expected_version,
            self.expected_hash,
            self.actual_version,
            self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

// ============================================================================
// DISPLAY NAMES
// ============================================================================

/// Human readable title for a field: `Feed_rate` -> `Feed Rate`
///
/// Word starts are upper-cased and the rest lower-cased, so `Process_Time`
/// and `Drill_Bit_Type_H` read naturally in labels and chart titles.
pub fn display_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut prev_alpha = false;

    for ch in field.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }

    out
}

// ============================================================================
// TESTS
// ============================================================================
