//! # Conversion Error Types Module
//!
//! Hard failures raised by the domain-specific converters. The public
//! dispatcher in [`crate::conversion`] consumes these and falls back to the
//! unconverted quantity, so callers of `convert_units` never see them.

use crate::units::UnitKind;

/// A unit did not classify into the domain a converter requires
#[derive(Debug, Clone, PartialEq)]
pub struct IncompatibleUnitsError {
    /// Source unit as given by the caller
    pub from_unit: String,
    /// Target unit as given by the caller
    pub to_unit: String,
    /// The offending unit
    pub unit: String,
    /// Domain the offending unit should have belonged to
    pub expected: UnitKind,
}

impl IncompatibleUnitsError {
    pub fn new(from_unit: &str, to_unit: &str, unit: &str, expected: UnitKind) -> Self {
        Self {
            from_unit: from_unit.to_string(),
            to_unit: to_unit.to_string(),
            unit: unit.to_string(),
            expected,
        }
    }
}

impl std::fmt::Display for IncompatibleUnitsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Incompatible units: cannot convert '{}' to '{}' ('{}' is not a {} unit)",
            self.from_unit, self.to_unit, self.unit, self.expected
        )
    }
}

impl std::error::Error for IncompatibleUnitsError {}
