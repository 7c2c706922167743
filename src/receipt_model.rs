//! # Receipt Types Module
//!
//! Types produced by the receipt parser.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A provisional pantry item extracted from one receipt line
///
/// Quantities are kept as strings because that is how the pantry stores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedReceiptItem {
    /// Unique within one parse run (e.g. "receipt-1718000000000-3")
    pub id: String,
    /// Cleaned item name, title-cased when the receipt printed it in capitals
    pub name: String,
    /// Numeric quantity as text (e.g. "2", "2.18")
    pub quantity: String,
    /// Canonical unit, "pieces" when none was recoverable
    pub unit: String,
}

impl ParsedReceiptItem {
    /// Key used to merge duplicate lines
    pub fn merge_key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Whether two items describe the same purchase, ignoring ids
    pub fn same_item(&self, other: &ParsedReceiptItem) -> bool {
        self.name == other.name && self.quantity == other.quantity && self.unit == other.unit
    }
}

impl fmt::Display for ParsedReceiptItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.quantity, self.unit, self.name)
    }
}

/// Intermediate (name, quantity, unit) triple taken from a matched line
#[derive(Debug, Clone, PartialEq)]
pub struct RawLineItem {
    pub name: String,
    pub quantity: String,
    pub unit: Option<String>,
}

impl RawLineItem {
    /// One piece of `name`, the default for price-only lines
    pub fn single(name: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity: "1".to_string(),
            unit: None,
        }
    }
}
