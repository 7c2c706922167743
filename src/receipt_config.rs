//! # Receipt Configuration Module
//!
//! Tunables for receipt parsing. Defaults match common supermarket receipts.

use crate::units::PIECES;

// Constants for receipt parsing
pub const DEFAULT_UNIT: &str = PIECES;
pub const MIN_LINE_LENGTH: usize = 3;
pub const MIN_NAME_LENGTH: usize = 2;
pub const UPC_MIN_DIGITS: usize = 10;

/// Configuration structure for receipt parsing
#[derive(Debug, Clone)]
pub struct ReceiptConfig {
    /// Unit assigned when a line carries no recognizable unit
    pub default_unit: String,
    /// Lines shorter than this (in characters, after trimming) are skipped
    pub min_line_length: usize,
    /// Cleaned names shorter than this are discarded
    pub min_name_length: usize,
    /// Digit runs at least this long are treated as UPC codes and removed from names
    pub upc_min_digits: usize,
    /// Additional skip keywords, matched case-insensitively as substrings
    pub extra_skip_keywords: Vec<String>,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            default_unit: DEFAULT_UNIT.to_string(),
            min_line_length: MIN_LINE_LENGTH,
            min_name_length: MIN_NAME_LENGTH,
            upc_min_digits: UPC_MIN_DIGITS,
            extra_skip_keywords: Vec::new(),
        }
    }
}
