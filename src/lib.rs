//! # Pantry Core
//!
//! Unit conversion and receipt parsing for a household pantry: normalizes
//! cooking-measurement vocabulary, converts quantities across volume and
//! weight (through ingredient densities), and extracts item records from
//! noisy receipt text.

pub mod conversion;
pub mod conversion_errors;
pub mod density;
pub mod pantry;
pub mod receipt_config;
pub mod receipt_model;
pub mod receipt_parser;
pub mod receipt_patterns;
pub mod units;
