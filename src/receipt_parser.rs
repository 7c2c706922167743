//! # Receipt Parser
//!
//! Turns raw receipt text (OCR output or a manual paste) into provisional
//! pantry items.
//!
//! ## Features
//!
//! - Skips totals, payment lines, dates, times, separators and other noise
//! - Recognizes priced item lines in £ and $, with optional leading quantity or item code
//! - Extracts weight and unit from weighed produce lines ("2.18 lbs @ $0.68/lb")
//! - Cleans names (quantity prefixes, parentheticals, UPC codes) and title-cases capitals
//! - Merges repeated items by summing their quantities
//!
//! Parsing never fails: lines that cannot be interpreted are dropped.
//!
//! ## Usage
//!
//! ```rust
//! use pantry_core::receipt_parser::parse_receipt_text;
//!
//! let items = parse_receipt_text("AUBERGINE   £0.95\n2 APPLES £2.50\nSUBTOTAL £3.45");
//!
//! assert_eq!(items.len(), 2);
//! assert_eq!(items[0].name, "Aubergine");
//! assert_eq!(items[1].quantity, "2");
//! ```

use crate::receipt_config::ReceiptConfig;
use crate::receipt_model::{ParsedReceiptItem, RawLineItem};
use crate::receipt_patterns::{is_noise_line, LINE_PATTERNS};
use crate::units::{classify_unit, normalize_unit, UnitKind};
use chrono::Utc;
use lazy_static::lazy_static;
use log::{debug, info, trace};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

lazy_static! {
    static ref QUANTITY_PREFIX_REGEX: Regex =
        Regex::new(r"^\d+\s*[xX]\s+").expect("Quantity prefix pattern should be valid");
    static ref PARENTHETICAL_REGEX: Regex =
        Regex::new(r"\s*\([^)]*\)").expect("Parenthetical pattern should be valid");
}

/// Receipt parser with configurable cleaning rules
pub struct ReceiptParser {
    config: ReceiptConfig,
    /// Matches UPC-like digit runs embedded in item names
    upc_pattern: Regex,
}

impl ReceiptParser {
    /// Create a parser with the default configuration
    pub fn new() -> Result<Self, regex::Error> {
        Self::with_config(ReceiptConfig::default())
    }

    /// Create a parser with custom configuration
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pantry_core::receipt_config::ReceiptConfig;
    /// use pantry_core::receipt_parser::ReceiptParser;
    ///
    /// let config = ReceiptConfig {
    ///     default_unit: "each".to_string(),
    ///     ..Default::default()
    /// };
    /// let parser = ReceiptParser::with_config(config)?;
    /// let items = parser.parse("WHOLE MILK $3.49");
    /// assert_eq!(items[0].unit, "each");
    /// # Ok::<(), regex::Error>(())
    /// ```
    pub fn with_config(config: ReceiptConfig) -> Result<Self, regex::Error> {
        let upc_pattern = Regex::new(&format!(r"\b\d{{{},}}\b", config.upc_min_digits))?;
        debug!(
            "Creating ReceiptParser: default_unit={}, min_line_length={}, min_name_length={}",
            config.default_unit, config.min_line_length, config.min_name_length
        );
        Ok(Self {
            config,
            upc_pattern,
        })
    }

    pub fn config(&self) -> &ReceiptConfig {
        &self.config
    }

    /// Parse receipt text into merged, provisional pantry items
    pub fn parse(&self, text: &str) -> Vec<ParsedReceiptItem> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let run_stamp = Utc::now().timestamp_millis();
        let mut items = Vec::new();

        for (index, line) in text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
        {
            if is_noise_line(line, &self.config) {
                trace!("Skipping receipt line {}: '{}'", index, line);
                continue;
            }

            match self.parse_line(line) {
                Some(mut item) => {
                    item.id = format!("receipt-{run_stamp}-{index}");
                    items.push(item);
                }
                None => trace!("No item pattern matched line {}: '{}'", index, line),
            }
        }

        let matched = items.len();
        let merged = merge_duplicates(items);
        info!(
            "Parsed {} receipt items ({} lines matched)",
            merged.len(),
            matched
        );
        merged
    }

    /// Parse a single, already trimmed line that passed the skip filter
    ///
    /// Patterns are tried in order; the first one whose extraction survives
    /// cleaning and validation wins. The returned item has an empty id.
    pub fn parse_line(&self, line: &str) -> Option<ParsedReceiptItem> {
        LINE_PATTERNS.iter().find_map(|pattern| {
            let raw = pattern.apply(line)?;
            let item = self.finish_item(raw)?;
            debug!("Line '{}' matched pattern '{}'", line, pattern.name);
            Some(item)
        })
    }

    /// Clean an extracted item name
    ///
    /// Removes a leading "N x " prefix, parenthetical asides and UPC codes,
    /// collapses whitespace, and title-cases names printed in capitals.
    pub fn clean_name(&self, raw_name: &str) -> String {
        let name = QUANTITY_PREFIX_REGEX.replace(raw_name.trim(), "");
        let name = PARENTHETICAL_REGEX.replace_all(&name, "");
        let name = self.upc_pattern.replace_all(&name, "");
        let name = name.split_whitespace().collect::<Vec<_>>().join(" ");

        if is_all_caps(&name) {
            title_case(&name)
        } else {
            name
        }
    }

    fn resolve_unit(&self, raw_unit: Option<&str>) -> String {
        let normalized = normalize_unit(raw_unit.unwrap_or_default());
        if classify_unit(&normalized) == UnitKind::Unknown {
            self.config.default_unit.clone()
        } else {
            normalized
        }
    }

    fn finish_item(&self, raw: RawLineItem) -> Option<ParsedReceiptItem> {
        let name = self.clean_name(&raw.name);
        if name.chars().count() < self.config.min_name_length || raw.quantity.is_empty() {
            trace!("Discarding candidate '{}' (quantity '{}')", raw.name, raw.quantity);
            return None;
        }

        Some(ParsedReceiptItem {
            id: String::new(),
            name,
            quantity: raw.quantity,
            unit: self.resolve_unit(raw.unit.as_deref()),
        })
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new().expect("Default receipt patterns should be valid")
    }
}

/// Parse receipt text with the default configuration
pub fn parse_receipt_text(text: &str) -> Vec<ParsedReceiptItem> {
    ReceiptParser::default().parse(text)
}

/// Read a receipt text file and parse it with the default configuration
pub fn parse_receipt_file(path: impl AsRef<Path>) -> std::io::Result<Vec<ParsedReceiptItem>> {
    let text = std::fs::read_to_string(path.as_ref())?;
    debug!("Read {} bytes of receipt text from {:?}", text.len(), path.as_ref());
    Ok(parse_receipt_text(&text))
}

/// Merge items sharing a lowercased name, keeping first-seen order
///
/// Quantities are summed by their integer parts, saturating at `i64::MAX`;
/// the first item's id, name and unit are kept.
pub fn merge_duplicates(items: Vec<ParsedReceiptItem>) -> Vec<ParsedReceiptItem> {
    let mut merged: Vec<ParsedReceiptItem> = Vec::with_capacity(items.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for item in items {
        let key = item.merge_key();
        match positions.get(&key).copied() {
            Some(position) => {
                let existing = &mut merged[position];
                let total = integer_part(&existing.quantity).saturating_add(integer_part(&item.quantity));
                debug!(
                    "Merging duplicate '{}': {} + {} -> {}",
                    existing.name, existing.quantity, item.quantity, total
                );
                existing.quantity = total.to_string();
            }
            None => {
                positions.insert(key, merged.len());
                merged.push(item);
            }
        }
    }

    merged
}

/// Leading integer of a quantity string ("2.18" -> 2), 0 when there is none
fn integer_part(quantity: &str) -> i64 {
    let quantity = quantity.trim();
    let (sign, digits) = match quantity.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, quantity.strip_prefix('+').unwrap_or(quantity)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

fn is_all_caps(name: &str) -> bool {
    name.chars().any(char::is_alphabetic) && name == name.to_uppercase()
}

fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
