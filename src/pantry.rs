//! # Pantry Module
//!
//! In-process helpers used by the pantry workflows that sit on top of the
//! conversion engine: turning parsed receipt items into pantry records,
//! decrementing stock after a recipe is cooked, and checking whether stock
//! covers a recipe's requirement. Persistence happens elsewhere.

use crate::conversion::{compare_quantities, convert_units, format_quantity};
use crate::receipt_model::ParsedReceiptItem;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info, warn};

/// A pantry record as stored by the item API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItem {
    pub id: String,
    pub name: String,
    /// Stored as text, e.g. "2", "0.50"
    pub quantity: String,
    pub unit: String,
}

impl PantryItem {
    pub fn new(id: &str, name: &str, quantity: &str, unit: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            quantity: quantity.to_string(),
            unit: unit.to_string(),
        }
    }

    /// Numeric value of the stored quantity, if it parses
    pub fn amount(&self) -> Option<f64> {
        self.quantity.trim().parse::<f64>().ok().filter(|n| n.is_finite())
    }
}

impl From<ParsedReceiptItem> for PantryItem {
    fn from(item: ParsedReceiptItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            quantity: item.quantity,
            unit: item.unit,
        }
    }
}

/// Result of checking stock against a requirement
#[derive(Debug, Clone, PartialEq)]
pub enum StockStatus {
    /// Stock covers the requirement
    Sufficient,
    /// Stock falls short by `shortfall`, expressed in the pantry item's unit
    Insufficient { shortfall: f64 },
}

/// Subtract a used amount from a pantry item, returning the updated record
///
/// The used amount is converted into the item's unit with the item name as
/// the ingredient. Conversion is fail-soft, so units that cannot be related
/// subtract the raw amount. The result never goes below zero. A stored
/// quantity that is not numeric leaves the item unchanged.
pub fn deduct_usage(item: &PantryItem, used_quantity: f64, used_unit: &str) -> PantryItem {
    let Some(current) = item.amount() else {
        warn!(
            item = %item.name,
            quantity = %item.quantity,
            "Pantry quantity is not numeric, leaving stock unchanged"
        );
        return item.clone();
    };

    let used = convert_units(used_quantity, used_unit, &item.unit, &item.name);
    let remaining = (current - used).max(0.0);

    debug!(
        item = %item.name,
        used_quantity,
        used_unit,
        converted = used,
        remaining,
        "Deducted usage from pantry item"
    );

    PantryItem {
        quantity: format_quantity(remaining),
        ..item.clone()
    }
}

/// Check whether a pantry item covers a required amount
pub fn check_availability(
    item: &PantryItem,
    required_quantity: f64,
    required_unit: &str,
) -> StockStatus {
    let available = item.amount().unwrap_or(0.0);

    match compare_quantities(
        available,
        &item.unit,
        required_quantity,
        required_unit,
        &item.name,
    ) {
        Ordering::Less => {
            let required = convert_units(required_quantity, required_unit, &item.unit, &item.name);
            let shortfall = required - available;
            info!(
                item = %item.name,
                available,
                required,
                shortfall,
                "Insufficient pantry stock"
            );
            StockStatus::Insufficient { shortfall }
        }
        Ordering::Equal | Ordering::Greater => StockStatus::Sufficient,
    }
}
