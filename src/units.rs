//! # Units Module
//!
//! Unit vocabulary shared by the conversion engine and the receipt parser.
//!
//! ## Features
//!
//! - Canonicalization of unit spellings (plurals, abbreviations, punctuation variants)
//! - Case-sensitive handling of the single-letter cooking abbreviations `T` and `t`
//! - Classification into volume and weight domains
//! - Linear conversion factors into each domain's base unit (ml, g)

use log::trace;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Volume units and their factor relative to one milliliter
pub const VOLUME_UNITS: &[(&str, f64)] = &[
    ("ml", 1.0),
    ("l", 1000.0),
    ("cup", 236.588),
    ("tbsp", 14.7868),
    ("tsp", 4.92892),
    ("fl oz", 29.5735),
    ("pint", 473.176),
    ("quart", 946.353),
    ("gallon", 3785.41),
];

/// Weight units and their factor relative to one gram
pub const WEIGHT_UNITS: &[(&str, f64)] = &[
    ("g", 1.0),
    ("kg", 1000.0),
    ("oz", 28.3495),
    ("lb", 453.592),
];

/// Canonical form used for countable items
pub const PIECES: &str = "pieces";

/// Spelling variants and their canonical unit
static UNIT_ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Volume units
    for alias in ["ml", "mls", "milliliter", "milliliters", "millilitre", "millilitres"] {
        map.insert(alias, "ml");
    }
    for alias in ["l", "ltr", "liter", "liters", "litre", "litres"] {
        map.insert(alias, "l");
    }
    for alias in ["cup", "cups", "c"] {
        map.insert(alias, "cup");
    }
    for alias in [
        "tbsp", "tbsp.", "tbsps", "tbs", "tbl", "tablespoon", "tablespoons",
    ] {
        map.insert(alias, "tbsp");
    }
    for alias in ["tsp", "tsp.", "tsps", "teaspoon", "teaspoons"] {
        map.insert(alias, "tsp");
    }
    for alias in [
        "fl oz",
        "fl. oz",
        "fl. oz.",
        "fl.oz",
        "fl.oz.",
        "floz",
        "fluid ounce",
        "fluid ounces",
    ] {
        map.insert(alias, "fl oz");
    }
    for alias in ["pint", "pints", "pt", "pts"] {
        map.insert(alias, "pint");
    }
    for alias in ["quart", "quarts", "qt", "qts"] {
        map.insert(alias, "quart");
    }
    for alias in ["gallon", "gallons", "gal", "gals"] {
        map.insert(alias, "gallon");
    }

    // Weight units
    for alias in ["g", "gr", "gram", "grams", "gramme", "grammes"] {
        map.insert(alias, "g");
    }
    for alias in ["kg", "kgs", "kilo", "kilos", "kilogram", "kilograms"] {
        map.insert(alias, "kg");
    }
    for alias in ["oz", "oz.", "ounce", "ounces"] {
        map.insert(alias, "oz");
    }
    for alias in ["lb", "lb.", "lbs", "lbs.", "pound", "pounds"] {
        map.insert(alias, "lb");
    }

    // Count units
    for alias in ["piece", "pieces", "pc", "pcs", "item", "items", "ea", "each"] {
        map.insert(alias, PIECES);
    }

    map
});

/// Measurement domain a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// Capacity units, based on milliliters
    Volume,
    /// Mass units, based on grams
    Weight,
    /// Anything the tables do not recognize
    Unknown,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Volume => write!(f, "volume"),
            UnitKind::Weight => write!(f, "weight"),
            UnitKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Normalize a unit spelling to its canonical form
///
/// Returns an empty string for blank input and the lowercased input when the
/// spelling is not in the alias table. `T` (tablespoon) and `t` (teaspoon)
/// are matched before lowercasing.
///
/// # Examples
///
/// ```rust
/// use pantry_core::units::normalize_unit;
///
/// assert_eq!(normalize_unit("Tablespoons"), "tbsp");
/// assert_eq!(normalize_unit("T"), "tbsp");
/// assert_eq!(normalize_unit("t"), "tsp");
/// assert_eq!(normalize_unit(" fl. oz "), "fl oz");
/// assert_eq!(normalize_unit("Handful"), "handful");
/// ```
pub fn normalize_unit(unit: &str) -> String {
    let unit = unit.trim();
    if unit.is_empty() {
        return String::new();
    }

    match unit {
        "T" => return "tbsp".to_string(),
        "t" => return "tsp".to_string(),
        _ => {}
    }

    let lower = unit.to_lowercase();
    match UNIT_ALIASES.get(lower.as_str()) {
        Some(canonical) => {
            trace!("Normalized unit '{}' -> '{}'", unit, canonical);
            canonical.to_string()
        }
        None => lower,
    }
}

/// Classify a unit into its measurement domain
pub fn classify_unit(unit: &str) -> UnitKind {
    let normalized = normalize_unit(unit);
    if lookup(VOLUME_UNITS, &normalized).is_some() {
        UnitKind::Volume
    } else if lookup(WEIGHT_UNITS, &normalized).is_some() {
        UnitKind::Weight
    } else {
        UnitKind::Unknown
    }
}

/// Whether two units can be converted into each other without a density
pub fn are_units_compatible(unit_a: &str, unit_b: &str) -> bool {
    let kind = classify_unit(unit_a);
    kind != UnitKind::Unknown && kind == classify_unit(unit_b)
}

/// Factor from `unit` to its domain base unit (ml or g)
pub fn unit_factor(unit: &str) -> Option<f64> {
    let normalized = normalize_unit(unit);
    lookup(VOLUME_UNITS, &normalized).or_else(|| lookup(WEIGHT_UNITS, &normalized))
}

pub(crate) fn volume_factor(unit: &str) -> Option<f64> {
    lookup(VOLUME_UNITS, &normalize_unit(unit))
}

pub(crate) fn weight_factor(unit: &str) -> Option<f64> {
    lookup(WEIGHT_UNITS, &normalize_unit(unit))
}

fn lookup(table: &[(&str, f64)], canonical: &str) -> Option<f64> {
    table
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, factor)| *factor)
}
