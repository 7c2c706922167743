//! # Conversion Module
//!
//! Converts cooking quantities between volume units, between weight units,
//! and across the two domains through an ingredient density.
//!
//! Two tiers of failure handling:
//!
//! - The domain converters ([`convert_volume`], [`convert_weight`],
//!   [`convert_volume_to_weight`], [`convert_weight_to_volume`]) return
//!   `Result` and fail with [`IncompatibleUnitsError`].
//! - [`convert_units`] and [`compare_quantities`] are total: they log a
//!   warning and fall back to the unconverted quantity (or `Equal`).
//!
//! ## Usage
//!
//! ```rust
//! use pantry_core::conversion::{convert_units, format_quantity};
//!
//! let ml = convert_units(2.0, "cups", "ml", "");
//! assert_eq!(format_quantity(ml), "473");
//!
//! // Unknown units are a no-op rather than an error
//! assert_eq!(convert_units(5.0, "handful", "cup", ""), 5.0);
//! ```

use crate::conversion_errors::IncompatibleUnitsError;
use crate::density::density_for;
use crate::units::{classify_unit, normalize_unit, volume_factor, weight_factor, UnitKind};
use log::{debug, warn};
use std::cmp::Ordering;
use std::fmt;

/// An amount expressed in a unit
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
}

impl Quantity {
    /// Create a quantity, canonicalizing the unit spelling
    pub fn new(value: f64, unit: &str) -> Self {
        Self {
            value,
            unit: normalize_unit(unit),
        }
    }

    /// Which domain this quantity's unit belongs to
    pub fn kind(&self) -> UnitKind {
        classify_unit(&self.unit)
    }

    /// Express this quantity in another unit
    ///
    /// Unlike [`convert_units`] this does not fall back: the returned
    /// quantity is always expressed in `unit`.
    pub fn convert_to(
        &self,
        unit: &str,
        ingredient: &str,
    ) -> Result<Quantity, IncompatibleUnitsError> {
        let value = try_convert_units(self.value, &self.unit, unit, ingredient)?;
        Ok(Quantity::new(value, unit))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", format_quantity(self.value), self.unit)
    }
}

/// Convert between two volume units
pub fn convert_volume(
    quantity: f64,
    from_unit: &str,
    to_unit: &str,
) -> Result<f64, IncompatibleUnitsError> {
    let from = volume_factor(from_unit).ok_or_else(|| {
        IncompatibleUnitsError::new(from_unit, to_unit, from_unit, UnitKind::Volume)
    })?;
    let to = volume_factor(to_unit).ok_or_else(|| {
        IncompatibleUnitsError::new(from_unit, to_unit, to_unit, UnitKind::Volume)
    })?;
    Ok(quantity * from / to)
}

/// Convert between two weight units
pub fn convert_weight(
    quantity: f64,
    from_unit: &str,
    to_unit: &str,
) -> Result<f64, IncompatibleUnitsError> {
    let from = weight_factor(from_unit).ok_or_else(|| {
        IncompatibleUnitsError::new(from_unit, to_unit, from_unit, UnitKind::Weight)
    })?;
    let to = weight_factor(to_unit).ok_or_else(|| {
        IncompatibleUnitsError::new(from_unit, to_unit, to_unit, UnitKind::Weight)
    })?;
    Ok(quantity * from / to)
}

/// Convert a volume into a weight using the ingredient's density
///
/// # Examples
///
/// ```rust
/// use pantry_core::conversion::convert_volume_to_weight;
///
/// let grams = convert_volume_to_weight(1.0, "cup", "g", "brown sugar")?;
/// assert!((grams - 199.917).abs() < 0.01);
/// # Ok::<(), pantry_core::conversion_errors::IncompatibleUnitsError>(())
/// ```
pub fn convert_volume_to_weight(
    quantity: f64,
    volume_unit: &str,
    weight_unit: &str,
    ingredient: &str,
) -> Result<f64, IncompatibleUnitsError> {
    let volume = volume_factor(volume_unit).ok_or_else(|| {
        IncompatibleUnitsError::new(volume_unit, weight_unit, volume_unit, UnitKind::Volume)
    })?;
    let weight = weight_factor(weight_unit).ok_or_else(|| {
        IncompatibleUnitsError::new(volume_unit, weight_unit, weight_unit, UnitKind::Weight)
    })?;

    let milliliters = quantity * volume;
    let grams = milliliters * density_for(ingredient);
    Ok(grams / weight)
}

/// Convert a weight into a volume using the ingredient's density
pub fn convert_weight_to_volume(
    quantity: f64,
    weight_unit: &str,
    volume_unit: &str,
    ingredient: &str,
) -> Result<f64, IncompatibleUnitsError> {
    let weight = weight_factor(weight_unit).ok_or_else(|| {
        IncompatibleUnitsError::new(weight_unit, volume_unit, weight_unit, UnitKind::Weight)
    })?;
    let volume = volume_factor(volume_unit).ok_or_else(|| {
        IncompatibleUnitsError::new(weight_unit, volume_unit, volume_unit, UnitKind::Volume)
    })?;

    let grams = quantity * weight;
    let milliliters = grams / density_for(ingredient);
    Ok(milliliters / volume)
}

/// Dispatch a conversion by the domains of the two units
///
/// Returns `quantity` unchanged when it is zero or NaN, when either unit is
/// blank, or when both units normalize to the same canonical form. Fails
/// when either unit is outside the volume and weight domains.
pub fn try_convert_units(
    quantity: f64,
    from_unit: &str,
    to_unit: &str,
    ingredient: &str,
) -> Result<f64, IncompatibleUnitsError> {
    if quantity == 0.0 || quantity.is_nan() || from_unit.trim().is_empty() || to_unit.trim().is_empty()
    {
        return Ok(quantity);
    }

    let from = normalize_unit(from_unit);
    let to = normalize_unit(to_unit);
    if from == to {
        return Ok(quantity);
    }

    match (classify_unit(&from), classify_unit(&to)) {
        (UnitKind::Volume, UnitKind::Volume) => convert_volume(quantity, &from, &to),
        (UnitKind::Weight, UnitKind::Weight) => convert_weight(quantity, &from, &to),
        (UnitKind::Volume, UnitKind::Weight) => {
            convert_volume_to_weight(quantity, &from, &to, ingredient)
        }
        (UnitKind::Weight, UnitKind::Volume) => {
            convert_weight_to_volume(quantity, &from, &to, ingredient)
        }
        (UnitKind::Unknown, UnitKind::Unknown) => Err(IncompatibleUnitsError::new(
            from_unit,
            to_unit,
            from_unit,
            UnitKind::Volume,
        )),
        (UnitKind::Unknown, to_kind) => Err(IncompatibleUnitsError::new(
            from_unit, to_unit, from_unit, to_kind,
        )),
        (from_kind, UnitKind::Unknown) => Err(IncompatibleUnitsError::new(
            from_unit, to_unit, to_unit, from_kind,
        )),
    }
}

/// Convert a quantity, falling back to the input on failure
///
/// This never fails. When the units cannot be converted (for example one of
/// them is unrecognized) a warning is logged and `quantity` is returned
/// unchanged.
///
/// # Examples
///
/// ```rust
/// use pantry_core::conversion::convert_units;
///
/// assert_eq!(convert_units(3.0, "tsp", "tbsp", ""), 3.0 * 4.92892 / 14.7868);
/// assert_eq!(convert_units(5.0, "invalidUnit", "cup", ""), 5.0);
/// ```
pub fn convert_units(quantity: f64, from_unit: &str, to_unit: &str, ingredient: &str) -> f64 {
    match try_convert_units(quantity, from_unit, to_unit, ingredient) {
        Ok(converted) => {
            debug!(
                "Converted {} {} -> {} {} (ingredient '{}')",
                quantity, from_unit, converted, to_unit, ingredient
            );
            converted
        }
        Err(err) => {
            warn!(
                "Unit conversion failed, keeping original quantity {} (ingredient '{}'): {}",
                quantity, ingredient, err
            );
            quantity
        }
    }
}

/// Compare two quantities after expressing the second in the first's unit
///
/// Values that cannot be ordered (NaN) compare as `Equal`.
pub fn compare_quantities(
    quantity1: f64,
    unit1: &str,
    quantity2: f64,
    unit2: &str,
    ingredient: &str,
) -> Ordering {
    let converted = convert_units(quantity2, unit2, unit1, ingredient);
    match quantity1.partial_cmp(&converted) {
        Some(ordering) => ordering,
        None => {
            warn!(
                "Cannot compare {} {} with {} {} (ingredient '{}'), treating as equal",
                quantity1, unit1, quantity2, unit2, ingredient
            );
            Ordering::Equal
        }
    }
}

/// Format a quantity for display with precision tiered by magnitude
///
/// | value      | decimals |
/// |------------|----------|
/// | 0          | "0"      |
/// | < 0.01     | 4        |
/// | < 0.1      | 3        |
/// | < 1        | 2        |
/// | < 10       | 1        |
/// | otherwise  | rounded  |
pub fn format_quantity(quantity: f64) -> String {
    if quantity == 0.0 {
        "0".to_string()
    } else if quantity < 0.01 {
        fixed(quantity, 4)
    } else if quantity < 0.1 {
        fixed(quantity, 3)
    } else if quantity < 1.0 {
        fixed(quantity, 2)
    } else if quantity < 10.0 {
        fixed(quantity, 1)
    } else {
        format!("{:.0}", quantity.round())
    }
}

/// Fixed-point text with ties rounded away from zero (0.125 -> "0.13")
fn fixed(quantity: f64, decimals: i32) -> String {
    let scale = 10f64.powi(decimals);
    let rounded = (quantity * scale).round() / scale;
    format!("{:.*}", decimals as usize, rounded)
}
