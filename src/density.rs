//! # Ingredient Density Module
//!
//! Grams-per-milliliter lookup used when a conversion crosses from volume to
//! weight or back. Lookups never fail: an unknown ingredient resolves to the
//! density of water.

use log::{debug, trace};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Density used when no table entry matches (water, g/ml)
pub const DEFAULT_DENSITY: f64 = 1.0;

/// Embedded density table, ingredient name -> g/ml
static DENSITY_JSON: &str = include_str!("data/densities.json");

static DENSITIES: LazyLock<HashMap<String, f64>> = LazyLock::new(|| {
    let table: HashMap<String, f64> =
        serde_json::from_str(DENSITY_JSON).expect("densities.json should be valid JSON");
    table
        .into_iter()
        .map(|(name, density)| (name.to_lowercase(), density))
        .collect()
});

/// Resolve the density of an ingredient in g/ml
///
/// Resolution order:
/// 1. exact match on the lowercased, trimmed name
/// 2. substring match in either direction; the longest key wins, ties go to
///    the alphabetically first key
/// 3. [`DEFAULT_DENSITY`]
///
/// # Examples
///
/// ```rust
/// use pantry_core::density::{density_for, DEFAULT_DENSITY};
///
/// assert_eq!(density_for("Sugar"), 0.845);
/// assert_eq!(density_for("brown sugar"), 0.845);
/// assert_eq!(density_for("unobtainium"), DEFAULT_DENSITY);
/// ```
pub fn density_for(ingredient: &str) -> f64 {
    let name = ingredient.trim().to_lowercase();
    if name.is_empty() {
        return DEFAULT_DENSITY;
    }

    if let Some(density) = DENSITIES.get(&name) {
        trace!("Exact density match for '{}': {}", name, density);
        return *density;
    }

    let best = DENSITIES
        .iter()
        .filter(|(key, _)| name.contains(key.as_str()) || key.contains(name.as_str()))
        .min_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    match best {
        Some((key, density)) => {
            debug!("Density for '{}' resolved via '{}': {}", name, key, density);
            *density
        }
        None => {
            debug!(
                "No density entry for '{}', using default {}",
                name, DEFAULT_DENSITY
            );
            DEFAULT_DENSITY
        }
    }
}
