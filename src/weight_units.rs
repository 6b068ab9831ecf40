//! # Weight Units Module
//!
//! Converts free-text weight strings such as `"500mg"` or `"1,2kg"` to grams.
//!
//! Unit detection is substring containment checked in a fixed priority order,
//! so the longer tokens (`mg`, `kg`) must be tried before the bare `g`.

use log::debug;

use crate::errors::NutritionError;

/// A recognized weight unit with the factor that converts it to grams
struct WeightUnit {
    tokens: &'static [&'static str],
    grams_per_unit: f64,
}

/// Units in priority order. First contained token wins.
const WEIGHT_UNITS: &[WeightUnit] = &[
    WeightUnit { tokens: &["µg", "ug"], grams_per_unit: 1e-6 },
    WeightUnit { tokens: &["mg"], grams_per_unit: 1e-3 },
    WeightUnit { tokens: &["kg"], grams_per_unit: 1e3 },
    WeightUnit { tokens: &["g"], grams_per_unit: 1.0 },
    WeightUnit { tokens: &["t"], grams_per_unit: 1e6 },
];

/// Convert a weight string to grams
///
/// # Examples
///
/// ```rust
/// use fruit_nutrition::weight_units::convert_weight_to_grams;
///
/// assert_eq!(convert_weight_to_grams("1kg").unwrap(), 1000.0);
/// assert_eq!(convert_weight_to_grams("500mg").unwrap(), 0.5);
/// assert!(convert_weight_to_grams("100xg").is_err());
/// ```
///
/// # Errors
///
/// Returns `NutritionError::InvalidWeightFormat` when no unit is present or the
/// remaining text is not a number.
pub fn convert_weight_to_grams(weight: &str) -> Result<f64, NutritionError> {
    let normalized = weight.trim().to_lowercase();

    let unit = WEIGHT_UNITS
        .iter()
        .find(|unit| unit.tokens.iter().any(|token| normalized.contains(token)))
        .ok_or_else(|| {
            NutritionError::InvalidWeightFormat(format!(
                "unit not recognized in '{weight}', use µg, mg, g, kg or t"
            ))
        })?;

    let number = unit
        .tokens
        .iter()
        .fold(normalized.clone(), |acc, token| acc.replace(token, ""));
    let number = number.trim().replace(',', ".");

    let value: f64 = number.parse().map_err(|_| {
        NutritionError::InvalidWeightFormat(format!("'{number}' is not a number in '{weight}'"))
    })?;

    let grams = value * unit.grams_per_unit;
    debug!("Converted weight '{}' to {} g", weight, grams);
    Ok(grams)
}

/// Lenient numeric conversion that never fails
///
/// Strips `unit`, treats a comma as the decimal separator and returns `0.0`
/// when the remainder is not numeric.
pub fn safe_convert(value: &str, unit: &str) -> f64 {
    value
        .replace(unit, "")
        .trim()
        .replace(',', ".")
        .parse()
        .unwrap_or(0.0)
}
