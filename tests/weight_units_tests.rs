//! # Weight Unit Tests
//!
//! Tests for weight string normalization and the lenient numeric converter.

#[cfg(test)]
mod tests {
    use fruit_nutrition::errors::NutritionError;
    use fruit_nutrition::weight_units::{convert_weight_to_grams, safe_convert};

    /// Test each supported unit converts with its fixed factor
    #[test]
    fn test_unit_factors() {
        assert_eq!(convert_weight_to_grams("1kg").unwrap(), 1000.0);
        assert_eq!(convert_weight_to_grams("500mg").unwrap(), 0.5);
        assert_eq!(convert_weight_to_grams("2t").unwrap(), 2_000_000.0);
        assert_eq!(convert_weight_to_grams("100g").unwrap(), 100.0);
        assert_eq!(convert_weight_to_grams("1.2kg").unwrap(), 1200.0);
    }

    /// Test comma decimal separators are accepted
    #[test]
    fn test_comma_decimal_separator() {
        assert_eq!(convert_weight_to_grams("2,5g").unwrap(), 2.5);
        assert_eq!(convert_weight_to_grams("1,5kg").unwrap(), 1500.0);
    }

    /// Test the longer tokens are checked before the bare gram token
    #[test]
    fn test_priority_order() {
        // "mg" and "kg" both contain "g"
        assert_eq!(convert_weight_to_grams("250mg").unwrap(), 0.25);
        assert_eq!(convert_weight_to_grams("3kg").unwrap(), 3000.0);
    }

    /// Test unparsable numbers are rejected
    #[test]
    fn test_invalid_number() {
        let result = convert_weight_to_grams("100xg");
        assert!(matches!(result, Err(NutritionError::InvalidWeightFormat(_))));

        let result = convert_weight_to_grams("abcg");
        assert!(matches!(result, Err(NutritionError::InvalidWeightFormat(_))));
    }

    /// Test strings without any unit are rejected
    #[test]
    fn test_missing_unit() {
        let result = convert_weight_to_grams("100");
        assert!(matches!(result, Err(NutritionError::InvalidWeightFormat(_))));

        let result = convert_weight_to_grams("");
        assert!(matches!(result, Err(NutritionError::InvalidWeightFormat(_))));
    }

    /// Test the lenient converter
    #[test]
    fn test_safe_convert() {
        assert_eq!(safe_convert("12,5", "g"), 12.5);
        assert_eq!(safe_convert("12,5 g", "g"), 12.5);
        assert_eq!(safe_convert("52 kcal", "kcal"), 52.0);
        assert_eq!(safe_convert("abc", "g"), 0.0);
        assert_eq!(safe_convert("", "g"), 0.0);
    }
}
