//! # Fruit Catalog Module
//!
//! The ten fruit classes the classifier knows about, in model output order,
//! and the per-100g reference nutrition table used by the recommendation
//! engine.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Fruit names indexed by classifier output position
pub const FRUIT_CLASSES: [&str; 10] = [
    "Apel", "Pisang", "Alpukat", "Ceri", "Kiwi", "Mangga", "Jeruk", "Nanas", "Stroberi", "Semangka",
];

/// Calorie boundary separating low- and high-calorie fruits
pub const CALORIE_BOUNDARY: u32 = 60;

/// Nutrition facts per 100 grams
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FruitNutritionFacts {
    pub calories: u32,
    pub fat: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fiber: f64,
}

impl FruitNutritionFacts {
    const fn new(calories: u32, fat: f64, carbs: f64, protein: f64, fiber: f64) -> Self {
        Self { calories, fat, carbs, protein, fiber }
    }
}

/// Reference rows in class order
const REFERENCE_ROWS: [(&str, FruitNutritionFacts); 10] = [
    ("Apel", FruitNutritionFacts::new(52, 0.2, 14.0, 0.3, 2.4)),
    ("Pisang", FruitNutritionFacts::new(89, 0.3, 23.0, 1.1, 2.6)),
    ("Alpukat", FruitNutritionFacts::new(160, 15.0, 9.0, 2.0, 7.0)),
    ("Ceri", FruitNutritionFacts::new(63, 0.2, 16.0, 1.1, 2.1)),
    ("Kiwi", FruitNutritionFacts::new(61, 0.5, 15.0, 1.1, 3.0)),
    ("Mangga", FruitNutritionFacts::new(60, 0.4, 15.0, 0.8, 1.6)),
    ("Jeruk", FruitNutritionFacts::new(47, 0.1, 12.0, 0.9, 2.4)),
    ("Nanas", FruitNutritionFacts::new(50, 0.1, 13.0, 0.5, 1.4)),
    ("Stroberi", FruitNutritionFacts::new(32, 0.3, 8.0, 0.7, 2.0)),
    ("Semangka", FruitNutritionFacts::new(30, 0.2, 8.0, 0.6, 0.4)),
];

static REFERENCE_TABLE: LazyLock<HashMap<&'static str, FruitNutritionFacts>> =
    LazyLock::new(|| REFERENCE_ROWS.into_iter().collect());

/// Look up the reference facts for a fruit by its exact display name
pub fn nutrition_facts(fruit: &str) -> Option<&'static FruitNutritionFacts> {
    REFERENCE_TABLE.get(fruit)
}

/// Iterate over all reference fruits in class order
pub fn reference_fruits() -> impl Iterator<Item = (&'static str, &'static FruitNutritionFacts)> {
    FRUIT_CLASSES
        .iter()
        .filter_map(|name| REFERENCE_TABLE.get(name).map(|facts| (*name, facts)))
}

/// Map a classifier output index to a fruit name
pub fn fruit_name_for_index(index: usize) -> Option<&'static str> {
    FRUIT_CLASSES.get(index).copied()
}
