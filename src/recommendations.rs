//! # Recommendation Engine
//!
//! Rule-based fruit combinations for two dietary goals, annotated with a note
//! about how well the detected fruit fits the goal.
//!
//! The engine is pure: its output depends only on the detected fruit, the goal
//! and the static reference table.
//!
//! ## Usage
//!
//! ```rust
//! use fruit_nutrition::recommendations::{recommend, Goal};
//!
//! let rec = recommend("Apel", Goal::LoseWeight);
//! assert_eq!(rec.combinations[0].average_calories, 36);
//! assert!(rec.detected_fruit_note.is_some());
//! ```

use serde::Serialize;

use crate::fruit_catalog::{nutrition_facts, reference_fruits, CALORIE_BOUNDARY};

/// Dietary goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    GainWeight,
}

/// A fixed combination of three fruits
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FruitCombination {
    pub name: String,
    pub fruits: [&'static str; 3],
    pub benefits: String,
    /// Floor of the mean calories of the three fruits
    pub average_calories: u32,
}

/// Recommendation set for one goal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub goal: Goal,
    pub title: String,
    pub description: String,
    pub combinations: Vec<FruitCombination>,
    pub detected_fruit_note: Option<String>,
}

struct CombinationTemplate {
    name: &'static str,
    fruits: [&'static str; 3],
    benefits: &'static str,
}

struct GoalTemplate {
    title: &'static str,
    description: &'static str,
    combinations: [CombinationTemplate; 3],
}

static LOSE_WEIGHT: GoalTemplate = GoalTemplate {
    title: "🍃 Rekomendasi untuk Menurunkan Berat Badan",
    description: "Kombinasi buah rendah kalori dan tinggi serat untuk membantu diet",
    combinations: [
        CombinationTemplate {
            name: "Kombinasi Ultra Low-Cal",
            fruits: ["Semangka", "Stroberi", "Jeruk"],
            benefits: "Sangat rendah kalori (30-47 kal/100g), tinggi air, membantu hidrasi",
        },
        CombinationTemplate {
            name: "Kombinasi Serat Tinggi",
            fruits: ["Apel", "Kiwi", "Stroberi"],
            benefits: "Tinggi serat, memberikan rasa kenyang lebih lama",
        },
        CombinationTemplate {
            name: "Kombinasi Vitamin C",
            fruits: ["Jeruk", "Kiwi", "Stroberi"],
            benefits: "Kaya vitamin C, meningkatkan metabolisme, rendah kalori",
        },
    ],
};

static GAIN_WEIGHT: GoalTemplate = GoalTemplate {
    title: "💪 Rekomendasi untuk Menambah Berat Badan",
    description: "Kombinasi buah tinggi kalori dan nutrisi untuk menambah massa tubuh sehat",
    combinations: [
        CombinationTemplate {
            name: "Kombinasi High-Energy",
            fruits: ["Alpukat", "Pisang", "Mangga"],
            benefits: "Tinggi kalori dan lemak sehat, karbohidrat kompleks",
        },
        CombinationTemplate {
            name: "Kombinasi Protein & Kalori",
            fruits: ["Alpukat", "Pisang", "Ceri"],
            benefits: "Kombinasi protein, lemak sehat, dan karbohidrat",
        },
        CombinationTemplate {
            name: "Kombinasi Natural Sugar",
            fruits: ["Pisang", "Mangga", "Ceri"],
            benefits: "Gula alami untuk energi cepat, mendukung penambahan berat badan",
        },
    ],
};

impl Goal {
    /// Both goals in display order
    pub const ALL: [Goal; 2] = [Goal::LoseWeight, Goal::GainWeight];

    fn template(self) -> &'static GoalTemplate {
        match self {
            Goal::LoseWeight => &LOSE_WEIGHT,
            Goal::GainWeight => &GAIN_WEIGHT,
        }
    }
}

/// Build the recommendation set for `goal`
pub fn recommend(detected_fruit: &str, goal: Goal) -> Recommendation {
    let template = goal.template();

    let combinations = template
        .combinations
        .iter()
        .map(|combo| FruitCombination {
            name: combo.name.to_string(),
            fruits: combo.fruits,
            benefits: combo.benefits.to_string(),
            average_calories: average_calories(&combo.fruits),
        })
        .collect();

    Recommendation {
        goal,
        title: template.title.to_string(),
        description: template.description.to_string(),
        combinations,
        detected_fruit_note: detected_fruit_note(detected_fruit, goal),
    }
}

/// Integer floor of the mean calories of three reference fruits
fn average_calories(fruits: &[&str; 3]) -> u32 {
    let total: u32 = fruits
        .iter()
        .filter_map(|fruit| nutrition_facts(fruit))
        .map(|facts| facts.calories)
        .sum();
    total / 3
}

/// Contextual note about the detected fruit, `None` for fruits outside the table
pub fn detected_fruit_note(fruit: &str, goal: Goal) -> Option<String> {
    let calories = nutrition_facts(fruit)?.calories;

    let note = match goal {
        Goal::LoseWeight if calories <= CALORIE_BOUNDARY => {
            format!("✅ {fruit} sangat cocok untuk diet Anda (hanya {calories} kalori/100g)")
        }
        Goal::GainWeight if calories >= CALORIE_BOUNDARY => {
            format!("✅ {fruit} bagus untuk menambah berat badan ({calories} kalori/100g)")
        }
        Goal::LoseWeight => format!(
            "⚠️ {fruit} cukup tinggi kalori ({calories} kal/100g), konsumsi dalam porsi kecil"
        ),
        Goal::GainWeight => format!(
            "ℹ️ {fruit} rendah kalori ({calories} kal/100g), tambahkan buah tinggi kalori lainnya"
        ),
    };
    Some(note)
}

/// Reference fruits suited to `goal`, ordered by calories
///
/// Low-calorie fruits (at most 60 kcal) ascending for weight loss, high-calorie
/// fruits (at least 60 kcal) descending for weight gain. Ties keep class order.
pub fn goal_candidates(goal: Goal) -> Vec<(&'static str, u32)> {
    let mut candidates: Vec<(&'static str, u32)> = reference_fruits()
        .map(|(name, facts)| (name, facts.calories))
        .filter(|(_, calories)| match goal {
            Goal::LoseWeight => *calories <= CALORIE_BOUNDARY,
            Goal::GainWeight => *calories >= CALORIE_BOUNDARY,
        })
        .collect();

    match goal {
        Goal::LoseWeight => candidates.sort_by_key(|(_, calories)| *calories),
        Goal::GainWeight => candidates.sort_by(|a, b| b.1.cmp(&a.1)),
    }
    candidates
}
