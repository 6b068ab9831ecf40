//! # Report Rendering Module
//!
//! Turns a `FruitReport` into plain Indonesian text for the terminal. Rendering
//! only formats what the analyzer produced; it makes no decisions of its own.

use std::fmt::Write;

use crate::analyzer::FruitReport;
use crate::classifier::ClassificationOutcome;
use crate::errors::NutritionError;
use crate::fruit_catalog::{nutrition_facts, FRUIT_CLASSES};
use crate::localization::LocalizationManager;
use crate::recommendations::{goal_candidates, Goal, Recommendation};

/// Reference sources listed under the recommendations
pub const REFERENCE_SOURCES: [(&str, &str); 4] = [
    ("WHO - Diet Sehat", "https://www.who.int/news-room/fact-sheets/detail/healthy-diet"),
    ("Kementerian Kesehatan RI - P2PTM", "https://www.p2ptm.kemkes.go.id/"),
    ("Nutrition.gov - Panduan Nutrisi", "https://www.nutrition.gov/"),
    ("FatSecret Indonesia - Data Nutrisi", "https://www.fatsecret.co.id/"),
];

const PHOTO_TIPS: [&str; 4] = [
    "photo-tip-lighting",
    "photo-tip-single",
    "photo-tip-focus",
    "photo-tip-background",
];

fn percent(confidence: f32) -> String {
    format!("{:.1}", confidence * 100.0)
}

/// Render a full report
pub fn render(report: &FruitReport, l10n: &LocalizationManager) -> String {
    let Some(fruit) = report.classification.fruit_name.as_deref() else {
        return render_unrecognized(report, l10n);
    };

    let mut out = String::new();
    let portion = report
        .serving_label
        .clone()
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| l10n.get_message("default-portion", None));

    let _ = writeln!(out, "{}", l10n.get_message("prediction-title", None));
    let _ = writeln!(
        out,
        "{}",
        l10n.get_message_with_args(
            "prediction-result",
            &[("fruit", fruit), ("portion", portion.as_str())]
        )
    );
    let _ = writeln!(
        out,
        "{}\n",
        l10n.get_message_with_args(
            "prediction-confidence",
            &[("confidence", percent(report.classification.confidence).as_str())]
        )
    );

    let _ = writeln!(out, "{}", l10n.get_message("nutrition-title", None));
    match &report.nutrition {
        Some(nutrition) if !nutrition.is_empty() => {
            for (nutrient, value) in nutrition.iter() {
                let _ = writeln!(out, "  {}: {}", nutrient.label(), value);
            }
        }
        _ => {
            let _ = writeln!(out, "{}", l10n.get_message("nutrition-unavailable", None));
            let _ = writeln!(out, "{}", l10n.get_message("nutrition-unavailable-detail", None));
        }
    }

    if !report.portions.is_empty() {
        let _ = writeln!(out, "\n{}", l10n.get_message("portions-title", None));
        for portion in &report.portions {
            let _ = writeln!(out, "  • {}", portion.description);
        }
    }

    for recommendation in &report.recommendations {
        out.push('\n');
        out.push_str(&render_recommendation(recommendation, l10n));
    }

    let _ = writeln!(out, "\n{}", l10n.get_message("sources-title", None));
    for (name, url) in REFERENCE_SOURCES {
        let _ = writeln!(out, "  • {name}: {url}");
    }

    out
}

/// Render one goal's recommendation section
pub fn render_recommendation(recommendation: &Recommendation, l10n: &LocalizationManager) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", recommendation.title);
    let _ = writeln!(out, "{}", recommendation.description);
    if let Some(note) = &recommendation.detected_fruit_note {
        let _ = writeln!(out, "{note}");
    }

    let candidates = goal_candidates(recommendation.goal)
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(
        out,
        "{}",
        l10n.get_message_with_args("recommendation-candidates", &[("fruits", candidates.as_str())])
    );

    for combo in &recommendation.combinations {
        let _ = writeln!(
            out,
            "\n  {}",
            l10n.get_message_with_args(
                "recommendation-combination",
                &[
                    ("name", combo.name.as_str()),
                    ("calories", combo.average_calories.to_string().as_str())
                ]
            )
        );
        let _ = writeln!(
            out,
            "    {}",
            l10n.get_message_with_args(
                "recommendation-fruits",
                &[("fruits", combo.fruits.join(", ").as_str())]
            )
        );
        let _ = writeln!(
            out,
            "    {}",
            l10n.get_message_with_args(
                "recommendation-benefits",
                &[("benefits", combo.benefits.as_str())]
            )
        );

        for fruit in combo.fruits {
            let Some(facts) = nutrition_facts(fruit) else {
                continue;
            };
            let detail = match recommendation.goal {
                Goal::LoseWeight => l10n.get_message_with_args(
                    "detail-fiber",
                    &[("grams", facts.fiber.to_string().as_str())],
                ),
                Goal::GainWeight => l10n.get_message_with_args(
                    "detail-protein",
                    &[("grams", facts.protein.to_string().as_str())],
                ),
            };
            let _ = writeln!(
                out,
                "      - {}",
                l10n.get_message_with_args(
                    "recommendation-fruit-detail",
                    &[
                        ("fruit", fruit),
                        ("calories", facts.calories.to_string().as_str()),
                        ("detail", detail.as_str())
                    ]
                )
            );
        }
    }

    out
}

/// Guidance shown when no fruit was recognized
pub fn render_unrecognized(report: &FruitReport, l10n: &LocalizationManager) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", l10n.get_message("unrecognized-title", None));

    if report.classification.outcome == ClassificationOutcome::BelowThreshold {
        let _ = writeln!(
            out,
            "{}",
            l10n.get_message_with_args(
                "unrecognized-confidence",
                &[("confidence", percent(report.classification.confidence).as_str())]
            )
        );
    }

    let _ = writeln!(
        out,
        "{}",
        l10n.get_message_with_args(
            "supported-fruits",
            &[("fruits", FRUIT_CLASSES.join(", ").as_str())]
        )
    );
    let _ = writeln!(out, "{}", l10n.get_message("photo-tips-title", None));
    for tip in PHOTO_TIPS {
        let _ = writeln!(out, "  • {}", l10n.get_message(tip, None));
    }

    out
}

/// Explicit message for a failed nutrition fetch
pub fn render_fetch_error(error: &NutritionError, l10n: &LocalizationManager) -> String {
    let error = error.to_string();
    l10n.get_message_with_args("nutrition-network-error", &[("error", error.as_str())])
}
