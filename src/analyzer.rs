//! # Analyzer Module
//!
//! Runs one user interaction end to end: classify the photo, fetch nutrition
//! and portions for the recognized fruit, and derive both recommendation sets.

use log::info;
use serde::Serialize;

use crate::classifier::{ClassificationResult, FruitClassifier, FruitModel};
use crate::errors::NutritionError;
use crate::nutrition_scraper::{NutritionRecord, NutritionScraper};
use crate::portion_links::PortionOption;
use crate::recommendations::{recommend, Goal, Recommendation};

/// Everything the presentation layer needs for one interaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FruitReport {
    pub classification: ClassificationResult,
    pub nutrition: Option<NutritionRecord>,
    pub serving_label: Option<String>,
    pub portions: Vec<PortionOption>,
    pub recommendations: Vec<Recommendation>,
}

impl FruitReport {
    fn unrecognized(classification: ClassificationResult) -> Self {
        Self {
            classification,
            nutrition: None,
            serving_label: None,
            portions: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// Recommendation for one goal, if the fruit was recognized
    pub fn recommendation(&self, goal: Goal) -> Option<&Recommendation> {
        self.recommendations.iter().find(|r| r.goal == goal)
    }
}

/// Classifier plus scraper
pub struct FruitAnalyzer<M> {
    classifier: FruitClassifier<M>,
    scraper: NutritionScraper,
}

impl<M: FruitModel> FruitAnalyzer<M> {
    pub fn new(classifier: FruitClassifier<M>, scraper: NutritionScraper) -> Self {
        Self { classifier, scraper }
    }

    pub fn scraper(&self) -> &NutritionScraper {
        &self.scraper
    }

    /// Classify an image and build its report
    ///
    /// # Errors
    ///
    /// Propagates `NutritionError::Network` from the nutrition fetch. A rejected
    /// or failed classification is not an error.
    pub async fn analyze_image(&self, image_bytes: &[u8]) -> Result<FruitReport, NutritionError> {
        let classification = self.classifier.classify(image_bytes).await;
        match classification.fruit_name.clone() {
            Some(fruit) => self.report_for_fruit(&fruit, classification).await,
            None => {
                info!("No fruit recognized ({:?})", classification.outcome);
                Ok(FruitReport::unrecognized(classification))
            }
        }
    }

    /// Build the report for an already known fruit
    pub async fn report_for_fruit(
        &self,
        fruit: &str,
        classification: ClassificationResult,
    ) -> Result<FruitReport, NutritionError> {
        let (nutrition, portions) = tokio::join!(
            self.scraper.fetch_nutrition(fruit),
            self.scraper.list_portions(fruit)
        );
        let (nutrition, serving_label) = nutrition?;

        let recommendations = Goal::ALL
            .iter()
            .map(|goal| recommend(fruit, *goal))
            .collect();

        Ok(FruitReport {
            classification,
            nutrition: Some(nutrition),
            serving_label,
            portions,
            recommendations,
        })
    }
}
