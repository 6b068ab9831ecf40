//! # Classifier Adapter Module
//!
//! Wraps an opaque fruit model behind the `FruitModel` trait, picks the most
//! probable class and rejects predictions below the confidence threshold.
//!
//! Model failures never propagate: they become a zero-confidence result
//! without a fruit name.

use log::{error, info};
use serde::Serialize;

use crate::fruit_catalog::{fruit_name_for_index, FRUIT_CLASSES};
use crate::image_input::{preprocess_image, ImageTensor};

/// Minimum arg-max probability for a prediction to be accepted
pub const CONFIDENCE_THRESHOLD: f32 = 0.6;

/// Anything that maps a preprocessed image to class probabilities
///
/// Implementations return one probability per entry of `FRUIT_CLASSES`.
#[allow(async_fn_in_trait)]
pub trait FruitModel {
    async fn predict(&self, input: &ImageTensor) -> anyhow::Result<Vec<f32>>;
}

/// Why a classification did or did not produce a fruit name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ClassificationOutcome {
    Accepted,
    BelowThreshold,
    UnknownIndex,
    PredictionFailed(String),
}

/// Result of classifying one image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// Recognized fruit, absent when rejected
    pub fruit_name: Option<String>,
    pub confidence: f32,
    pub outcome: ClassificationOutcome,
}

impl ClassificationResult {
    fn failed(message: String) -> Self {
        Self {
            fruit_name: None,
            confidence: 0.0,
            outcome: ClassificationOutcome::PredictionFailed(message),
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.fruit_name.is_some()
    }
}

/// Interpret a probability vector
///
/// The first maximum wins on ties. An empty vector is treated as a failed
/// prediction.
pub fn interpret_probabilities(probabilities: &[f32]) -> ClassificationResult {
    let best = probabilities
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (index, p)| match best {
            Some((_, best_p)) if p <= best_p => best,
            _ => Some((index, p)),
        });

    let Some((index, confidence)) = best else {
        return ClassificationResult::failed("model returned no probabilities".to_string());
    };

    if confidence < CONFIDENCE_THRESHOLD {
        info!(
            "Rejected prediction index {} with confidence {:.3} (threshold {})",
            index, confidence, CONFIDENCE_THRESHOLD
        );
        return ClassificationResult {
            fruit_name: None,
            confidence,
            outcome: ClassificationOutcome::BelowThreshold,
        };
    }

    match fruit_name_for_index(index) {
        Some(name) => ClassificationResult {
            fruit_name: Some(name.to_string()),
            confidence,
            outcome: ClassificationOutcome::Accepted,
        },
        None => ClassificationResult {
            fruit_name: None,
            confidence,
            outcome: ClassificationOutcome::UnknownIndex,
        },
    }
}

/// Confidence-gated classifier over any `FruitModel`
pub struct FruitClassifier<M> {
    model: M,
}

impl<M: FruitModel> FruitClassifier<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Classify raw image bytes
    pub async fn classify(&self, image_bytes: &[u8]) -> ClassificationResult {
        match preprocess_image(image_bytes) {
            Ok(tensor) => self.classify_tensor(&tensor).await,
            Err(e) => {
                error!("Error predicting image: {}", e);
                ClassificationResult::failed(e.to_string())
            }
        }
    }

    /// Classify an already preprocessed image
    pub async fn classify_tensor(&self, tensor: &ImageTensor) -> ClassificationResult {
        match self.model.predict(tensor).await {
            Ok(probabilities) => {
                if probabilities.len() != FRUIT_CLASSES.len() {
                    info!(
                        "Model returned {} probabilities for {} classes",
                        probabilities.len(),
                        FRUIT_CLASSES.len()
                    );
                }
                let result = interpret_probabilities(&probabilities);
                info!(
                    "Classification: {:?} ({:.1}%)",
                    result.fruit_name,
                    result.confidence * 100.0
                );
                result
            }
            Err(e) => {
                error!("Error predicting image: {}", e);
                ClassificationResult::failed(e.to_string())
            }
        }
    }
}
