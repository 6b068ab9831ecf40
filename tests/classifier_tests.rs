//! # Classifier Tests
//!
//! Tests for the confidence-gated classifier adapter using stub models, and for
//! the image preprocessing contract it relies on.

use anyhow::{anyhow, Result};
use fruit_nutrition::classifier::{
    interpret_probabilities, ClassificationOutcome, FruitClassifier, FruitModel,
    CONFIDENCE_THRESHOLD,
};
use fruit_nutrition::app_config::ModelConfig;
use fruit_nutrition::errors::NutritionError;
use fruit_nutrition::image_input::{
    is_supported_image_format, load_image_from_path, preprocess_image, ImageTensor,
};
use fruit_nutrition::remote_model::RemoteModel;
use image::{ImageFormat, Rgb, RgbImage};
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Model returning a fixed probability vector
struct FixedModel(Vec<f32>);

impl FruitModel for FixedModel {
    async fn predict(&self, _input: &ImageTensor) -> Result<Vec<f32>> {
        Ok(self.0.clone())
    }
}

/// Model that always fails
struct BrokenModel;

impl FruitModel for BrokenModel {
    async fn predict(&self, _input: &ImageTensor) -> Result<Vec<f32>> {
        Err(anyhow!("model file missing"))
    }
}

fn one_hot(index: usize, confidence: f32) -> Vec<f32> {
    let rest = (1.0 - confidence) / 9.0;
    (0..10).map(|i| if i == index { confidence } else { rest }).collect()
}

fn png_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let file = NamedTempFile::new().unwrap();
    let image = RgbImage::from_pixel(width, height, Rgb(color));
    image.save_with_format(file.path(), ImageFormat::Png).unwrap();
    std::fs::read(file.path()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test the threshold boundary is inclusive
    #[test]
    fn test_threshold_boundary() {
        let result = interpret_probabilities(&one_hot(0, 0.6));
        assert_eq!(result.fruit_name.as_deref(), Some("Apel"));
        assert_eq!(result.confidence, 0.6);
        assert_eq!(result.outcome, ClassificationOutcome::Accepted);

        for index in 0..10 {
            let result = interpret_probabilities(&one_hot(index, 0.59));
            assert_eq!(result.fruit_name, None);
            assert_eq!(result.outcome, ClassificationOutcome::BelowThreshold);
            assert_eq!(result.confidence, 0.59);
        }
    }

    /// Test every index maps to its fruit in class order
    #[test]
    fn test_index_mapping() {
        let expected = [
            "Apel", "Pisang", "Alpukat", "Ceri", "Kiwi", "Mangga", "Jeruk", "Nanas", "Stroberi",
            "Semangka",
        ];
        for (index, name) in expected.iter().enumerate() {
            let result = interpret_probabilities(&one_hot(index, 0.9));
            assert_eq!(result.fruit_name.as_deref(), Some(*name));
        }
    }

    /// Test an index beyond the known classes yields no name
    #[test]
    fn test_unknown_index() {
        let mut probabilities = vec![0.01; 11];
        probabilities[10] = 0.9;

        let result = interpret_probabilities(&probabilities);

        assert_eq!(result.fruit_name, None);
        assert_eq!(result.outcome, ClassificationOutcome::UnknownIndex);
    }

    /// Test ties resolve to the first maximum
    #[test]
    fn test_tie_picks_first() {
        let mut probabilities = vec![0.0; 10];
        probabilities[2] = 0.7;
        probabilities[5] = 0.7;

        let result = interpret_probabilities(&probabilities);

        assert_eq!(result.fruit_name.as_deref(), Some("Alpukat"));
    }

    /// Test an empty vector counts as a failed prediction
    #[test]
    fn test_empty_probabilities() {
        let result = interpret_probabilities(&[]);

        assert_eq!(result.fruit_name, None);
        assert_eq!(result.confidence, 0.0);
        assert!(matches!(result.outcome, ClassificationOutcome::PredictionFailed(_)));
    }

    /// Test classification end to end with a stub model
    #[tokio::test]
    async fn test_classify_with_stub_model() {
        let classifier = FruitClassifier::new(FixedModel(one_hot(8, 0.93)));

        let result = classifier.classify(&png_bytes(64, 48, [220, 30, 60])).await;

        assert_eq!(result.fruit_name.as_deref(), Some("Stroberi"));
        assert!(result.confidence >= CONFIDENCE_THRESHOLD);
    }

    /// Test model errors are absorbed into a zero-confidence result
    #[tokio::test]
    async fn test_model_error_is_absorbed() {
        let classifier = FruitClassifier::new(BrokenModel);

        let result = classifier.classify(&png_bytes(8, 8, [0, 0, 0])).await;

        assert_eq!(result.fruit_name, None);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(
            result.outcome,
            ClassificationOutcome::PredictionFailed("model file missing".to_string())
        );
    }

    /// Test undecodable bytes are absorbed the same way
    #[tokio::test]
    async fn test_undecodable_image_is_absorbed() {
        let classifier = FruitClassifier::new(FixedModel(one_hot(0, 1.0)));

        let result = classifier.classify(b"not an image").await;

        assert_eq!(result.fruit_name, None);
        assert!(matches!(result.outcome, ClassificationOutcome::PredictionFailed(_)));
    }

    /// Test preprocessing resizes to 224x224 RGB scaled into [0, 1]
    #[test]
    fn test_preprocess_shape_and_scale() {
        let tensor = preprocess_image(&png_bytes(300, 120, [255, 0, 51])).unwrap();

        assert_eq!(tensor.shape(), [1, 224, 224, 3]);
        assert_eq!(tensor.data.len(), 224 * 224 * 3);
        assert!(tensor.data.iter().all(|v| (0.0..=1.0).contains(v)));

        let [r, g, b] = tensor.pixel(100, 100);
        assert!((r - 1.0).abs() < 1e-6);
        assert!(g.abs() < 1e-6);
        assert!((b - 0.2).abs() < 1e-6);
    }

    /// Test format detection accepts PNG and rejects text
    #[test]
    fn test_supported_formats() {
        assert!(is_supported_image_format(&png_bytes(4, 4, [1, 2, 3])));
        assert!(!is_supported_image_format(b"plain text, not an image"));
    }

    /// Test reading images from disk
    #[test]
    fn test_load_image_from_path() {
        let file = NamedTempFile::new().unwrap();
        RgbImage::from_pixel(4, 4, Rgb([9, 9, 9]))
            .save_with_format(file.path(), ImageFormat::Png)
            .unwrap();

        let bytes = load_image_from_path(file.path()).unwrap();
        assert!(is_supported_image_format(&bytes));

        let missing = load_image_from_path("/definitely/not/here.png");
        assert!(matches!(missing, Err(NutritionError::ImageLoad(_))));
    }

    /// Test the remote model posts instances and reads the first prediction
    #[tokio::test]
    async fn test_remote_model_prediction() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/models/fruit:predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "predictions": [[0.01, 0.02, 0.9, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01]]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let model = RemoteModel::new(ModelConfig {
            url: format!("{}/v1/models/fruit:predict", server.uri()),
            timeout_secs: 5,
        })
        .unwrap();
        let result = FruitClassifier::new(model)
            .classify(&png_bytes(16, 16, [40, 120, 40]))
            .await;

        assert_eq!(result.fruit_name.as_deref(), Some("Alpukat"));
        assert_eq!(result.confidence, 0.9);
    }

    /// Test an endpoint error becomes a failed prediction
    #[tokio::test]
    async fn test_remote_model_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let model = RemoteModel::new(ModelConfig {
            url: format!("{}/v1/models/fruit:predict", server.uri()),
            timeout_secs: 5,
        })
        .unwrap();
        let result = FruitClassifier::new(model)
            .classify(&png_bytes(16, 16, [40, 120, 40]))
            .await;

        assert_eq!(result.fruit_name, None);
        assert!(matches!(result.outcome, ClassificationOutcome::PredictionFailed(_)));
    }
}
