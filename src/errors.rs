//! # Error Types Module
//!
//! This module defines the error taxonomy shared by the scraping, conversion
//! and classification layers. Missing nutrients or portions are not errors:
//! those degrade to empty collections.

/// Custom error types for fruit nutrition operations
#[derive(Debug, Clone, PartialEq)]
pub enum NutritionError {
    /// A weight string had no recognized unit or an unparsable number
    InvalidWeightFormat(String),
    /// Transport failure or non-success status while fetching a page
    Network(String),
    /// The underlying model call failed
    PredictionFailed(String),
    /// Image bytes could not be read, downloaded or decoded
    ImageLoad(String),
    /// Invalid configuration value
    Configuration(String),
}

impl std::fmt::Display for NutritionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NutritionError::InvalidWeightFormat(msg) => write!(f, "Invalid weight format: {msg}"),
            NutritionError::Network(msg) => write!(f, "Network error: {msg}"),
            NutritionError::PredictionFailed(msg) => write!(f, "Prediction failed: {msg}"),
            NutritionError::ImageLoad(msg) => write!(f, "Image load error: {msg}"),
            NutritionError::Configuration(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for NutritionError {}

impl From<anyhow::Error> for NutritionError {
    fn from(err: anyhow::Error) -> Self {
        NutritionError::PredictionFailed(err.to_string())
    }
}

impl From<reqwest::Error> for NutritionError {
    fn from(err: reqwest::Error) -> Self {
        NutritionError::Network(err.to_string())
    }
}

impl From<url::ParseError> for NutritionError {
    fn from(err: url::ParseError) -> Self {
        NutritionError::Network(format!("invalid URL: {err}"))
    }
}
