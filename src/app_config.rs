//! # Application Configuration Module
//!
//! This module defines configuration structures for the nutrition scraper and
//! the remote classifier, with defaults and environment overrides.

use std::env;

use crate::errors::NutritionError;

// Constants for scraper configuration
pub const DEFAULT_BASE_URL: &str = "https://www.fatsecret.co.id/kalori-gizi/umum/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; fruit-nutrition/0.1)";

// Constants for model configuration
pub const DEFAULT_MODEL_URL: &str = "http://localhost:8501/v1/models/fruit:predict";
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 30;

/// Settings for fetching nutrition pages
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Base path the canonical slug is appended to
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// User-Agent header sent with every page request
    pub user_agent: String,
    /// Whether portion discovery applies the cherry/kiwi slug exceptions
    pub portion_slug_exceptions: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            portion_slug_exceptions: false,
        }
    }
}

/// Settings for the remote classifier endpoint
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Predict endpoint URL
    pub url: String,
    /// Timeout for a single prediction call in seconds
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_MODEL_URL.to_string(),
            timeout_secs: DEFAULT_MODEL_TIMEOUT_SECS,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub scraper: ScraperConfig,
    pub model: ModelConfig,
}

impl AppConfig {
    /// Build a configuration from environment variables, falling back to defaults
    ///
    /// Recognized variables: `FATSECRET_BASE_URL`, `HTTP_TIMEOUT_SECS`,
    /// `MODEL_URL`, `MODEL_TIMEOUT_SECS`, `PORTION_SLUG_EXCEPTIONS`.
    pub fn from_env() -> Result<Self, NutritionError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NutritionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(base_url) = lookup("FATSECRET_BASE_URL") {
            config.scraper.base_url = with_trailing_slash(&base_url);
        }
        if let Some(raw) = lookup("HTTP_TIMEOUT_SECS") {
            config.scraper.request_timeout_secs = parse_secs("HTTP_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = lookup("PORTION_SLUG_EXCEPTIONS") {
            config.scraper.portion_slug_exceptions = parse_flag("PORTION_SLUG_EXCEPTIONS", &raw)?;
        }
        if let Some(url) = lookup("MODEL_URL") {
            config.model.url = url;
        }
        if let Some(raw) = lookup("MODEL_TIMEOUT_SECS") {
            config.model.timeout_secs = parse_secs("MODEL_TIMEOUT_SECS", &raw)?;
        }

        Ok(config)
    }
}

fn with_trailing_slash(url: &str) -> String {
    let url = url.trim();
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<u64, NutritionError> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(NutritionError::Configuration(format!(
            "{key} must be a positive number of seconds, got '{raw}'"
        ))),
        Ok(secs) => Ok(secs),
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, NutritionError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(NutritionError::Configuration(format!(
            "{key} must be a boolean, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.scraper.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.scraper.request_timeout_secs, 10);
        assert!(!config.scraper.portion_slug_exceptions);
        assert_eq!(config.model.url, DEFAULT_MODEL_URL);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("FATSECRET_BASE_URL", "http://localhost:8080/umum"),
            ("HTTP_TIMEOUT_SECS", "3"),
            ("PORTION_SLUG_EXCEPTIONS", "yes"),
            ("MODEL_TIMEOUT_SECS", " 5 "),
        ]))
        .unwrap();

        assert_eq!(config.scraper.base_url, "http://localhost:8080/umum/");
        assert_eq!(config.scraper.request_timeout_secs, 3);
        assert!(config.scraper.portion_slug_exceptions);
        assert_eq!(config.model.timeout_secs, 5);
    }

    #[test]
    fn test_invalid_values() {
        let result = AppConfig::from_lookup(lookup_from(&[("HTTP_TIMEOUT_SECS", "0")]));
        assert!(matches!(result, Err(NutritionError::Configuration(_))));

        let result = AppConfig::from_lookup(lookup_from(&[("PORTION_SLUG_EXCEPTIONS", "maybe")]));
        assert!(matches!(result, Err(NutritionError::Configuration(_))));
    }
}
