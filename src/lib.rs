//! # Fruit Nutrition
//!
//! Classifies a fruit photo into one of ten classes, scrapes per-serving
//! nutrition facts for the recognized fruit and derives weight-loss and
//! weight-gain fruit recommendations.

pub mod analyzer;
pub mod app_config;
pub mod classifier;
pub mod cli;
pub mod errors;
pub mod fruit_catalog;
pub mod image_input;
pub mod localization;
pub mod nutrition_scraper;
pub mod portion_links;
pub mod recommendations;
pub mod remote_model;
pub mod report;
pub mod weight_units;
