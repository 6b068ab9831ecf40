//! # Portion Links Module
//!
//! Discovers the alternate serving sizes a nutrition page links to. Portion
//! discovery is advisory: every failure collapses to an empty list.

use lazy_static::lazy_static;
use log::{debug, info, warn};
use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

use crate::errors::NutritionError;
use crate::nutrition_scraper::{
    canonical_slug, nutrition_slug, stripped_text, NutritionRecord, NutritionScraper,
    GENERIC_TABLE,
};

lazy_static! {
    static ref LINK: Selector = Selector::parse("a[href]").expect("Link selector should be valid");
}

/// Serving descriptors recognized as portion links
pub const PORTION_VOCABULARY: [&str; 8] = [
    "100 gram",
    "1 mangkok",
    "1 porsi",
    "1 tusuk",
    "1 gelas",
    "1 buah",
    "1 potong",
    "1 piring",
];

/// An alternate serving size offered by the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortionOption {
    /// Descriptor from `PORTION_VOCABULARY`
    pub label: String,
    /// Query string including the leading `?`
    pub query: String,
    pub description: String,
}

/// Nutrition values read for one portion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortionNutrition {
    pub portion: PortionOption,
    pub nutrition: NutritionRecord,
    pub serving_label: Option<String>,
}

/// Collect recognized portion links from every generic table
///
/// `page_url` resolves relative hrefs; `slug` feeds the description.
/// Only the first link for each descriptor is kept.
pub fn parse_portion_links(html: &str, page_url: &Url, slug: &str) -> Vec<PortionOption> {
    let document = Html::parse_document(html);
    let display_name = slug.replace('-', " ");
    let mut portions: Vec<PortionOption> = Vec::new();

    for table in document.select(&GENERIC_TABLE) {
        for link in table.select(&LINK) {
            let text = stripped_text(&link);
            if !PORTION_VOCABULARY.contains(&text.as_str())
                || portions.iter().any(|p| p.label == text)
            {
                continue;
            }

            let Some(href) = link.value().attr("href") else {
                continue;
            };
            let query = match page_url.join(href) {
                Ok(resolved) => format!("?{}", resolved.query().unwrap_or("")),
                Err(e) => {
                    debug!("Skipping unresolvable portion href '{}': {}", href, e);
                    continue;
                }
            };

            debug!("Found portion '{}' -> {}", text, query);
            portions.push(PortionOption {
                description: format!("Porsi {text} untuk {display_name}"),
                label: text,
                query,
            });
        }
    }

    portions
}

impl NutritionScraper {
    fn portion_slug(&self, fruit_name: &str) -> String {
        if self.config().portion_slug_exceptions {
            nutrition_slug(fruit_name)
        } else {
            canonical_slug(fruit_name)
        }
    }

    /// List the portion options for a fruit, or an empty list on any failure
    pub async fn list_portions(&self, fruit_name: &str) -> Vec<PortionOption> {
        match self.try_list_portions(fruit_name).await {
            Ok(portions) => {
                info!("Found {} portion options for '{}'", portions.len(), fruit_name);
                portions
            }
            Err(e) => {
                warn!("Error scraping portion links for '{}': {}", fruit_name, e);
                Vec::new()
            }
        }
    }

    async fn try_list_portions(
        &self,
        fruit_name: &str,
    ) -> Result<Vec<PortionOption>, NutritionError> {
        let slug = self.portion_slug(fruit_name);
        let url = self.page_url(&slug, None)?;
        let body = self.fetch_page(url.clone()).await?;
        Ok(parse_portion_links(&body, &url, &slug))
    }

    /// Fetch nutrition for every discovered portion, skipping portions that fail
    pub async fn fetch_portion_nutrition(&self, fruit_name: &str) -> Vec<PortionNutrition> {
        let mut results = Vec::new();

        for portion in self.list_portions(fruit_name).await {
            match self
                .fetch_nutrition_for_portion(fruit_name, Some(&portion.query))
                .await
            {
                Ok((nutrition, serving_label)) => results.push(PortionNutrition {
                    portion,
                    nutrition,
                    serving_label,
                }),
                Err(e) => warn!(
                    "Skipping portion '{}' for '{}': {}",
                    portion.label, fruit_name, e
                ),
            }
        }

        results
    }
}
