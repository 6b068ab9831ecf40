//! # Nutrition Scraper Module
//!
//! Fetches a fruit's nutrition page from fatsecret.co.id and extracts the
//! per-serving nutrient values together with the currently selected serving.
//!
//! ## Features
//!
//! - Slug canonicalization with the site-specific exceptions for cherry and kiwi
//! - Single GET per lookup with a bounded timeout, no retry
//! - Prefix-based nutrient label detection with first-match-wins semantics
//! - Comma or dot decimal values normalized to a dot
//!
//! ## Usage
//!
//! ```rust
//! use fruit_nutrition::nutrition_scraper::{parse_nutrition_page, Nutrient};
//!
//! let html = r#"<table class="generic spaced"><tr><td>Kal.120kcal</td></tr></table>"#;
//! let page = parse_nutrition_page(html);
//! assert_eq!(page.nutrition.get(Nutrient::Calories), Some("120 kcal"));
//! ```

use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

use crate::app_config::ScraperConfig;
use crate::errors::NutritionError;

lazy_static! {
    /// First number in a cell: digits with an optional comma or dot separator
    static ref NUMBER_REGEX: Regex =
        Regex::new(r"\d+[.,]?\d*").expect("Number pattern should be valid");
    pub(crate) static ref NUTRIENT_TABLE: Selector =
        Selector::parse("table.generic.spaced").expect("Nutrient table selector should be valid");
    pub(crate) static ref GENERIC_TABLE: Selector =
        Selector::parse("table.generic").expect("Generic table selector should be valid");
    static ref ROW: Selector = Selector::parse("tr").expect("Row selector should be valid");
    static ref SELECTED_ROW: Selector =
        Selector::parse("tr.selected").expect("Selected row selector should be valid");
    static ref CELL: Selector = Selector::parse("td").expect("Cell selector should be valid");
}

/// Slugs the site uses instead of the generic translated name
const SLUG_EXCEPTIONS: &[(&str, &str)] = &[("ceri", "ceri-manis"), ("kiwi", "buah-kiwi")];

/// Nutrients extracted from the page, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Nutrient {
    #[serde(rename = "Kalori")]
    Calories,
    #[serde(rename = "Lemak")]
    Fat,
    #[serde(rename = "Karbohidrat")]
    Carbohydrate,
    #[serde(rename = "Protein")]
    Protein,
}

/// Cell prefixes in priority order
const LABEL_PREFIXES: [(&str, Nutrient); 4] = [
    ("Kal", Nutrient::Calories),
    ("Lemak", Nutrient::Fat),
    ("Karb", Nutrient::Carbohydrate),
    ("Prot", Nutrient::Protein),
];

impl Nutrient {
    /// Display label as shown on the site
    pub fn label(self) -> &'static str {
        match self {
            Nutrient::Calories => "Kalori",
            Nutrient::Fat => "Lemak",
            Nutrient::Carbohydrate => "Karbohidrat",
            Nutrient::Protein => "Protein",
        }
    }

    fn unit_suffix(self) -> &'static str {
        match self {
            Nutrient::Calories => " kcal",
            _ => " g",
        }
    }
}

/// Nutrient label to value-with-unit mapping for one page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NutritionRecord {
    values: BTreeMap<Nutrient, String>,
}

impl NutritionRecord {
    /// Value for a nutrient, e.g. `"120 kcal"` or `"0.5 g"`
    pub fn get(&self, nutrient: Nutrient) -> Option<&str> {
        self.values.get(&nutrient).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in display order
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, &str)> {
        self.values.iter().map(|(nutrient, value)| (*nutrient, value.as_str()))
    }
}

/// Parsed contents of a nutrition page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NutritionPage {
    pub nutrition: NutritionRecord,
    /// Label of the serving row marked as selected, if any
    pub serving_label: Option<String>,
}

/// Lowercase a display name and replace spaces with hyphens
pub fn canonical_slug(name: &str) -> String {
    name.replace(' ', "-").to_lowercase()
}

/// Canonical slug with the site-specific exceptions applied
pub fn nutrition_slug(name: &str) -> String {
    let slug = canonical_slug(name);
    SLUG_EXCEPTIONS
        .iter()
        .find(|(generic, _)| *generic == slug)
        .map(|(_, site)| site.to_string())
        .unwrap_or(slug)
}

/// Text content of an element with each text node trimmed and blanks dropped
pub(crate) fn stripped_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Extract nutrients and the selected serving label from a page
///
/// Missing tables or labels produce an empty record or `None`, never an error.
pub fn parse_nutrition_page(html: &str) -> NutritionPage {
    let document = Html::parse_document(html);
    let mut nutrition = NutritionRecord::default();

    if let Some(table) = document.select(&NUTRIENT_TABLE).next() {
        for row in table.select(&ROW) {
            for cell in row.select(&CELL) {
                let text = stripped_text(&cell);
                if let Some((_, nutrient)) = LABEL_PREFIXES
                    .iter()
                    .find(|(prefix, _)| text.starts_with(prefix))
                {
                    if let Some(number) = NUMBER_REGEX.find(&text) {
                        let value = number.as_str().replace(',', ".");
                        debug!("Cell '{}' -> {} = {}", text, nutrient.label(), value);
                        nutrition
                            .values
                            .insert(*nutrient, format!("{value}{}", nutrient.unit_suffix()));
                    }
                }
            }
        }
    } else {
        debug!("No nutrient table found on page");
    }

    let serving_label = document
        .select(&GENERIC_TABLE)
        .next()
        .and_then(|table| table.select(&SELECTED_ROW).next())
        .and_then(|row| row.select(&CELL).next())
        .map(|cell| stripped_text(&cell));

    NutritionPage {
        nutrition,
        serving_label,
    }
}

/// HTTP client for the upstream nutrition site
pub struct NutritionScraper {
    client: Client,
    config: ScraperConfig,
}

impl NutritionScraper {
    /// Create a scraper with its own HTTP client
    ///
    /// # Errors
    ///
    /// Returns `NutritionError::Configuration` if the HTTP client cannot be built.
    pub fn new(config: ScraperConfig) -> Result<Self, NutritionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| NutritionError::Configuration(format!("HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Full page URL for a slug and an optional `?query` string
    pub fn page_url(&self, slug: &str, query: Option<&str>) -> Result<Url, NutritionError> {
        let mut url = Url::parse(&format!("{}{}", self.config.base_url, slug))?;
        let query = query.map(|q| q.trim_start_matches('?')).filter(|q| !q.is_empty());
        url.set_query(query);
        Ok(url)
    }

    /// GET a page body, failing on transport errors and non-success status
    pub(crate) async fn fetch_page(&self, url: Url) -> Result<String, NutritionError> {
        info!("Fetching nutrition page: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| NutritionError::Network(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Nutrition page {} returned HTTP {}", url, status);
            return Err(NutritionError::Network(format!("{url} returned HTTP {status}")));
        }

        Ok(response.text().await?)
    }

    /// Fetch nutrient values and serving label for a fruit
    ///
    /// # Errors
    ///
    /// Returns `NutritionError::Network` on transport failure or non-2xx status.
    pub async fn fetch_nutrition(
        &self,
        fruit_name: &str,
    ) -> Result<(NutritionRecord, Option<String>), NutritionError> {
        self.fetch_nutrition_for_portion(fruit_name, None).await
    }

    /// Fetch nutrient values for a specific portion query such as `?portionid=1`
    pub async fn fetch_nutrition_for_portion(
        &self,
        fruit_name: &str,
        portion_query: Option<&str>,
    ) -> Result<(NutritionRecord, Option<String>), NutritionError> {
        let url = self.page_url(&nutrition_slug(fruit_name), portion_query)?;
        let body = self.fetch_page(url).await?;
        let page = parse_nutrition_page(&body);

        info!(
            "Parsed {} nutrients for '{}' (serving: {:?})",
            page.nutrition.len(),
            fruit_name,
            page.serving_label
        );
        Ok((page.nutrition, page.serving_label))
    }
}
