use anyhow::Result;
use clap::Parser;
use fruit_nutrition::analyzer::{FruitAnalyzer, FruitReport};
use fruit_nutrition::app_config::AppConfig;
use fruit_nutrition::classifier::{ClassificationOutcome, ClassificationResult, FruitClassifier};
use fruit_nutrition::cli::Cli;
use fruit_nutrition::image_input::{
    is_supported_image_format, load_image_from_path, load_image_from_url,
};
use fruit_nutrition::localization::LocalizationManager;
use fruit_nutrition::nutrition_scraper::NutritionScraper;
use fruit_nutrition::remote_model::RemoteModel;
use fruit_nutrition::report;
use log::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    info!("Starting fruit nutrition analysis (source: {})", config.scraper.base_url);

    let l10n = LocalizationManager::new()?;
    let scraper = NutritionScraper::new(config.scraper.clone())?;
    let model = RemoteModel::new(config.model.clone())?;
    let analyzer = FruitAnalyzer::new(FruitClassifier::new(model), scraper);

    let result = match (&cli.fruit, &cli.image) {
        (Some(fruit), _) => {
            let classification = ClassificationResult {
                fruit_name: Some(fruit.clone()),
                confidence: 1.0,
                outcome: ClassificationOutcome::Accepted,
            };
            analyzer.report_for_fruit(fruit, classification).await
        }
        (None, Some(image)) => {
            let bytes = if cli.image_is_url() {
                load_image_from_url(&reqwest::Client::new(), image).await?
            } else {
                load_image_from_path(image)?
            };
            if !is_supported_image_format(&bytes) {
                anyhow::bail!("Unsupported image format, use JPG or PNG: {image}");
            }
            analyzer.analyze_image(&bytes).await
        }
        (None, None) => unreachable!("clap requires an image or --fruit"),
    };

    let fruit_report: FruitReport = match result {
        Ok(fruit_report) => fruit_report,
        Err(e) => {
            error!("Nutrition lookup failed: {e}");
            eprintln!("{}", report::render_fetch_error(&e, &l10n));
            std::process::exit(1);
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&fruit_report)?);
    } else {
        print!("{}", report::render(&fruit_report, &l10n));
    }

    if cli.portions {
        if let Some(fruit) = fruit_report.classification.fruit_name.as_deref() {
            let portion_nutrition = analyzer.scraper().fetch_portion_nutrition(fruit).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&portion_nutrition)?);
            } else {
                for entry in &portion_nutrition {
                    println!("\n{}", entry.portion.description);
                    for (nutrient, value) in entry.nutrition.iter() {
                        println!("  {}: {}", nutrient.label(), value);
                    }
                }
            }
        }
    }

    Ok(())
}
