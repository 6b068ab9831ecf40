use clap::Parser;

/// Fruit Nutrition: identify a fruit photo and show its nutrition facts and diet recommendations.
#[derive(Parser, Debug)]
#[command(name = "fruit-nutrition")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Image file path or http(s) URL of the fruit photo
    #[arg(required_unless_present = "fruit")]
    pub image: Option<String>,

    /// Skip classification and report on this fruit (e.g. "Apel")
    #[arg(long, conflicts_with = "image")]
    pub fruit: Option<String>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Also fetch nutrition values for every discovered portion
    #[arg(long)]
    pub portions: bool,
}

impl Cli {
    /// Whether the image argument points at a URL rather than a file
    pub fn image_is_url(&self) -> bool {
        self.image
            .as_deref()
            .is_some_and(|image| image.starts_with("http://") || image.starts_with("https://"))
    }
}
