mod bundle;
mod config;
mod images;
mod models;
mod pipeline;
mod rewrite;
mod scrapers;

use config::ScrapeConfig;
use pipeline::Pipeline;
use rewrite::PassthroughRewriter;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let listing_url = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Usage: listing-courier <listing-url>"))?;

    info!("🏠 Listing Courier");
    info!("==================");
    info!("Scraping {}", listing_url);

    let pipeline = Pipeline::new(ScrapeConfig::default(), PassthroughRewriter);
    let result = pipeline.run(&listing_url).await?;

    info!(
        "✅ Done: {} transformed images in {}",
        result.transformed_image_count,
        result.directory_path.display()
    );
    println!("{}", result.directory_path.display());

    Ok(())
}
