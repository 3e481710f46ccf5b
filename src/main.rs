mod config;
mod models;
mod output;
mod scrapers;

use config::ScoutConfig;
use scrapers::pacing::Pacing;
use scrapers::{
    BrowserSource, DocumentSource, FetchOptions, HttpSource, IdentifierHarvester, SourceKind,
    ZoneScraper,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🏠 Idealista Scout");
    info!("==================");

    let config = ScoutConfig::from_env()?;

    let options = FetchOptions {
        timeout: config.request_timeout,
        pacing: Pacing::new(config.wait),
        debug_dir: config.debug_dir.clone(),
    };
    let source: Arc<dyn DocumentSource> = match config.source {
        SourceKind::Browser => Arc::new(BrowserSource::new(options)?),
        SourceKind::Http => Arc::new(HttpSource::with_options(options)?),
    };

    // Obtain listing ids
    let harvester = IdentifierHarvester::new(source.clone(), config.base_url.clone());
    let ids = harvester.obtain_ids().await?;
    info!("Found {} listings in {}", ids.len(), harvester.base_url());
    output::write_ids(&config.ids_path, &ids)?;

    // Obtain info for each listing
    let scraper = ZoneScraper::new(source, config.listing_url.clone())
        .with_save_every(config.save_every);
    let houses_path = config.houses_path.clone();
    let records = scraper
        .scrape(&ids, |records| output::write_records(&houses_path, records))
        .await?;

    info!(
        "✅ Done: {} listings saved to {}",
        records.len(),
        config.houses_path.display()
    );

    Ok(())
}
