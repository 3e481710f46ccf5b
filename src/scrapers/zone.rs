use crate::models::{ListingIdentifier, ZoneRecord};
use crate::scrapers::error::ScrapeError;
use crate::scrapers::listing::build_record;
use crate::scrapers::traits::DocumentSource;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Visits every harvested listing of a zone and builds its record.
pub struct ZoneScraper {
    source: Arc<dyn DocumentSource>,
    listing_url: String,
    save_every: usize,
}

impl ZoneScraper {
    /// `listing_url` is the prefix of detail pages, e.g.
    /// `https://www.idealista.com/inmueble`.
    pub fn new(source: Arc<dyn DocumentSource>, listing_url: impl Into<String>) -> Self {
        Self {
            source,
            listing_url: listing_url.into(),
            save_every: 5,
        }
    }

    /// Checkpoint cadence in listings; 0 keeps only the final checkpoint.
    pub fn with_save_every(mut self, save_every: usize) -> Self {
        self.save_every = save_every;
        self
    }

    pub fn listing_url(&self, id: ListingIdentifier) -> String {
        format!("{}/{}/", self.listing_url.trim_end_matches('/'), id)
    }

    /// Scrape `ids` in order.
    ///
    /// Pages that are not listings any more are skipped. A fetch failure aborts
    /// the run; whatever `checkpoint` already received is all that survives.
    /// `checkpoint` sees the records so far every `save_every` listings and
    /// once more at the end.
    pub async fn scrape<F>(&self, ids: &[ListingIdentifier], mut checkpoint: F) -> Result<Vec<ZoneRecord>>
    where
        F: FnMut(&[ZoneRecord]) -> Result<()>,
    {
        info!(
            "Scraping {} listings via {}",
            ids.len(),
            self.source.source_name()
        );

        let mut records = Vec::with_capacity(ids.len());

        for (i, id) in ids.iter().enumerate() {
            if self.save_every > 0 && i > 0 && i % self.save_every == 0 {
                info!("Scraped ids: {}/{}", i, ids.len());
                checkpoint(&records)?;
            }

            let url = self.listing_url(*id);
            debug!("Fetching listing {}: {}", id, url);
            let doc = self.source.fetch(&url).await?;

            match build_record(&doc) {
                Ok(record) => records.push(ZoneRecord { id: *id, record }),
                Err(ScrapeError::MandatoryFieldMissing { field }) => {
                    warn!("Skipping listing {}: no {} on page", id, field);
                    trace!("Markup of skipped listing {}: {}", id, doc.html());
                }
                Err(err) => return Err(err.into()),
            }
        }

        checkpoint(&records)?;
        info!("✅ Scraped {} of {} listings", records.len(), ids.len());

        Ok(records)
    }
}
