use crate::scrapers::error::ScrapeError;
use crate::scrapers::markup::Document;
use async_trait::async_trait;

/// Anything that can turn a URL into a rendered page.
/// Consent banners must already be dismissed in the returned markup.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch and parse the page at `url`
    async fn fetch(&self, url: &str) -> Result<Document, ScrapeError>;

    /// Get the name of the source
    fn source_name(&self) -> &'static str;
}
