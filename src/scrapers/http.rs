use crate::scrapers::error::ScrapeError;
use crate::scrapers::markup::Document;
use crate::scrapers::traits::DocumentSource;
use crate::scrapers::types::FetchOptions;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

/// Plain HTTP document source. Follows redirects, which is how the site
/// signals a page number past the end of a zone.
pub struct HttpSource {
    client: Client,
    options: FetchOptions,
}

impl HttpSource {
    pub fn with_options(options: FetchOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, options })
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<Document, ScrapeError> {
        self.options.pacing.wait().await;
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| ScrapeError::transport(url, err))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} returned status: {}", url, status);
            return Err(ScrapeError::transport(
                url,
                anyhow::anyhow!("HTTP status {}", status),
            ));
        }

        let html = response
            .text()
            .await
            .map_err(|err| ScrapeError::transport(url, err))?;
        debug!("Downloaded {} bytes of HTML", html.len());

        self.options.dump(url, &html);
        Ok(Document::parse(&html))
    }

    fn source_name(&self) -> &'static str {
        "HTTP"
    }
}
