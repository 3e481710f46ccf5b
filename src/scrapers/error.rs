use thiserror::Error;

/// Failures the scraping core reports to its caller
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The page could not be retrieved
    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    /// The page is not a listing (removed or expired advertisement)
    #[error("mandatory field '{field}' missing from listing page")]
    MandatoryFieldMissing { field: &'static str },

    /// Index page without a readable current-page marker
    #[error("no current-page indicator on index page {page}")]
    PaginationIndicatorMissing { page: u32 },
}

impl ScrapeError {
    pub fn transport(url: &str, source: impl Into<anyhow::Error>) -> Self {
        ScrapeError::Transport {
            url: url.to_string(),
            source: source.into(),
        }
    }
}
