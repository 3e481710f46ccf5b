use crate::models::ListingIdentifier;
use crate::scrapers::error::ScrapeError;
use crate::scrapers::markup::Document;
use crate::scrapers::schema;
use crate::scrapers::traits::DocumentSource;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What one index page says about itself
#[derive(Debug, Clone, PartialEq)]
pub struct IndexPage {
    /// Page number the site marks as selected
    pub current_page: u32,
    /// Advertised identifiers, in page order
    pub identifiers: Vec<ListingIdentifier>,
}

/// Next step after reading the page that was asked for
#[derive(Debug, PartialEq)]
pub enum PageOutcome {
    Continue(Vec<ListingIdentifier>),
    Done,
}

impl IndexPage {
    /// A page is genuine only if it reports the number we requested; past the
    /// last page the site serves a lower page instead.
    pub fn outcome(self, requested: u32) -> PageOutcome {
        if self.current_page == requested {
            PageOutcome::Continue(self.identifiers)
        } else {
            PageOutcome::Done
        }
    }
}

/// Read the pagination marker and the listing identifiers of an index page.
///
/// The marker is required. A zone small enough to fit on one page renders no
/// `div.pagination` at all, so its only page is rejected with
/// [`ScrapeError::PaginationIndicatorMissing`] and the harvest yields nothing.
pub fn read_index_page(doc: &Document, requested: u32) -> Result<IndexPage, ScrapeError> {
    let listing = doc.find(&schema::LISTING_ITEMS);

    let current_page = listing
        .and_then(|main| main.find(&schema::PAGINATION))
        .and_then(|pagination| pagination.find(&schema::SELECTED_PAGE))
        .and_then(|selected| selected.text().trim().parse::<u32>().ok())
        .ok_or(ScrapeError::PaginationIndicatorMissing { page: requested })?;

    let mut identifiers = Vec::new();
    for article in listing
        .map(|main| main.find_all(&schema::ARTICLE))
        .unwrap_or_default()
    {
        let Some(raw) = article.attr(schema::ARTICLE_ID_ATTR) else {
            continue;
        };
        match raw.trim().parse::<u64>() {
            Ok(id) => identifiers.push(ListingIdentifier(id)),
            Err(_) => warn!("Skipping article with malformed id '{}'", raw),
        }
    }

    Ok(IndexPage {
        current_page,
        identifiers,
    })
}

/// Walks the paginated index of one zone and collects every listing id.
pub struct IdentifierHarvester {
    source: Arc<dyn DocumentSource>,
    base_url: String,
}

impl IdentifierHarvester {
    pub fn new(source: Arc<dyn DocumentSource>, base_url: impl Into<String>) -> Self {
        Self {
            source,
            base_url: base_url.into(),
        }
    }

    /// Zone URL the harvester was created with
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn page_url(&self, page: u32) -> String {
        format!("{}/pagina-{}.htm", self.base_url.trim_end_matches('/'), page)
    }

    /// Collect identifiers page by page, starting at page 1, until the site
    /// answers with a page other than the one requested.
    ///
    /// Identifiers keep page order then in-page order and are not deduplicated.
    /// Fetch failures abort the walk.
    pub async fn obtain_ids(&self) -> Result<Vec<ListingIdentifier>, ScrapeError> {
        info!(
            "Harvesting listing ids from {} via {}",
            self.base_url,
            self.source.source_name()
        );

        let mut ids = Vec::new();
        let mut page = 1;

        loop {
            let url = self.page_url(page);
            debug!("Fetching index page {}: {}", page, url);

            let doc = self.source.fetch(&url).await?;
            let index = read_index_page(&doc, page)?;
            let reported = index.current_page;

            match index.outcome(page) {
                PageOutcome::Continue(found) => {
                    info!("Page {}: {} listings", page, found.len());
                    ids.extend(found);
                    page += 1;
                }
                PageOutcome::Done => {
                    info!(
                        "Requested page {} but site served page {}, stopping with {} ids",
                        page,
                        reported,
                        ids.len()
                    );
                    return Ok(ids);
                }
            }
        }
    }
}
