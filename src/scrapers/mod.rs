pub mod browser;
pub mod error;
pub mod extractors;
pub mod harvester;
pub mod http;
pub mod listing;
pub mod markup;
pub mod pacing;
pub mod schema;
pub mod traits;
pub mod types;
pub mod zone;

#[cfg(test)]
pub mod testing;

pub use browser::BrowserSource;
pub use harvester::IdentifierHarvester;
pub use http::HttpSource;
pub use traits::DocumentSource;
pub use types::{FetchOptions, SourceKind};
pub use zone::ZoneScraper;
