//! In-memory document source and page builders for tests.

use crate::scrapers::error::ScrapeError;
use crate::scrapers::markup::Document;
use crate::scrapers::traits::DocumentSource;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Index page reporting `selected` as the current page
pub fn index_page(selected: u32, ids: &[u64]) -> String {
    let articles: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<article class="item" data-element-id="{}"><a class="item-link" href="/inmueble/{}/">Piso</a></article>"#,
                id, id
            )
        })
        .collect();

    format!(
        r##"<html><body><main class="listing-items">{}
           <div class="pagination"><ul>
             <li class="prev"><a href="#">Anterior</a></li>
             <li class="selected"><span>{}</span></li>
             <li class="next"><a href="#">Siguiente</a></li>
           </ul></div>
         </main></body></html>"##,
        articles, selected
    )
}

/// Serves canned markup by URL and records every request.
#[derive(Default)]
pub struct ScriptedSource {
    pages: HashMap<String, String>,
    fallback: Option<String>,
    requested: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, markup: &str) -> Self {
        self.pages.insert(url.to_string(), markup.to_string());
        self
    }

    /// Markup served for any URL without a page of its own
    pub fn with_fallback(mut self, markup: &str) -> Self {
        self.fallback = Some(markup.to_string());
        self
    }

    /// A zone with the given pages; any later page number is answered with
    /// the last real page, as the site does.
    pub fn paginated(base_url: &str, pages: Vec<Vec<u64>>) -> Self {
        let mut source = Self::new();
        for (index, ids) in pages.iter().enumerate() {
            let number = index as u32 + 1;
            source = source.with_page(
                &format!("{}/pagina-{}.htm", base_url, number),
                &index_page(number, ids),
            );
        }
        if let Some(last) = pages.last() {
            source = source.with_fallback(&index_page(pages.len() as u32, last));
        }
        source
    }

    pub fn fetch_count(&self) -> usize {
        self.requested().len()
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().map(|urls| urls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl DocumentSource for ScriptedSource {
    async fn fetch(&self, url: &str) -> Result<Document, ScrapeError> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(url.to_string());
        }

        self.pages
            .get(url)
            .or(self.fallback.as_ref())
            .map(|markup| Document::parse(markup))
            .ok_or_else(|| ScrapeError::transport(url, anyhow::anyhow!("no scripted page")))
    }

    fn source_name(&self) -> &'static str {
        "Scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::harvester::read_index_page;

    #[test]
    fn test_index_page_carries_marker_and_ids() {
        let doc = Document::parse(&index_page(3, &[11, 12]));
        let page = read_index_page(&doc, 3).unwrap();

        assert_eq!(page.current_page, 3);
        assert_eq!(page.identifiers.len(), 2);
        assert!(doc.html().contains("Siguiente"));
    }

    #[tokio::test]
    async fn test_paginated_source_clamps_past_last_page() {
        let source = ScriptedSource::paginated("https://zone", vec![vec![1], vec![2]]);
        let doc = source.fetch("https://zone/pagina-7.htm").await.unwrap();

        assert_eq!(read_index_page(&doc, 7).unwrap().current_page, 2);
        assert_eq!(source.fetch_count(), 1);
    }
}
