use crate::scrapers::error::ScrapeError;
use crate::scrapers::markup::Document;
use crate::scrapers::pacing::Pacing;
use crate::scrapers::traits::DocumentSource;
use crate::scrapers::types::FetchOptions;
use anyhow::{Context, Result};
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

const CONSENT_DISAGREE_BUTTON: &str = "#didomi-notice-disagree-button";
/// How long the consent banner gets to show up once the pause after loading is over
const CONSENT_TIMEOUT: Duration = Duration::from_secs(3);
const CONSENT_SETTLE: Duration = Duration::from_secs(1);

/// Blocking steps of one page visit
trait PageDriver: Send + Sync {
    fn load(&self, url: &str) -> Result<()>;

    /// Click the banner's reject button if it appears within `timeout`.
    /// Returns whether there was a banner to click.
    fn reject_consent(&self, timeout: Duration) -> Result<bool>;

    fn outer_html(&self) -> Result<String>;
}

impl PageDriver for Tab {
    fn load(&self, url: &str) -> Result<()> {
        self.navigate_to(url)?;
        self.wait_until_navigated()?;
        Ok(())
    }

    fn reject_consent(&self, timeout: Duration) -> Result<bool> {
        match self.wait_for_element_with_custom_timeout(CONSENT_DISAGREE_BUTTON, timeout) {
            Ok(button) => {
                button.click()?;
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }

    fn outer_html(&self) -> Result<String> {
        let html_result = self.evaluate("document.documentElement.outerHTML", false)?;
        Ok(html_result
            .value
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_default())
    }
}

/// Load `url`, get rid of the cookie banner and capture the rendered markup.
///
/// The banner is injected by script after the load event, so there is a pause
/// before looking for it.
async fn visit<P: PageDriver + ?Sized>(page: &P, url: &str, pacing: &Pacing) -> Result<String> {
    page.load(url)?;
    pacing.wait().await;

    match page.reject_consent(CONSENT_TIMEOUT) {
        Ok(true) => {
            debug!("Dismissed cookie banner");
            tokio::time::sleep(CONSENT_SETTLE).await;
        }
        Ok(false) => debug!("No cookie banner on page"),
        Err(err) => warn!("Could not dismiss cookie banner: {}", err),
    }

    let html = page.outer_html()?;
    if html.is_empty() {
        anyhow::bail!("Could not get HTML from page");
    }
    Ok(html)
}

/// Document source driving headless Chrome through a single reused tab
pub struct BrowserSource {
    // Keeps the Chrome process alive for as long as the tab is used.
    #[allow(dead_code)]
    browser: Browser,
    tab: Arc<Tab>,
    options: FetchOptions,
}

impl BrowserSource {
    /// Launch headless Chrome
    pub fn new(options: FetchOptions) -> Result<Self> {
        info!("Launching headless Chrome...");

        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .idle_browser_timeout(options.timeout.max(Duration::from_secs(60)))
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(launch_options)
            .context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab().context("Failed to open browser tab")?;
        tab.set_default_timeout(options.timeout);

        Ok(Self {
            browser,
            tab,
            options,
        })
    }
}

#[async_trait]
impl DocumentSource for BrowserSource {
    async fn fetch(&self, url: &str) -> Result<Document, ScrapeError> {
        self.options.pacing.wait().await;
        debug!("Opening {}", url);

        let html = visit(self.tab.as_ref(), url, &self.options.pacing)
            .await
            .map_err(|err| ScrapeError::transport(url, err))?;
        debug!("Captured {} bytes of HTML", html.len());

        self.options.dump(url, &html);
        Ok(Document::parse(&html))
    }

    fn source_name(&self) -> &'static str {
        "Headless Chrome"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    const BANNER: &str = r#"<div id="didomi-host"><button id="didomi-notice-disagree-button">Rechazar</button></div>"#;

    /// Page whose consent banner is injected `banner_after` into the visit
    struct ScriptedPage {
        banner_after: Option<Duration>,
        markup: &'static str,
        steps: Mutex<Vec<String>>,
        dismissed: Mutex<bool>,
    }

    impl ScriptedPage {
        fn new(banner_after: Option<Duration>, markup: &'static str) -> Self {
            Self {
                banner_after,
                markup,
                steps: Mutex::new(Vec::new()),
                dismissed: Mutex::new(false),
            }
        }

        fn log(&self, step: String) {
            self.steps.lock().unwrap().push(step);
        }

        fn steps(&self) -> Vec<String> {
            self.steps.lock().unwrap().clone()
        }
    }

    impl PageDriver for ScriptedPage {
        fn load(&self, url: &str) -> Result<()> {
            self.log(format!("load {}", url));
            Ok(())
        }

        fn reject_consent(&self, timeout: Duration) -> Result<bool> {
            self.log("consent".to_string());
            let clicked = self.banner_after.is_some_and(|after| after <= timeout);
            *self.dismissed.lock().unwrap() = clicked;
            Ok(clicked)
        }

        fn outer_html(&self) -> Result<String> {
            self.log("html".to_string());
            if self.markup.is_empty() || *self.dismissed.lock().unwrap() {
                return Ok(self.markup.to_string());
            }
            let banner = if self.banner_after.is_some() { BANNER } else { "" };
            Ok(format!("{}{}", self.markup, banner))
        }
    }

    #[tokio::test]
    async fn test_late_banner_is_dismissed_before_capture() {
        let page = ScriptedPage::new(Some(Duration::from_secs(1)), "<html><body>Piso</body></html>");

        let html = visit(&page, "https://x/1/", &Pacing::new(false)).await.unwrap();

        assert_eq!(page.steps(), vec!["load https://x/1/", "consent", "html"]);
        assert!(!html.contains("didomi"));
    }

    #[tokio::test]
    async fn test_page_without_banner_is_still_captured() {
        let page = ScriptedPage::new(None, "<html><body>Piso</body></html>");

        let html = visit(&page, "https://x/2/", &Pacing::new(false)).await.unwrap();

        assert_eq!(html, "<html><body>Piso</body></html>");
        assert_eq!(page.steps().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_capture_is_an_error() {
        let page = ScriptedPage::new(None, "");

        assert!(visit(&page, "https://x/3/", &Pacing::new(false)).await.is_err());
    }
}
