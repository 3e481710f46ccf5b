use crate::scrapers::pacing::Pacing;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

/// How pages are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Headless Chrome; renders scripts and dismisses the consent banner
    Browser,
    /// Plain HTTP requests
    Http,
}

impl FromStr for SourceKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "browser" | "chrome" => Ok(SourceKind::Browser),
            "http" => Ok(SourceKind::Http),
            other => anyhow::bail!("unknown source '{}', expected 'browser' or 'http'", other),
        }
    }
}

/// Settings shared by every document source
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub pacing: Pacing,
    /// Where fetched pages are dumped for debugging, if anywhere
    pub debug_dir: Option<PathBuf>,
}

impl FetchOptions {
    /// Save `html` under the debug directory. Failures are only logged.
    pub fn dump(&self, url: &str, html: &str) {
        let Some(dir) = &self.debug_dir else {
            return;
        };

        let path = dir.join(format!("{}.html", dump_name(url)));
        let written = std::fs::create_dir_all(dir).and_then(|_| std::fs::write(&path, html));
        match written {
            Ok(()) => debug!("Saved {} bytes of HTML to {}", html.len(), path.display()),
            Err(err) => warn!("Could not save page to {}: {}", path.display(), err),
        }
    }
}

fn dump_name(url: &str) -> String {
    let stripped = url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    stripped
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_parsing() {
        assert_eq!("Browser".parse::<SourceKind>().unwrap(), SourceKind::Browser);
        assert_eq!(" http ".parse::<SourceKind>().unwrap(), SourceKind::Http);
        assert!("selenium".parse::<SourceKind>().is_err());
    }

    #[test]
    fn test_dump_name_is_filesystem_safe() {
        assert_eq!(
            dump_name("https://www.idealista.com/inmueble/97612345/"),
            "www_idealista_com_inmueble_97612345"
        );
    }
}
