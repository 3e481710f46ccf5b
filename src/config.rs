use crate::scrapers::SourceKind;
use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Run configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    /// Zone index URL; pages live at `{base_url}/pagina-{N}.htm`
    pub base_url: String,
    /// Detail pages live at `{listing_url}/{id}/`
    pub listing_url: String,
    pub source: SourceKind,
    pub ids_path: PathBuf,
    pub houses_path: PathBuf,
    pub save_every: usize,
    pub request_timeout: Duration,
    pub wait: bool,
    pub debug_dir: Option<PathBuf>,
}

impl ScoutConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            base_url: env::var("SCOUT_BASE_URL")
                .context("SCOUT_BASE_URL must be set")?,
            listing_url: env::var("SCOUT_LISTING_URL")
                .unwrap_or_else(|_| "https://www.idealista.com/inmueble".to_string()),
            source: env::var("SCOUT_SOURCE")
                .unwrap_or_else(|_| "browser".to_string())
                .parse()
                .context("SCOUT_SOURCE must be 'browser' or 'http'")?,
            ids_path: env::var("SCOUT_IDS_PATH")
                .unwrap_or_else(|_| "data/results/house_ids.csv".to_string())
                .into(),
            houses_path: env::var("SCOUT_HOUSES_PATH")
                .unwrap_or_else(|_| "data/results/houses_df.csv".to_string())
                .into(),
            save_every: env::var("SCOUT_SAVE_EVERY")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("SCOUT_SAVE_EVERY must be a valid number")?,
            request_timeout: Duration::from_secs(
                env::var("SCOUT_REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .context("SCOUT_REQUEST_TIMEOUT_SECS must be a valid number")?,
            ),
            wait: parse_switch(&env::var("SCOUT_WAIT").unwrap_or_else(|_| "on".to_string()))
                .context("SCOUT_WAIT must be 'on' or 'off'")?,
            debug_dir: env::var("SCOUT_DEBUG_DIR").ok().map(PathBuf::from),
        })
    }
}

fn parse_switch(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Ok(true),
        "off" | "false" | "0" | "no" => Ok(false),
        other => anyhow::bail!("unexpected switch value '{}'", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_switch() {
        assert!(parse_switch("ON").unwrap());
        assert!(!parse_switch(" off ").unwrap());
        assert!(parse_switch("maybe").is_err());
    }
}
