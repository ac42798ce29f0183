use anyhow::{Result, anyhow};
use std::time::Duration;

pub mod constants;
pub mod external;
pub mod service;
pub mod state;
#[cfg(test)]
mod tests;
pub mod ui;

pub use contactbook_core as data;
pub use state::{ContactState, StateEvent};

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST contact store, e.g. `http://localhost:9000/`
    pub store_url: url::Url,
    /// Quiescence window of the contact search in milliseconds
    pub search_debounce_ms: u64,
}

impl Config {
    pub fn new(store_url: &str, search_debounce_ms: Option<u64>) -> Result<Self> {
        let mut store_url =
            url::Url::parse(store_url).map_err(|e| anyhow!("Invalid Store URL: {e}"))?;
        if store_url.cannot_be_a_base() {
            return Err(anyhow!("Invalid Store URL: {store_url} can't be a base"));
        }
        // relative paths are joined onto the last segment, so it has to be a directory
        if !store_url.path().ends_with('/') {
            let path = format!("{}/", store_url.path());
            store_url.set_path(&path);
        }
        Ok(Self {
            store_url,
            search_debounce_ms: search_debounce_ms
                .unwrap_or(constants::DEFAULT_SEARCH_DEBOUNCE_MS),
        })
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn config_appends_trailing_slash() {
        let cfg = Config::new("http://localhost:9000/api", None).unwrap();
        assert_eq!(cfg.store_url.as_str(), "http://localhost:9000/api/");
        assert_eq!(cfg.search_debounce(), Duration::from_millis(1000));
    }

    #[test]
    fn config_keeps_root() {
        let cfg = Config::new("http://localhost:9000", Some(250)).unwrap();
        assert_eq!(cfg.store_url.as_str(), "http://localhost:9000/");
        assert_eq!(cfg.search_debounce_ms, 250);
    }

    #[test]
    fn config_rejects_invalid_url() {
        assert!(Config::new("not a url", None).is_err());
        assert!(Config::new("mailto:someone@example.com", None).is_err());
    }
}
