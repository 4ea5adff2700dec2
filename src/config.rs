//! Runtime configuration resolved from the command line

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_DEBOUNCE_MS: u64 = 2000;

/// Settings the reducer needs to build requests and schedule the filter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// API root, without trailing slash
    pub base_url: String,
    /// Records per page; `None` uses the API default
    pub page_size: Option<u32>,
    /// Quiet period before a typed query is applied
    pub debounce_ms: u64,
}

impl BrowserConfig {
    pub fn new(base_url: impl Into<String>, page_size: Option<u32>, debounce_ms: u64) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            page_size,
            debounce_ms,
        }
    }

    /// URL of the first list page
    pub fn start_url(&self) -> String {
        match self.page_size {
            Some(limit) => format!("{}/pokemon/?limit={limit}", self.base_url),
            None => format!("{}/pokemon/", self.base_url),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, None, DEFAULT_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_start_url() {
        let config = BrowserConfig::default();
        assert_eq!(config.start_url(), "https://pokeapi.co/api/v2/pokemon/");
        assert_eq!(config.debounce_ms, 2000);
    }

    #[test]
    fn test_page_size_and_trailing_slash() {
        let config = BrowserConfig::new("http://localhost:8080/api/", Some(50), 10);
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(
            config.start_url(),
            "http://localhost:8080/api/pokemon/?limit=50"
        );
    }
}
