use std::time::Duration;

use url::Url;

use crate::error::AppError;
use crate::throttle::ThrottleConfig;

/// Validated settings for one live scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: Url,
    pub query: String,
    pub pages: u32,
    pub timeout: Duration,
    pub throttle: ThrottleConfig,
}

impl ScrapeConfig {
    /// Validate the run target.
    ///
    /// - `base_url` must be an absolute `http`/`https` URL
    /// - `query` must not be blank
    /// - `pages` must be at least 1
    pub fn new(base_url: &str, query: &str, pages: u32) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::ConfigError(format!("Invalid base URL '{base_url}': {e}")))?;

        match base_url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(AppError::ConfigError(format!(
                    "Base URL scheme '{scheme}' is not allowed (only http/https)"
                )));
            }
        }
        if base_url.host_str().is_none() {
            return Err(AppError::ConfigError("Base URL has no host".into()));
        }

        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::ConfigError("Search query must not be empty".into()));
        }
        if pages == 0 {
            return Err(AppError::ConfigError("Page count must be at least 1".into()));
        }

        Ok(Self {
            base_url,
            query: query.to_string(),
            pages,
            timeout: Duration::from_secs(10),
            throttle: ThrottleConfig::default(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_throttle(mut self, throttle: ThrottleConfig) -> Self {
        self.throttle = throttle;
        self
    }

    /// `<base>/search?q=<query>&page=<page>`, with spaces in the query sent as `+`.
    pub fn search_url(&self, page: u32) -> String {
        let mut url = self.base_url.clone();
        let path = format!("{}/search", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url.query_pairs_mut()
            .clear()
            .append_pair("q", &self.query)
            .append_pair("page", &page.to_string());
        url.to_string()
    }
}
