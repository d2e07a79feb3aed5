//! Test utilities: mock implementations of the core traits.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! Shared state uses `Arc<Mutex<_>>` so tests can assert on recorded calls.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::{ListingFields, RawListing};
use crate::traits::{Fetcher, ListingExtractor};

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that returns queued responses and records requested URLs.
#[derive(Clone)]
pub struct MockFetcher {
    /// Queue of responses. Each call pops the first element.
    /// If empty, returns a default HTML string.
    responses: Arc<Mutex<Vec<Result<String, AppError>>>>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new(html: &str) -> Self {
        Self::with_responses(vec![Ok(html.to_string())])
    }

    pub fn with_error(error: AppError) -> Self {
        Self::with_responses(vec![Err(error)])
    }

    pub fn with_responses(responses: Vec<Result<String, AppError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        self.requested.lock().unwrap().push(url.to_string());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("<html><body>default</body></html>".to_string())
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockExtractor
// ---------------------------------------------------------------------------

/// Mock extractor keyed by page body.
///
/// `split_page` yields one listing per registered field set, tagged
/// `<page>#<index>`; `extract_fields` resolves the tag back to the fields.
/// Unknown pages have no listings and unknown listings have no fields.
#[derive(Clone, Default)]
pub struct MockExtractor {
    pages: HashMap<String, Vec<ListingFields>>,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, html: &str, listings: Vec<ListingFields>) -> Self {
        self.pages.insert(html.to_string(), listings);
        self
    }
}

impl ListingExtractor for MockExtractor {
    fn split_page(&self, html: &str) -> Vec<RawListing> {
        let count = self.pages.get(html).map_or(0, Vec::len);
        (0..count)
            .map(|i| RawListing::new(format!("{html}#{i}")))
            .collect()
    }

    fn extract_fields(&self, listing: &RawListing) -> ListingFields {
        listing
            .html
            .rsplit_once('#')
            .and_then(|(page, index)| {
                let index: usize = index.parse().ok()?;
                self.pages.get(page)?.get(index).cloned()
            })
            .unwrap_or_default()
    }
}
