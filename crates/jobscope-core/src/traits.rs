use std::future::Future;

use crate::error::AppError;
use crate::models::{ListingFields, RawListing};

/// Fetches raw HTML content from a URL.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Turns fetched pages into listings, and listings into field texts.
///
/// Both operations are infallible: a page without recognisable containers
/// yields no listings, and a listing without a matching selector yields
/// `None` for that field.
pub trait ListingExtractor: Send + Sync + Clone {
    /// Split one search results page into per-job markup fragments.
    fn split_page(&self, html: &str) -> Vec<RawListing>;

    /// Pull the title, company, location, salary and description out of one listing.
    fn extract_fields(&self, listing: &RawListing) -> ListingFields;
}
