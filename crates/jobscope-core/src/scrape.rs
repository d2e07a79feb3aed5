use crate::config::ScrapeConfig;
use crate::error::AppError;
use crate::models::{NormalizedJobRecord, RawListing};
use crate::normalize::Normalizer;
use crate::traits::{Fetcher, ListingExtractor};

/// Records collected by one run plus page bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct ScrapeOutcome {
    pub records: Vec<NormalizedJobRecord>,
    pub pages_fetched: u32,
    pub pages_failed: u32,
}

/// Orchestrates the scrape pipeline: fetch page → split listings → extract → normalize.
///
/// Generic over the fetcher and extractor so tests can run without HTTP.
/// Pages are fetched one after another; pacing is the fetcher's concern
/// (see [`crate::throttle::ThrottledFetcher`]).
pub struct ScrapeService<F, X>
where
    F: Fetcher,
    X: ListingExtractor,
{
    fetcher: F,
    extractor: X,
    normalizer: Normalizer,
}

impl<F, X> ScrapeService<F, X>
where
    F: Fetcher,
    X: ListingExtractor,
{
    pub fn new(fetcher: F, extractor: X, normalizer: Normalizer) -> Self {
        Self {
            fetcher,
            extractor,
            normalizer,
        }
    }

    /// Fetch every search results page named by `config` and normalize the listings.
    ///
    /// A page that fails to download is logged and skipped. Any other error
    /// aborts the run.
    pub async fn scrape(&self, config: &ScrapeConfig) -> Result<ScrapeOutcome, AppError> {
        tracing::info!(query = %config.query, pages = config.pages, "Starting scrape");
        let mut outcome = ScrapeOutcome::default();

        for page in 1..=config.pages {
            let url = config.search_url(page);
            tracing::info!("Scraping page {} ({})", page, url);

            let html = match self.fetcher.fetch(&url).await {
                Ok(html) => html,
                Err(e) if e.is_page_local() => {
                    tracing::warn!(page, error = %e, "Error scraping page, skipping");
                    outcome.pages_failed += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };
            outcome.pages_fetched += 1;

            let records = self.process_page(&html);
            tracing::info!("Found {} jobs on page {}", records.len(), page);
            outcome.records.extend(records);
        }

        tracing::info!(
            total = outcome.records.len(),
            pages_fetched = outcome.pages_fetched,
            pages_failed = outcome.pages_failed,
            "Scrape complete"
        );
        Ok(outcome)
    }

    /// Split one page into listings and normalize each of them.
    pub fn process_page(&self, html: &str) -> Vec<NormalizedJobRecord> {
        let listings = self.extractor.split_page(html);
        self.normalize_listings(&listings)
    }

    /// One record per listing, in input order.
    pub fn normalize_listings(&self, listings: &[RawListing]) -> Vec<NormalizedJobRecord> {
        listings
            .iter()
            .map(|listing| {
                let fields = self.extractor.extract_fields(listing);
                self.normalizer.normalize(&fields)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::ListingFields;
    use crate::testutil::*;
    use crate::throttle::ThrottleConfig;

    fn config(pages: u32) -> ScrapeConfig {
        ScrapeConfig::new("https://jobs.example.com", "data analyst", pages)
            .unwrap()
            .with_throttle(ThrottleConfig::new(Duration::ZERO))
    }

    fn listing(title: &str, location: &str) -> ListingFields {
        ListingFields {
            title: Some(title.into()),
            company: Some("Acme".into()),
            location: Some(location.into()),
            salary: Some("4-6 LPA".into()),
            description: Some("SQL".into()),
        }
    }

    #[tokio::test]
    async fn happy_path_collects_all_pages() {
        let extractor = MockExtractor::new()
            .with_page(
                "page-1",
                vec![listing("Data Analyst", "Pune"), listing("BI Analyst", "Delhi")],
            )
            .with_page("page-2", vec![listing("Junior Analyst", "Mumbai")]);
        let fetcher = MockFetcher::with_responses(vec![Ok("page-1".into()), Ok("page-2".into())]);
        let svc = ScrapeService::new(fetcher.clone(), extractor, Normalizer::default());

        let outcome = svc.scrape(&config(2)).await.unwrap();

        assert_eq!(outcome.records.len(), 3);
        assert_eq!(outcome.pages_fetched, 2);
        assert_eq!(outcome.pages_failed, 0);
        assert_eq!(outcome.records[2].city.as_deref(), Some("Mumbai"));
        assert_eq!(
            fetcher.requested(),
            vec![
                "https://jobs.example.com/search?q=data+analyst&page=1",
                "https://jobs.example.com/search?q=data+analyst&page=2",
            ]
        );
    }

    #[tokio::test]
    async fn failed_page_is_skipped() {
        let extractor = MockExtractor::new().with_page("page-2", vec![listing("Data Analyst", "Pune")]);
        let fetcher = MockFetcher::with_responses(vec![
            Err(AppError::HttpError("HTTP 503 for page 1".into())),
            Ok("page-2".into()),
            Err(AppError::Timeout(Duration::from_secs(10))),
        ]);
        let svc = ScrapeService::new(fetcher, extractor, Normalizer::default());

        let outcome = svc.scrape(&config(3)).await.unwrap();

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.pages_fetched, 1);
        assert_eq!(outcome.pages_failed, 2);
    }

    #[tokio::test]
    async fn non_page_error_aborts() {
        let fetcher = MockFetcher::with_error(AppError::ConfigError("broken client".into()));
        let svc = ScrapeService::new(fetcher, MockExtractor::new(), Normalizer::default());

        let err = svc.scrape(&config(2)).await.unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[tokio::test]
    async fn all_pages_failing_yields_empty_outcome() {
        let fetcher = MockFetcher::with_responses(vec![
            Err(AppError::NetworkError("refused".into())),
            Err(AppError::NetworkError("refused".into())),
        ]);
        let svc = ScrapeService::new(fetcher, MockExtractor::new(), Normalizer::default());

        let outcome = svc.scrape(&config(2)).await.unwrap();
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.pages_failed, 2);
    }

    #[test]
    fn every_listing_yields_one_record() {
        let extractor = MockExtractor::new();
        let svc = ScrapeService::new(MockFetcher::new(""), extractor, Normalizer::default());
        let listings = vec![
            RawListing::new("<div></div>"),
            RawListing::new(""),
            RawListing::new("<div class=\"job-card\">?</div>"),
        ];

        let records = svc.normalize_listings(&listings);
        assert_eq!(records.len(), listings.len());
        assert!(records.iter().all(|r| r.title.is_none() && !r.has_salary()));
    }
}
