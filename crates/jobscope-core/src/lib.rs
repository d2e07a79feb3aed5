pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod report;
pub mod sample;
pub mod scrape;
pub mod skills;
pub mod throttle;
pub mod traits;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::ScrapeConfig;
pub use error::AppError;
pub use models::{ListingFields, NormalizedJobRecord, RankedEntry, RawListing};
pub use normalize::Normalizer;
pub use report::{AggregateReport, ReportLimits};
pub use scrape::{ScrapeOutcome, ScrapeService};
pub use skills::SkillVocabulary;
pub use traits::{Fetcher, ListingExtractor};
