pub mod chart;
pub mod extractor;
pub mod fetcher;
pub mod store;

pub use chart::ReportLayout;
pub use extractor::HtmlListingExtractor;
pub use fetcher::ReqwestFetcher;
