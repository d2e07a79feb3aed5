use std::sync::Arc;

use jobscope_core::error::AppError;
use jobscope_core::models::{ListingFields, RawListing};
use jobscope_core::normalize::collapse_whitespace;
use jobscope_core::traits::ListingExtractor;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Listing container selectors, most specific first.
const CONTAINER_SELECTORS: &[&str] = &[
    ".job-listing",
    ".job-card",
    ".job-item",
    ".search-result",
    "[data-job-id]",
];

const TITLE_SELECTORS: &[&str] = &["h2", "h3", ".title", ".job-title", "[data-title]"];
const COMPANY_SELECTORS: &[&str] = &[".company", ".company-name", ".employer", "[data-company]"];
const LOCATION_SELECTORS: &[&str] = &[".location", ".job-location", ".city", "[data-location]"];
const SALARY_SELECTORS: &[&str] = &[".salary", ".pay", ".compensation", "[data-salary]"];
const DESCRIPTION_SELECTORS: &[&str] = &[".skills", ".requirements", ".tags", ".job-description"];

/// One selector attempt for a field.
struct FieldPattern {
    selector: Selector,
    /// For `[data-*]` selectors: attribute to read when the element has no text.
    attribute: Option<String>,
}

impl FieldPattern {
    fn parse(css: &str) -> Result<Self, AppError> {
        let attribute = css
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .map(str::to_string);
        Ok(Self {
            selector: parse_selector(css)?,
            attribute,
        })
    }

    /// Text of the first matching element, if non-empty.
    fn text_in(&self, root: &Html) -> Option<String> {
        let element = root.select(&self.selector).next()?;
        let text = element_text(element);
        if !text.is_empty() {
            return Some(text);
        }
        let value = collapse_whitespace(element.value().attr(self.attribute.as_deref()?)?);
        (!value.is_empty()).then_some(value)
    }
}

struct Patterns {
    containers: Vec<Selector>,
    generic_container: Selector,
    container_class: Regex,
    title: Vec<FieldPattern>,
    company: Vec<FieldPattern>,
    location: Vec<FieldPattern>,
    salary: Vec<FieldPattern>,
    description: Vec<FieldPattern>,
}

/// CSS-selector listing extractor using the scraper crate.
///
/// Pages are split with an ordered list of container selectors; if none
/// matches, any `div`/`article` whose class mentions job, card or listing
/// is taken. Each field then tries its own ordered selector list and keeps
/// the first non-empty text.
pub struct HtmlListingExtractor {
    patterns: Arc<Patterns>,
}

impl Clone for HtmlListingExtractor {
    fn clone(&self) -> Self {
        Self {
            patterns: Arc::clone(&self.patterns),
        }
    }
}

impl HtmlListingExtractor {
    pub fn new() -> Result<Self, AppError> {
        let patterns = Patterns {
            containers: CONTAINER_SELECTORS
                .iter()
                .map(|css| parse_selector(css))
                .collect::<Result<_, _>>()?,
            generic_container: parse_selector("div, article")?,
            container_class: Regex::new(r"job|card|listing")
                .map_err(|e| AppError::ExtractorError(e.to_string()))?,
            title: field_patterns(TITLE_SELECTORS)?,
            company: field_patterns(COMPANY_SELECTORS)?,
            location: field_patterns(LOCATION_SELECTORS)?,
            salary: field_patterns(SALARY_SELECTORS)?,
            description: field_patterns(DESCRIPTION_SELECTORS)?,
        };

        Ok(Self {
            patterns: Arc::new(patterns),
        })
    }
}

impl ListingExtractor for HtmlListingExtractor {
    fn split_page(&self, html: &str) -> Vec<RawListing> {
        let document = Html::parse_document(html);

        for selector in &self.patterns.containers {
            let listings: Vec<RawListing> = document
                .select(selector)
                .map(|el| RawListing::new(el.html()))
                .collect();
            if !listings.is_empty() {
                return listings;
            }
        }

        tracing::debug!("No known listing container matched, falling back to class heuristic");
        document
            .select(&self.patterns.generic_container)
            .filter(|el| {
                el.value()
                    .attr("class")
                    .is_some_and(|class| self.patterns.container_class.is_match(class))
            })
            .map(|el| RawListing::new(el.html()))
            .collect()
    }

    fn extract_fields(&self, listing: &RawListing) -> ListingFields {
        let fragment = Html::parse_fragment(&listing.html);
        let p = &self.patterns;

        ListingFields {
            title: first_text(&fragment, &p.title),
            company: first_text(&fragment, &p.company),
            location: first_text(&fragment, &p.location),
            salary: first_text(&fragment, &p.salary),
            description: first_text(&fragment, &p.description),
        }
    }
}

fn parse_selector(css: &str) -> Result<Selector, AppError> {
    Selector::parse(css).map_err(|e| AppError::ExtractorError(format!("Invalid selector '{css}': {e}")))
}

fn field_patterns(selectors: &[&str]) -> Result<Vec<FieldPattern>, AppError> {
    selectors.iter().map(|css| FieldPattern::parse(css)).collect()
}

fn first_text(root: &Html, patterns: &[FieldPattern]) -> Option<String> {
    patterns.iter().find_map(|pattern| pattern.text_in(root))
}

fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}
