use serde::{Deserialize, Serialize};

/// Unparsed markup for one scraped job posting.
///
/// Produced per page fetch and handed straight to the extractor; never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawListing {
    pub html: String,
}

impl RawListing {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

/// Field texts pulled out of one listing, before any cleaning.
///
/// Every field is optional: a selector miss leaves it `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFields {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    /// Skills/requirements/description text used for skill matching.
    pub description: Option<String>,
}

/// Canonical structured row derived from one listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedJobRecord {
    pub title: Option<String>,
    pub company: Option<String>,
    pub raw_location: Option<String>,
    /// First comma-separated token of `raw_location`, trimmed.
    pub city: Option<String>,
    /// Display names of matched skills, in vocabulary order, without duplicates.
    pub skills: Vec<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
}

impl NormalizedJobRecord {
    /// Whether any salary bound was recovered.
    pub fn has_salary(&self) -> bool {
        self.salary_min.is_some() || self.salary_max.is_some()
    }
}

/// One `(label, count)` row of a top-N table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub label: String,
    pub count: usize,
}

impl RankedEntry {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}
