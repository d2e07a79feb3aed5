//! Cleaning and coercion of extracted listing fields into [`NormalizedJobRecord`]s.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ListingFields, NormalizedJobRecord};
use crate::skills::SkillVocabulary;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_EDGE_NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\W+|\W+$").unwrap());
static RE_LOCATION_JUNK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s,.-]").unwrap());
static RE_SALARY_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:-|–|—|to)\s*(\d+(?:\.\d+)?)").unwrap()
});
static RE_EXPERIENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+(?:\.\d+)?\s*(?:(?:-|–|—|to)\s*\d+(?:\.\d+)?\s*)?\+?\s*(?:years?|yrs?)\b").unwrap()
});
static RE_SALARY_FIGURE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥', '₹'];

/// Lower and upper salary bound recovered from free text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

/// Builds [`NormalizedJobRecord`]s from extracted fields.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    vocabulary: SkillVocabulary,
}

impl Normalizer {
    pub fn new(vocabulary: SkillVocabulary) -> Self {
        Self { vocabulary }
    }

    /// Produce exactly one record for one listing. Never fails: anything that
    /// cannot be recovered is left absent.
    pub fn normalize(&self, fields: &ListingFields) -> NormalizedJobRecord {
        let title = fields.title.as_deref().and_then(clean_title);
        let company = fields.company.as_deref().and_then(clean_company);
        let raw_location = fields.location.as_deref().and_then(clean_location);
        let city = raw_location.as_deref().and_then(derive_city);

        let salary = fields.salary.as_deref().and_then(parse_salary);

        let skill_text = [fields.title.as_deref(), fields.description.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let skills = self.vocabulary.match_text(&skill_text);

        NormalizedJobRecord {
            title,
            company,
            raw_location,
            city,
            skills,
            salary_min: salary.map(|s| s.min),
            salary_max: salary.map(|s| s.max),
        }
    }
}

/// Collapse runs of whitespace to a single space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text, " ").trim().to_string()
}

pub fn clean_title(text: &str) -> Option<String> {
    non_empty(collapse_whitespace(text))
}

/// Collapse whitespace and strip leading/trailing punctuation.
pub fn clean_company(text: &str) -> Option<String> {
    let collapsed = collapse_whitespace(text);
    non_empty(RE_EDGE_NON_WORD.replace_all(&collapsed, "").into_owned())
}

/// Drop anything other than word characters, spaces, commas, dots and
/// hyphens, then collapse whitespace.
pub fn clean_location(text: &str) -> Option<String> {
    let stripped = RE_LOCATION_JUNK.replace_all(text, "");
    non_empty(collapse_whitespace(&stripped))
}

/// The text before the first comma, trimmed. Empty results are absent.
pub fn derive_city(location: &str) -> Option<String> {
    let head = location.split(',').next().unwrap_or_default();
    non_empty(head.trim().to_string())
}

/// Coerce free salary text into a numeric range.
///
/// Currency symbols and thousand separators are ignored, and experience
/// figures ("2-4 years", "5+ yrs") are skipped. Two numbers joined by a dash
/// or "to" form a range; otherwise the first number is used for both bounds.
/// Returns `None` when the text holds no number at all.
pub fn parse_salary(text: &str) -> Option<SalaryRange> {
    let cleaned = strip_thousand_separators(&text.replace(CURRENCY_SYMBOLS, ""));
    let cleaned = RE_EXPERIENCE.replace_all(&cleaned, "");

    if let Some(caps) = RE_SALARY_RANGE.captures(&cleaned) {
        let a: f64 = caps[1].parse().ok()?;
        let b: f64 = caps[2].parse().ok()?;
        return Some(SalaryRange {
            min: a.min(b),
            max: a.max(b),
        });
    }

    let figure: f64 = RE_SALARY_FIGURE.find(&cleaned)?.as_str().parse().ok()?;
    Some(SalaryRange {
        min: figure,
        max: figure,
    })
}

/// Remove commas that sit between two digits ("1,20,000" -> "120000").
fn strip_thousand_separators(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            if c != ',' {
                return true;
            }
            let prev_digit = i > 0 && chars[i - 1].is_ascii_digit();
            let next_digit = chars.get(i + 1).is_some_and(char::is_ascii_digit);
            !(prev_digit && next_digit)
        })
        .map(|(_, &c)| c)
        .collect()
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}
