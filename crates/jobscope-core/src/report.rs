//! Terminal aggregation over a run's records, and the console summary.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::error::AppError;
use crate::models::{NormalizedJobRecord, RankedEntry};

/// Sizes of the top-N tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportLimits {
    pub cities: usize,
    pub skills: usize,
    pub companies: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            cities: 5,
            skills: 10,
            companies: 6,
        }
    }
}

/// Summary statistics computed once over all records of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    pub total_jobs: usize,
    pub unique_companies: usize,
    pub unique_locations: usize,
    pub jobs_with_salary: usize,
    pub top_cities: Vec<RankedEntry>,
    pub top_skills: Vec<RankedEntry>,
    pub top_companies: Vec<RankedEntry>,
    pub limits: ReportLimits,
}

impl AggregateReport {
    pub fn from_records(records: &[NormalizedJobRecord], limits: ReportLimits) -> Self {
        let companies = || records.iter().filter_map(|r| trimmed(r.company.as_deref()));
        let locations = records
            .iter()
            .filter_map(|r| trimmed(r.raw_location.as_deref()));
        let cities = records.iter().filter_map(|r| trimmed(r.city.as_deref()));
        // Skills are already unique per record, so this counts records, not occurrences.
        let skills = records.iter().flat_map(|r| r.skills.iter().map(String::as_str));

        Self {
            total_jobs: records.len(),
            unique_companies: companies().collect::<HashSet<_>>().len(),
            unique_locations: locations.collect::<HashSet<_>>().len(),
            jobs_with_salary: records.iter().filter(|r| r.has_salary()).count(),
            top_cities: top_n(cities, limits.cities),
            top_skills: top_n(skills, limits.skills),
            top_companies: top_n(companies(), limits.companies),
            limits,
        }
    }

    /// Pretty-printed JSON form of the report.
    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Count keys and keep the `n` most frequent, ties in first-seen order.
pub fn top_n<'a>(keys: impl IntoIterator<Item = &'a str>, n: usize) -> Vec<RankedEntry> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<RankedEntry> = Vec::new();

    for key in keys {
        match index.get(key).copied() {
            Some(i) => counts[i].count += 1,
            None => {
                index.insert(key, counts.len());
                counts.push(RankedEntry::new(key, 1));
            }
        }
    }

    // sort_by is stable, so equal counts keep insertion order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(n);
    counts
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl fmt::Display for AggregateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== JOB SCRAPING SUMMARY ===")?;
        writeln!(f, "Total jobs scraped: {}", self.total_jobs)?;
        writeln!(f, "Unique companies: {}", self.unique_companies)?;
        writeln!(f, "Unique locations: {}", self.unique_locations)?;
        writeln!(f, "Jobs with salary info: {}", self.jobs_with_salary)?;
        writeln!(f)?;

        writeln!(f, "=== TOP {} JOB LOCATIONS ===", self.limits.cities)?;
        for entry in &self.top_cities {
            writeln!(f, "{}: {} jobs", entry.label, entry.count)?;
        }
        writeln!(f)?;

        writeln!(f, "=== TOP {} IN-DEMAND SKILLS ===", self.limits.skills)?;
        for entry in &self.top_skills {
            writeln!(f, "{}: {} mentions", entry.label, entry.count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(company: Option<&str>, location: Option<&str>, skills: &[&str]) -> NormalizedJobRecord {
        NormalizedJobRecord {
            title: Some("Data Analyst".into()),
            company: company.map(String::from),
            raw_location: location.map(String::from),
            city: location.and_then(crate::normalize::derive_city),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            salary_min: None,
            salary_max: None,
        }
    }

    #[test]
    fn top_n_sorts_descending_with_first_seen_ties() {
        let ranked = top_n(["b", "a", "c", "a", "c", "d"], 10);
        let labels: Vec<_> = ranked.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "c", "b", "d"]);
        assert_eq!(ranked[0].count, 2);
        assert_eq!(ranked[3].count, 1);
    }

    #[test]
    fn top_n_respects_limit() {
        let keys = ["a", "b", "c", "d", "e", "f", "g"];
        for n in 0..10 {
            assert!(top_n(keys, n).len() <= n);
        }
        assert!(top_n(Vec::<&str>::new(), 5).is_empty());
    }

    #[test]
    fn empty_collection_yields_zero_report() {
        let report = AggregateReport::from_records(&[], ReportLimits::default());
        assert_eq!(report.total_jobs, 0);
        assert_eq!(report.unique_companies, 0);
        assert_eq!(report.unique_locations, 0);
        assert_eq!(report.jobs_with_salary, 0);
        assert!(report.top_cities.is_empty());
        assert!(report.top_skills.is_empty());
        assert!(report.top_companies.is_empty());
    }

    #[test]
    fn json_form_carries_counts_and_tables() {
        let records = vec![record(Some("Acme"), Some("Pune, Maharashtra"), &["Sql"])];
        let report = AggregateReport::from_records(&records, ReportLimits::default());
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["total_jobs"], 1);
        assert_eq!(json["top_cities"][0]["label"], "Pune");
        assert_eq!(json["top_skills"][0]["count"], 1);
        assert_eq!(json["limits"]["companies"], 6);
    }

    #[test]
    fn absent_location_is_not_counted() {
        let records = vec![
            record(Some("Acme"), Some("Pune, Maharashtra"), &[]),
            record(Some("Globex"), None, &[]),
        ];
        let report = AggregateReport::from_records(&records, ReportLimits::default());
        assert_eq!(report.total_jobs, 2);
        assert_eq!(report.unique_locations, 1);
        assert_eq!(report.top_cities, vec![RankedEntry::new("Pune", 1)]);
    }

    #[test]
    fn grouping_is_exact_after_trim() {
        let records = vec![
            record(Some("Acme"), None, &[]),
            record(Some(" Acme "), None, &[]),
            record(Some("ACME"), None, &[]),
        ];
        let report = AggregateReport::from_records(&records, ReportLimits::default());
        assert_eq!(report.unique_companies, 2);
        assert_eq!(report.top_companies[0], RankedEntry::new("Acme", 2));
        assert_eq!(report.top_companies[1], RankedEntry::new("ACME", 1));
    }

    #[test]
    fn skills_count_records() {
        let records = vec![
            record(None, None, &["Sql", "Python"]),
            record(None, None, &["Sql"]),
            record(None, None, &["Excel"]),
        ];
        let report = AggregateReport::from_records(&records, ReportLimits::default());
        assert_eq!(
            report.top_skills,
            vec![
                RankedEntry::new("Sql", 2),
                RankedEntry::new("Python", 1),
                RankedEntry::new("Excel", 1),
            ]
        );
    }

    #[test]
    fn summary_text_layout() {
        let records = vec![
            record(Some("Acme"), Some("Pune, Maharashtra"), &["Sql"]),
            record(Some("Globex"), Some("Pune, Maharashtra"), &["Sql", "Excel"]),
        ];
        let report = AggregateReport::from_records(&records, ReportLimits::default());
        let expected = "\
=== JOB SCRAPING SUMMARY ===
Total jobs scraped: 2
Unique companies: 2
Unique locations: 1
Jobs with salary info: 0

=== TOP 5 JOB LOCATIONS ===
Pune: 2 jobs

=== TOP 10 IN-DEMAND SKILLS ===
Sql: 2 mentions
Excel: 1 mentions
";
        assert_eq!(report.to_string(), expected);
    }
}
