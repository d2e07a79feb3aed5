//! Flat CSV persistence of normalized records.
//!
//! Column order is fixed so a file written by one run can be read back as
//! the input of a later `analyze` run.

use std::io::{Read, Write};
use std::path::Path;

use jobscope_core::error::AppError;
use jobscope_core::models::NormalizedJobRecord;
use serde::{Deserialize, Serialize};

/// Separator between skill names inside the `skills` column.
pub const SKILL_SEPARATOR: &str = ";";

/// Header row, in column order.
pub const COLUMNS: [&str; 8] = [
    "title",
    "company",
    "location",
    "city",
    "skills",
    "salary_min",
    "salary_max",
    "has_salary",
];

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    city: Option<String>,
    skills: String,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
    /// Written for downstream consumers; recomputed from the bounds on read.
    has_salary: bool,
}

impl From<&NormalizedJobRecord> for CsvRow {
    fn from(record: &NormalizedJobRecord) -> Self {
        Self {
            title: record.title.clone(),
            company: record.company.clone(),
            location: record.raw_location.clone(),
            city: record.city.clone(),
            skills: record.skills.join(SKILL_SEPARATOR),
            salary_min: record.salary_min,
            salary_max: record.salary_max,
            has_salary: record.has_salary(),
        }
    }
}

impl From<CsvRow> for NormalizedJobRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            title: row.title,
            company: row.company,
            raw_location: row.location,
            city: row.city,
            skills: row
                .skills
                .split(SKILL_SEPARATOR)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            salary_min: row.salary_min,
            salary_max: row.salary_max,
        }
    }
}

/// Write records as CSV to any writer. The header is always written, even
/// for an empty collection.
pub fn write_records<W: Write>(writer: W, records: &[NormalizedJobRecord]) -> Result<(), AppError> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv.write_record(COLUMNS).map_err(storage_err)?;
    for record in records {
        csv.serialize(CsvRow::from(record)).map_err(storage_err)?;
    }
    csv.flush().map_err(|e| AppError::StorageError(e.to_string()))
}

/// Read records previously written by [`write_records`].
pub fn read_records<R: Read>(reader: R) -> Result<Vec<NormalizedJobRecord>, AppError> {
    let mut csv = csv::Reader::from_reader(reader);
    csv.deserialize::<CsvRow>()
        .map(|row| row.map(NormalizedJobRecord::from).map_err(storage_err))
        .collect()
}

pub fn save_csv(path: &Path, records: &[NormalizedJobRecord]) -> Result<(), AppError> {
    let file = std::fs::File::create(path).map_err(|e| {
        AppError::StorageError(format!("Failed to create {}: {e}", path.display()))
    })?;
    write_records(file, records)?;
    tracing::info!(path = %path.display(), rows = records.len(), "Data saved");
    Ok(())
}

pub fn load_csv(path: &Path) -> Result<Vec<NormalizedJobRecord>, AppError> {
    let file = std::fs::File::open(path).map_err(|e| {
        AppError::StorageError(format!("Failed to open {}: {e}", path.display()))
    })?;
    let records = read_records(file)?;
    tracing::info!(path = %path.display(), rows = records.len(), "Data loaded");
    Ok(records)
}

fn storage_err(e: csv::Error) -> AppError {
    AppError::StorageError(e.to_string())
}
