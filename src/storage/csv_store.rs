// src/storage/csv_store.rs
//! Semicolon-separated, UTF-8 (with BOM) tables of job records.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::collections::HashMap;
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::types::{JobRecord, RankedJob, LINK_NOT_FOUND, SALARY_NOT_STATED};

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
pub const DELIMITER: u8 = b';';
pub const KEYWORD_SEPARATOR: &str = ", ";

pub const RAW_COLUMNS: [&str; 6] = [
    "title",
    "company",
    "location",
    "raw_salary",
    "description",
    "link",
];

pub const DERIVED_COLUMNS: [&str; 4] = [
    "matched_keywords",
    "technical_complexity",
    "estimated_annual_salary",
    "task_to_salary_ratio",
];

/// An input table the current step depends on has not been produced yet.
#[derive(Debug)]
pub struct MissingPrerequisite {
    pub path: PathBuf,
    pub produced_by: &'static str,
}

impl fmt::Display for MissingPrerequisite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "missing prerequisite file '{}'. Run `job-kpi {}` first.",
            self.path.display(),
            self.produced_by
        )
    }
}

impl std::error::Error for MissingPrerequisite {}

/// Fail with [`MissingPrerequisite`] when `path` does not exist.
pub fn ensure_prerequisite(path: &Path, produced_by: &'static str) -> Result<()> {
    if !path.exists() {
        return Err(MissingPrerequisite {
            path: path.to_path_buf(),
            produced_by,
        }
        .into());
    }
    Ok(())
}

/// Header name to column position, built once per file.
struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    fn new(headers: &StringRecord) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();
        Self { positions }
    }

    fn missing<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|column| !self.positions.contains_key(*column))
            .collect()
    }

    fn get<'r>(&self, row: &'r StringRecord, column: &str) -> Option<&'r str> {
        self.positions.get(column).and_then(|&i| row.get(i))
    }

    fn cell<'r>(&self, row: &'r StringRecord, column: &str) -> &'r str {
        self.get(row, column).unwrap_or("").trim()
    }

    fn text_or(&self, row: &StringRecord, column: &str, default: &str) -> String {
        match self.get(row, column) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => default.to_string(),
        }
    }

    fn job_record(&self, row: &StringRecord) -> JobRecord {
        JobRecord {
            title: self.text_or(row, "title", ""),
            company: self.text_or(row, "company", ""),
            location: self.text_or(row, "location", ""),
            raw_salary: self.text_or(row, "raw_salary", SALARY_NOT_STATED),
            description: self.text_or(row, "description", ""),
            link: self.text_or(row, "link", LINK_NOT_FOUND),
        }
    }
}

fn raw_row(record: &JobRecord) -> [&str; 6] {
    [
        &record.title,
        &record.company,
        &record.location,
        &record.raw_salary,
        &record.description,
        &record.link,
    ]
}

fn ranked_row(job: &RankedJob) -> Vec<String> {
    let mut row: Vec<String> = raw_row(&job.record).iter().map(|s| s.to_string()).collect();
    row.push(job.matched_keywords().join(KEYWORD_SEPARATOR));
    row.push(job.technical_complexity().to_string());
    row.push(job.estimated_annual_salary().to_string());
    row.push(
        job.task_to_salary_ratio()
            .map(|ratio| ratio.to_string())
            .unwrap_or_default(),
    );
    row
}

/// Split a persisted keyword cell. Also accepts the bracketed list form
/// `['python', 'sql']` written by older exports.
pub fn parse_keyword_list(cell: &str) -> Vec<String> {
    let cell = cell.trim();
    let inner = cell
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(cell);

    inner
        .split(',')
        .map(|part| part.trim().trim_matches(|c| c == '\'' || c == '"'))
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn open_writer(path: &Path) -> Result<csv::Writer<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;
    file.write_all(UTF8_BOM)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(WriterBuilder::new().delimiter(DELIMITER).from_writer(file))
}

fn read_table(path: &Path, produced_by: &'static str) -> Result<(StringRecord, Vec<StringRecord>)> {
    ensure_prerequisite(path, produced_by)?;

    let bytes = fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .flexible(true)
        .from_reader(content);

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header row of {}", path.display()))?
        .clone();

    let rows = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok((headers, rows))
}

/// Write raw scraped records.
pub fn write_jobs(path: &Path, records: &[JobRecord]) -> Result<()> {
    let mut writer = open_writer(path)?;
    writer.write_record(RAW_COLUMNS)?;
    for record in records {
        writer.write_record(raw_row(record))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    info!("Wrote {} offers to {}", records.len(), path.display());
    Ok(())
}

/// Write decorated records with the derived columns appended.
pub fn write_ranked(path: &Path, jobs: &[RankedJob]) -> Result<()> {
    let mut writer = open_writer(path)?;
    writer.write_record(RAW_COLUMNS.iter().chain(DERIVED_COLUMNS.iter()))?;
    for job in jobs {
        writer.write_record(ranked_row(job))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    info!("Wrote {} ranked offers to {}", jobs.len(), path.display());
    Ok(())
}

/// Read raw records. Absent columns and empty cells fall back to the
/// record defaults; unknown columns are ignored.
pub fn read_jobs(path: &Path) -> Result<Vec<JobRecord>> {
    let (headers, rows) = read_table(path, "scrape")?;
    let index = ColumnIndex::new(&headers);

    let missing = index.missing(&RAW_COLUMNS);
    if !missing.is_empty() {
        warn!(
            "{} has no column(s) {}, using defaults",
            path.display(),
            missing.join(", ")
        );
    }

    Ok(rows.iter().map(|row| index.job_record(row)).collect())
}

/// Read ranked records, requiring every raw and derived column.
pub fn read_ranked(path: &Path) -> Result<Vec<RankedJob>> {
    let (headers, rows) = read_table(path, "rank --mode efficiency")?;
    let index = ColumnIndex::new(&headers);

    let required: Vec<&str> = RAW_COLUMNS.iter().chain(DERIVED_COLUMNS.iter()).copied().collect();
    let missing = index.missing(&required);
    if !missing.is_empty() {
        anyhow::bail!(
            "{} is not a ranked offers table: missing column(s) {}",
            path.display(),
            missing.join(", ")
        );
    }

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            // header is line 1
            ranked_from_row(&index, row)
                .with_context(|| format!("{}: invalid row at line {}", path.display(), i + 2))
        })
        .collect()
}

fn ranked_from_row(index: &ColumnIndex, row: &StringRecord) -> Result<RankedJob> {
    let cell = |column| index.cell(row, column);

    let matched = parse_keyword_list(cell("matched_keywords"));
    let complexity: usize = cell("technical_complexity")
        .parse()
        .with_context(|| format!("technical_complexity: '{}'", cell("technical_complexity")))?;
    let salary: f64 = cell("estimated_annual_salary")
        .parse()
        .with_context(|| format!("estimated_annual_salary: '{}'", cell("estimated_annual_salary")))?;
    let ratio = match cell("task_to_salary_ratio") {
        "" => None,
        value => Some(
            value
                .parse::<f64>()
                .with_context(|| format!("task_to_salary_ratio: '{}'", value))?,
        ),
    };

    RankedJob::from_persisted(index.job_record(row), matched, complexity, salary, ratio)
}
