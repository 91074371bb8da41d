// src/types/job.rs
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Salary text used when a posting does not state one.
pub const SALARY_NOT_STATED: &str = "N/C";
/// Link value used when a card carries no offer URL.
pub const LINK_NOT_FOUND: &str = "not found";

/// One posting as scraped from the listings site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    pub raw_salary: String,
    pub description: String,
    pub link: String,
}

impl Default for JobRecord {
    fn default() -> Self {
        Self {
            title: String::new(),
            company: String::new(),
            location: String::new(),
            raw_salary: SALARY_NOT_STATED.to_string(),
            description: String::new(),
            link: LINK_NOT_FOUND.to_string(),
        }
    }
}

/// A [`JobRecord`] decorated with the ranking signals.
///
/// The derived fields are only reachable through constructors that keep
/// them consistent: the complexity is the number of matched keywords and
/// the ratio exists only for a positive salary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedJob {
    #[serde(flatten)]
    pub record: JobRecord,
    matched_keywords: Vec<String>,
    technical_complexity: usize,
    estimated_annual_salary: f64,
    task_to_salary_ratio: Option<f64>,
}

impl RankedJob {
    pub fn new(record: JobRecord, matched_keywords: Vec<String>, estimated_annual_salary: f64) -> Self {
        let estimated_annual_salary = estimated_annual_salary.max(0.0).min(f64::MAX);
        let technical_complexity = matched_keywords.len();

        Self {
            record,
            task_to_salary_ratio: task_to_salary_ratio(technical_complexity, estimated_annual_salary),
            matched_keywords,
            technical_complexity,
            estimated_annual_salary,
        }
    }

    /// Rebuild a ranked job from persisted columns, rejecting rows whose
    /// derived values contradict each other.
    pub fn from_persisted(
        record: JobRecord,
        matched_keywords: Vec<String>,
        technical_complexity: usize,
        estimated_annual_salary: f64,
        task_to_salary_ratio: Option<f64>,
    ) -> Result<Self> {
        if technical_complexity != matched_keywords.len() {
            anyhow::bail!(
                "technical_complexity is {} but {} keywords are listed",
                technical_complexity,
                matched_keywords.len()
            );
        }
        if !(estimated_annual_salary >= 0.0) || !estimated_annual_salary.is_finite() {
            anyhow::bail!(
                "estimated_annual_salary must be finite and non-negative, got {}",
                estimated_annual_salary
            );
        }
        match (estimated_annual_salary > 0.0, task_to_salary_ratio) {
            (true, None) => anyhow::bail!("task_to_salary_ratio is missing for a positive salary"),
            (false, Some(ratio)) => {
                anyhow::bail!("task_to_salary_ratio {} given for a zero salary", ratio)
            }
            _ => {}
        }

        Ok(Self {
            record,
            matched_keywords,
            technical_complexity,
            estimated_annual_salary,
            task_to_salary_ratio,
        })
    }

    pub fn matched_keywords(&self) -> &[String] {
        &self.matched_keywords
    }

    pub fn technical_complexity(&self) -> usize {
        self.technical_complexity
    }

    pub fn estimated_annual_salary(&self) -> f64 {
        self.estimated_annual_salary
    }

    /// `None` when the salary could not be normalized.
    pub fn task_to_salary_ratio(&self) -> Option<f64> {
        self.task_to_salary_ratio
    }
}

/// Complexity per unit of annual salary, rounded to 8 decimal places.
///
/// Rounding goes through the exact decimal expansion with ties to even.
pub fn task_to_salary_ratio(technical_complexity: usize, estimated_annual_salary: f64) -> Option<f64> {
    if !(estimated_annual_salary > 0.0) {
        return None;
    }
    let ratio = technical_complexity as f64 / estimated_annual_salary;
    format!("{:.8}", ratio).parse().ok()
}
