// src/web/types.rs
use chrono::{DateTime, Utc};
use rocket::FromFormField;
use serde::Serialize;
use std::path::PathBuf;

use crate::types::RankedJob;

/// Shared by every dashboard route.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Efficiency top-N table.
    pub top_csv: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub message: String,
    pub generated_at: DateTime<Utc>,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T) -> Self {
        Self {
            success: true,
            message,
            generated_at: Utc::now(),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: String, error_code: &str, suggestions: Vec<String>) -> Self {
        Self {
            success: false,
            error,
            error_code: error_code.to_string(),
            suggestions,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, FromFormField)]
pub enum View {
    #[default]
    Table,
    Details,
}

/// Inclusive bounds on the estimated annual salary.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SalaryRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl SalaryRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, job: &RankedJob) -> bool {
        let salary = job.estimated_annual_salary();
        self.min.map_or(true, |min| salary >= min) && self.max.map_or(true, |max| salary <= max)
    }

    pub fn apply(&self, jobs: Vec<RankedJob>) -> Vec<RankedJob> {
        jobs.into_iter().filter(|job| self.contains(job)).collect()
    }
}
