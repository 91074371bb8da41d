// src/analysis/ranking.rs
//! Ranking of scraped postings.
//!
//! Both modes decorate every record the same way and differ only in how
//! the decorated records are filtered and ordered. Sorting is stable, so
//! equal keys keep their input order.

use std::cmp::Ordering;

use clap::ValueEnum;

use super::keywords::score;
use super::salary::normalize_salary;
use crate::config::RankingConfig;
use crate::types::{JobRecord, RankedJob};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RankingMode {
    /// Most keywords first, then highest salary.
    #[default]
    Technical,
    /// Lowest complexity-to-salary ratio first, top N only.
    Efficiency,
}

/// Decorate one record with its keyword match, salary estimate and ratio.
pub fn decorate(record: &JobRecord, keywords: &[String]) -> RankedJob {
    let matched = score(&record.description, keywords).into_matched();
    let salary = normalize_salary(&record.raw_salary);

    RankedJob::new(record.clone(), matched, salary)
}

/// Decorate every record, keeping input order.
pub fn analyze(records: &[JobRecord], config: &RankingConfig) -> Vec<RankedJob> {
    records
        .iter()
        .map(|record| decorate(record, config.keywords()))
        .collect()
}

/// Mode A: descending technical complexity, then descending salary.
pub fn rank_by_technical_score(records: &[JobRecord], config: &RankingConfig) -> Vec<RankedJob> {
    let mut ranked = analyze(records, config);
    ranked.sort_by(|a, b| {
        b.technical_complexity()
            .cmp(&a.technical_complexity())
            .then_with(|| b.estimated_annual_salary().total_cmp(&a.estimated_annual_salary()))
    });
    ranked
}

/// Mode B: records with a usable salary, ascending ratio, top N.
pub fn rank_by_efficiency(records: &[JobRecord], config: &RankingConfig) -> Vec<RankedJob> {
    let mut ranked: Vec<RankedJob> = analyze(records, config)
        .into_iter()
        .filter(|job| job.task_to_salary_ratio().is_some())
        .collect();

    ranked.sort_by(|a, b| compare_ratio(a.task_to_salary_ratio(), b.task_to_salary_ratio()));
    ranked.truncate(config.top_n());
    ranked
}

pub fn rank(mode: RankingMode, records: &[JobRecord], config: &RankingConfig) -> Vec<RankedJob> {
    match mode {
        RankingMode::Technical => rank_by_technical_score(records, config),
        RankingMode::Efficiency => rank_by_efficiency(records, config),
    }
}

fn compare_ratio(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
