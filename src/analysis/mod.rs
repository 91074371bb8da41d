// src/analysis/mod.rs
//! Salary normalization, keyword scoring and ranking. No I/O in here.

pub mod keywords;
pub mod ranking;
pub mod salary;

pub use keywords::{score, KeywordScore};
pub use ranking::{
    analyze, decorate, rank, rank_by_efficiency, rank_by_technical_score, RankingMode,
};
pub use salary::{normalize_salary, parse_salary, ParsedSalary, SalaryUnit};
