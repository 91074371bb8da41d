//! Job offer scraping and ranking.
//!
//! Offers are collected from a listings site ([`scraping`]), decorated with
//! a keyword-based technical complexity and a normalized annual salary
//! ([`analysis`]), then ranked and persisted as semicolon tables
//! ([`storage`]) for the CLI and the dashboard ([`web`]).

pub mod analysis;
pub mod cli;
pub mod config;
pub mod logging;
pub mod scraping;
pub mod storage;
pub mod types;
pub mod web;

pub use analysis::{normalize_salary, rank_by_efficiency, rank_by_technical_score, RankingMode};
pub use config::{AppConfig, RankingConfig};
pub use types::{JobRecord, RankedJob};
