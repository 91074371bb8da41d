// src/types/mod.rs
pub mod job;

pub use job::{JobRecord, RankedJob, LINK_NOT_FOUND, SALARY_NOT_STATED};
