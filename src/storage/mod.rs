// src/storage/mod.rs
pub mod csv_store;

pub use csv_store::{
    ensure_prerequisite, read_jobs, read_ranked, write_jobs, write_ranked, MissingPrerequisite,
};
