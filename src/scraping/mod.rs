// src/scraping/mod.rs
//! Listing collection: page fetching and job card extraction.

pub mod job_scraper;
pub mod parser;

pub use job_scraper::JobScraper;
pub use parser::{extract_job, parse_listing_page, ListingPage};
