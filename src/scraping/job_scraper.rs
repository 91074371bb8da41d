// src/scraping/job_scraper.rs
use anyhow::{Context, Result};
use rand::Rng;
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info, warn};

use super::parser::parse_listing_page;
use crate::config::ScraperConfig;
use crate::types::JobRecord;

const LOG_FIELD_CHARS: usize = 20;

pub struct JobScraper {
    client: Client,
    config: ScraperConfig,
}

impl JobScraper {
    pub fn new(config: ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Walk the listing pages and collect every job card.
    ///
    /// A page that fails to download is logged and skipped; a page with no
    /// job cards ends the walk.
    pub async fn scrape(&self) -> Vec<JobRecord> {
        let mut results = Vec::new();
        let mut failed_pages = 0;

        for page in 1..=self.config.pages {
            info!("Page {}...", page);

            let html = match self.fetch_page(page).await {
                Ok(html) => html,
                Err(e) => {
                    error!("Failed to fetch page {}: {:#}", page, e);
                    failed_pages += 1;
                    self.pause().await;
                    continue;
                }
            };

            let listing = parse_listing_page(&html, &self.config);
            if listing.cards == 0 {
                info!("No job cards on page {}, end of results or layout changed", page);
                break;
            }

            for record in listing.records {
                info!(
                    "Collected: {} | {}",
                    truncate_chars(&record.company, LOG_FIELD_CHARS),
                    truncate_chars(&record.title, LOG_FIELD_CHARS)
                );
                results.push(record);
            }

            if page < self.config.pages {
                self.pause().await;
            }
        }

        if failed_pages > 0 {
            warn!("{} page(s) could not be fetched", failed_pages);
        }
        info!("Collected {} offers", results.len());
        results
    }

    async fn fetch_page(&self, page: u32) -> Result<String> {
        let url = self.page_url(page);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }

        response
            .text()
            .await
            .context("Failed to read response body")
    }

    pub fn page_url(&self, page: u32) -> String {
        format!("{}{}", self.config.base_url, page)
    }

    /// Random delay between page fetches.
    pub fn page_delay(&self) -> Duration {
        let min = self.config.delay_min_secs.max(0.0);
        let max = self.config.delay_max_secs.max(min);
        if max <= min {
            return Duration::from_secs_f64(min);
        }
        Duration::from_secs_f64(rand::rng().random_range(min..=max))
    }

    async fn pause(&self) {
        tokio::time::sleep(self.page_delay()).await;
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
