// src/cli.rs
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::analysis::{rank, RankingMode};
use crate::app_log;
use crate::config::AppConfig;
use crate::scraping::JobScraper;
use crate::storage::{read_jobs, write_jobs, write_ranked};
use crate::types::RankedJob;
use crate::web;

const TABLE_ROWS: usize = 10;

#[derive(Parser)]
#[command(name = "job-kpi")]
#[command(about = "Scrape job offers and rank them by technical breadth against salary")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// YAML configuration file (defaults to ./config.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Also write JSON logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Collect offers from the listing pages into the offers table
    Scrape {
        #[arg(long)]
        pages: Option<u32>,
    },
    /// Rank the scraped offers
    Rank {
        #[arg(long, value_enum, default_value_t = RankingMode::Technical)]
        mode: RankingMode,
    },
    /// Scrape, then rank
    Run {
        #[arg(long, value_enum, default_value_t = RankingMode::Technical)]
        mode: RankingMode,
        #[arg(long)]
        pages: Option<u32>,
    },
    /// Serve the dashboard over the efficiency top-N table
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Scrape { pages } => {
            if let Some(pages) = pages {
                config = config.with_pages(pages);
            }
            scrape_offers(&config).await?;
        }

        Command::Rank { mode } => {
            rank_offers(&config, mode)?;
        }

        Command::Run { mode, pages } => {
            if let Some(pages) = pages {
                config = config.with_pages(pages);
            }
            println!("[1/2] SCRAPING...");
            scrape_offers(&config).await?;
            println!("[2/2] ANALYSIS...");
            rank_offers(&config, mode)?;
            println!("✅ PROCESS COMPLETED");
        }

        Command::Serve { port } => {
            if let Some(port) = port {
                config = config.with_port(port);
            }
            web::start_dashboard(&config).await?;
        }
    }

    Ok(())
}

pub async fn scrape_offers(config: &AppConfig) -> Result<usize> {
    let scraper = JobScraper::new(config.scraper.clone())?;
    let records = scraper.scrape().await;

    if records.is_empty() {
        app_log!(warn, "No offers collected, writing an empty table");
    }
    write_jobs(&config.paths.offers_csv, &records)?;

    println!(
        "✅ {} offers collected into {}",
        records.len(),
        config.paths.offers_csv.display()
    );
    Ok(records.len())
}

/// Rank the offers table and write the mode's output table.
pub fn rank_offers(config: &AppConfig, mode: RankingMode) -> Result<Vec<RankedJob>> {
    let records = read_jobs(&config.paths.offers_csv)?;
    app_log!(info, "Ranking {} offers ({:?} mode)", records.len(), mode);

    let ranked = rank(mode, &records, &config.ranking);
    let output = match mode {
        RankingMode::Technical => &config.paths.analyzed_csv,
        RankingMode::Efficiency => &config.paths.top_csv,
    };
    write_ranked(output, &ranked)?;

    print!("{}", format_table(&ranked, mode));
    println!("✅ Results written to {}", output.display());
    Ok(ranked)
}

pub fn format_table(jobs: &[RankedJob], mode: RankingMode) -> String {
    let heading = match mode {
        RankingMode::Technical => "TOP 10 BY TECHNICAL SCORE",
        RankingMode::Efficiency => "TOP 10 BY TASKS / SALARY",
    };

    let mut out = format!("\n🏆 {}\n\n", heading);
    out.push_str(&format!(
        "{:<32} {:<20} {:<16} {:>10} {:>5} {:>12}\n",
        "Title", "Company", "Salary", "Annual", "Tech", "Ratio"
    ));
    out.push_str(&format!("{}\n", "-".repeat(100)));

    for job in jobs.iter().take(TABLE_ROWS) {
        let ratio = job
            .task_to_salary_ratio()
            .map(|r| format!("{:.8}", r))
            .unwrap_or_else(|| "-".to_string());

        out.push_str(&format!(
            "{:<32} {:<20} {:<16} {:>10.0} {:>5} {:>12}\n",
            clip(&job.record.title, 32),
            clip(&job.record.company, 20),
            clip(&job.record.raw_salary, 16),
            job.estimated_annual_salary(),
            job.technical_complexity(),
            ratio
        ));
    }

    if jobs.is_empty() {
        out.push_str("(no offers)\n");
    }
    out
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JobRecord;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["job-kpi", "rank", "--mode", "efficiency"]).unwrap();
        assert!(matches!(cli.command, Command::Rank { mode: RankingMode::Efficiency }));

        let cli = Cli::try_parse_from(["job-kpi", "run", "--pages", "2", "--config", "c.yaml"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Run { mode: RankingMode::Technical, pages: Some(2) }
        ));
        assert_eq!(cli.config, Some(PathBuf::from("c.yaml")));

        assert!(Cli::try_parse_from(["job-kpi", "rank", "--mode", "random"]).is_err());
    }

    #[test]
    fn test_format_table_limits_rows() {
        let jobs: Vec<RankedJob> = (0..12)
            .map(|i| {
                let record = JobRecord {
                    title: format!("job-{}", i),
                    ..JobRecord::default()
                };
                RankedJob::new(record, vec![], 0.0)
            })
            .collect();

        let table = format_table(&jobs, RankingMode::Technical);
        assert!(table.contains("job-9 "));
        assert!(!table.contains("job-10"));
        assert!(table.contains("TECHNICAL SCORE"));
    }

    #[test]
    fn test_format_table_empty() {
        assert!(format_table(&[], RankingMode::Efficiency).contains("(no offers)"));
    }
}
