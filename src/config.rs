// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_CONFIG_FILE: &str = "config.yaml";

const DEFAULT_BASE_URL: &str = "https://www.free-work.com/fr/tech-it/jobs?query=Data+Analyst&page=";
const DEFAULT_SITE_ORIGIN: &str = "https://www.free-work.com";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";

const DEFAULT_KEYWORDS: &[&str] = &[
    "python", "sql", "power bi", "powerbi", "tableau", "excel", "vba", "sas", "r", "azure", "aws",
    "gcp", "snowflake", "databricks", "etl", "talend", "git", "jira", "agile", "scrum", "dax",
    "modeling",
];

const DEFAULT_CITIES: &[&str] = &[
    "Paris",
    "Lyon",
    "Bordeaux",
    "Nantes",
    "Lille",
    "Toulouse",
    "Nice",
    "Marseille",
    "Rennes",
    "Strasbourg",
    "Ile-de-France",
];

pub const DEFAULT_TOP_N: usize = 10;

/// Everything the pipeline needs, passed explicitly to each stage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scraper: ScraperConfig,
    pub ranking: RankingConfig,
    pub paths: PathsConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Listing URL; the page number is appended to it.
    pub base_url: String,
    /// Prefix for relative offer links.
    pub site_origin: String,
    pub user_agent: String,
    pub pages: u32,
    pub timeout_seconds: u64,
    pub delay_min_secs: f64,
    pub delay_max_secs: f64,
    /// City names used to recognise a location line on a job card.
    pub cities: Vec<String>,
}

/// Keyword list and output size for the ranking engine.
///
/// Keywords are lower-cased, trimmed and deduplicated on construction so
/// that the scorer never sees an empty or repeated keyword.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RankingConfigFile")]
pub struct RankingConfig {
    keywords: Vec<String>,
    top_n: usize,
}

#[derive(Deserialize)]
struct RankingConfigFile {
    keywords: Option<Vec<String>>,
    top_n: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Raw scraped offers.
    pub offers_csv: PathBuf,
    /// All offers decorated and sorted by technical score.
    pub analyzed_csv: PathBuf,
    /// Efficiency top-N, read by the dashboard.
    pub top_csv: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub address: String,
    pub port: u16,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            pages: 5,
            timeout_seconds: 15,
            delay_min_secs: 1.0,
            delay_max_secs: 3.0,
            cities: DEFAULT_CITIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().copied())
    }
}

impl From<RankingConfigFile> for RankingConfig {
    fn from(file: RankingConfigFile) -> Self {
        let config = match file.keywords {
            Some(keywords) => Self::new(keywords),
            None => Self::default(),
        };
        config.with_top_n(file.top_n.unwrap_or(DEFAULT_TOP_N))
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            offers_csv: PathBuf::from("offres_emploi.csv"),
            analyzed_csv: PathBuf::from("resultats_analyses_kpi.csv"),
            top_csv: PathBuf::from("kpi_tasks_ratio_top10.csv"),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

impl RankingConfig {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !normalized.contains(&keyword) {
                normalized.push(keyword);
            }
        }

        Self {
            keywords: normalized,
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }
}

impl PathsConfig {
    /// Re-root every relative path under `base`.
    pub fn rooted_at(self, base: &Path) -> Self {
        Self {
            offers_csv: resolve_path(base, &self.offers_csv),
            analyzed_csv: resolve_path(base, &self.analyzed_csv),
            top_csv: resolve_path(base, &self.top_csv),
        }
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `config.yaml` in the
    /// current directory is used when present, built-in defaults otherwise.
    /// `JOB_KPI_DATA_DIR` re-roots the CSV paths.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_from_file(&default_path)?
                } else {
                    info!("No {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };

        Ok(config.apply_env())
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn apply_env(mut self) -> Self {
        if let Ok(dir) = std::env::var("JOB_KPI_DATA_DIR") {
            info!("Data directory override: {}", dir);
            self.paths = self.paths.rooted_at(Path::new(&dir));
        }
        self
    }

    pub fn with_pages(mut self, pages: u32) -> Self {
        self.scraper.pages = pages;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.dashboard.port = port;
        self
    }

    pub fn with_paths(mut self, paths: PathsConfig) -> Self {
        self.paths = paths;
        self
    }
}

fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
