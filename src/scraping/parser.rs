// src/scraping/parser.rs
//! Job card extraction from listing pages.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::config::ScraperConfig;
use crate::types::{JobRecord, LINK_NOT_FOUND, SALARY_NOT_STATED};

pub const DEFAULT_LOCATION: &str = "France / Remote";
pub const DESCRIPTION_PLACEHOLDER: &str = "Voir détails";

const TITLE_NOISE: &str = "Offre d'emploi";
const LOCATION_PREFIX: &str = "Lieu :";
const MIN_DESCRIPTION_CHARS: usize = 60;
const MAX_FIELD_CHARS: usize = 50;
const MAX_SHORT_FIELD_CHARS: usize = 30;

static JOB_CARD: Lazy<Selector> = Lazy::new(|| selector("div.cursor-pointer"));
static TITLES: Lazy<[Selector; 3]> = Lazy::new(|| [selector("h1"), selector("h2"), selector("h3")]);
static COMPANY: Lazy<Selector> = Lazy::new(|| selector("div.font-bold"));
static LINK: Lazy<Selector> = Lazy::new(|| selector("a[href]"));

/// "(75)" or "(974)": a department number.
static DEPARTMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\d{2,3}\)").expect("Invalid department regex"));
/// A five-digit postcode.
static POSTCODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{5}\b").expect("Invalid postcode regex"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("Invalid job card selector")
}

/// Records extracted from one listing page.
#[derive(Debug, Default)]
pub struct ListingPage {
    /// Job cards found, including the ones that yielded no record.
    pub cards: usize,
    pub records: Vec<JobRecord>,
}

pub fn parse_listing_page(html: &str, config: &ScraperConfig) -> ListingPage {
    let document = Html::parse_document(html);

    let mut page = ListingPage::default();
    for card in document.select(&JOB_CARD) {
        page.cards += 1;
        if let Some(record) = extract_job(card, config) {
            page.records.push(record);
        }
    }
    page
}

/// Build a record from one job card. Cards without a heading are skipped.
pub fn extract_job(card: ElementRef<'_>, config: &ScraperConfig) -> Option<JobRecord> {
    let title_element = TITLES
        .iter()
        .find_map(|heading| card.select(heading).next())?;
    let title = joined_text(title_element)
        .replace(TITLE_NOISE, "")
        .trim()
        .to_string();

    let company = card
        .select(&COMPANY)
        .next()
        .map(joined_text)
        .unwrap_or_default();

    let texts: Vec<String> = card
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .collect();

    let description = longest(&texts)
        .filter(|text| text.chars().count() > MIN_DESCRIPTION_CHARS)
        .map(|text| text.replace('\n', " ").trim().to_string())
        .unwrap_or_else(|| DESCRIPTION_PLACEHOLDER.to_string());

    let mut location = DEFAULT_LOCATION.to_string();
    let mut salary = SALARY_NOT_STATED.to_string();

    for text in &texts {
        let len = text.chars().count();
        if len > MAX_FIELD_CHARS || *text == title || *text == company {
            continue;
        }

        let has_euro = text.contains('€');
        if (has_euro || text.contains("TJM")) && len < MAX_SHORT_FIELD_CHARS {
            salary = text.clone();
            continue;
        }
        if (DEPARTMENT.is_match(text) || POSTCODE.is_match(text)) && !has_euro {
            location = text.clone();
            continue;
        }
        if location == DEFAULT_LOCATION
            && len < MAX_SHORT_FIELD_CHARS
            && !has_euro
            && config.cities.iter().any(|city| text.contains(city.as_str()))
        {
            location = text.clone();
        }
    }

    let link = card
        .select(&LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| absolute_link(&config.site_origin, href))
        .unwrap_or_else(|| LINK_NOT_FOUND.to_string());

    Some(JobRecord {
        title,
        company,
        location: location.replace(LOCATION_PREFIX, "").trim().to_string(),
        raw_salary: salary,
        description,
        link,
    })
}

/// Text nodes trimmed and concatenated without separator.
fn joined_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// First of the longest texts.
fn longest(texts: &[String]) -> Option<&String> {
    texts.iter().fold(None, |best: Option<&String>, text| match best {
        Some(best) if best.chars().count() >= text.chars().count() => Some(best),
        _ => Some(text),
    })
}

fn absolute_link(origin: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{}{}", origin.trim_end_matches('/'), href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_DESCRIPTION: &str = "Nous recherchons un Data Analyst pour construire des tableaux de bord Power BI et automatiser des flux SQL.";

    fn page(cards: &[String]) -> String {
        format!("<html><body>{}</body></html>", cards.join(""))
    }

    fn card(inner: &str) -> String {
        format!(r#"<div class="cursor-pointer">{}</div>"#, inner)
    }

    #[test]
    fn test_extracts_full_card() {
        let html = page(&[card(&format!(
            r#"<h2>Offre d'emploi Data Analyst</h2>
               <div class="font-bold">Acme</div>
               <span>Paris (75)</span>
               <span>45k-55k €</span>
               <p>{}</p>
               <a href="/fr/tech-it/jobs/data-analyst-123">Voir</a>"#,
            LONG_DESCRIPTION
        ))]);

        let page = parse_listing_page(&html, &ScraperConfig::default());
        assert_eq!(page.cards, 1);

        let job = &page.records[0];
        assert_eq!(job.title, "Data Analyst");
        assert_eq!(job.company, "Acme");
        assert_eq!(job.location, "Paris (75)");
        assert_eq!(job.raw_salary, "45k-55k €");
        assert_eq!(job.description, LONG_DESCRIPTION);
        assert_eq!(
            job.link,
            "https://www.free-work.com/fr/tech-it/jobs/data-analyst-123"
        );
    }

    #[test]
    fn test_defaults_when_fields_are_missing() {
        let html = page(&[card("<h3>Consultant BI</h3><span>short</span>")]);
        let page = parse_listing_page(&html, &ScraperConfig::default());

        let job = &page.records[0];
        assert_eq!(job.title, "Consultant BI");
        assert_eq!(job.company, "");
        assert_eq!(job.location, DEFAULT_LOCATION);
        assert_eq!(job.raw_salary, SALARY_NOT_STATED);
        assert_eq!(job.description, DESCRIPTION_PLACEHOLDER);
        assert_eq!(job.link, LINK_NOT_FOUND);
    }

    #[test]
    fn test_card_without_heading_is_skipped() {
        let html = page(&[card("<span>no title</span>"), card("<h1>Analyst</h1>")]);
        let page = parse_listing_page(&html, &ScraperConfig::default());

        assert_eq!(page.cards, 2);
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].title, "Analyst");
    }

    #[test]
    fn test_city_and_postcode_locations() {
        let config = ScraperConfig::default();

        let html = page(&[card("<h1>A</h1><span>Lieu : Lyon</span>")]);
        assert_eq!(parse_listing_page(&html, &config).records[0].location, "Lyon");

        let html = page(&[card("<h1>B</h1><span>33000 Bordeaux</span><span>Nantes</span>")]);
        assert_eq!(parse_listing_page(&html, &config).records[0].location, "33000 Bordeaux");
    }

    #[test]
    fn test_tjm_salary_and_absolute_link() {
        let html = page(&[card(
            r#"<h1>Freelance</h1><span>TJM 500</span><a href="https://other.example/job">x</a>"#,
        )]);
        let job = &parse_listing_page(&html, &ScraperConfig::default()).records[0];

        assert_eq!(job.raw_salary, "TJM 500");
        assert_eq!(job.link, "https://other.example/job");
    }

    #[test]
    fn test_page_without_cards() {
        let page = parse_listing_page("<html><body><p>Aucun résultat</p></body></html>", &ScraperConfig::default());
        assert_eq!(page.cards, 0);
        assert!(page.records.is_empty());
    }

    #[test]
    fn test_longest_keeps_first_on_ties() {
        let texts = vec!["abc".to_string(), "xyz".to_string(), "ab".to_string()];
        assert_eq!(longest(&texts).map(String::as_str), Some("abc"));
        assert!(longest(&[]).is_none());
    }
}
