// src/analysis/salary.rs
//! Free-text salary normalization.
//!
//! Salary fields mix daily rates ("500/j", "TJM 450"), thousands ("45k"),
//! ranges ("45-55k") and bare numbers. Every expression is reduced to one
//! estimated annual amount with a fixed, ordered rule set:
//!
//! 1. daily-rate marker, or an unmarked amount strictly inside 200..1500,
//!    is a daily rate worked 220 days a year;
//! 2. a `k` marker means thousands;
//! 3. an amount below 200 is read as thousands;
//! 4. anything else is already annual.
//!
//! A bare "500" is ambiguous between a daily rate and an annual figure;
//! the band above settles it and must stay as is.
//!
//! Any Unicode decimal digit counts ("４５ｋ" reads as 45). Amounts too
//! large for an `f64` saturate at `f64::MAX`.

use once_cell::sync::Lazy;
use regex::Regex;

pub const WORKING_DAYS_PER_YEAR: f64 = 220.0;

const DAILY_RATE_MARKERS: [&str; 2] = ["/j", "tjm"];
const THOUSANDS_MARKER: &str = "k";
const DAILY_RATE_BAND: (f64, f64) = (200.0, 1500.0);
const SHORT_AMOUNT_CEILING: f64 = 200.0;

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("Invalid digit run regex"));
static DECIMAL_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d$").expect("Invalid decimal digit regex"));

/// How the working amount of a salary text is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryUnit {
    DailyRate,
    Thousands,
    Annual,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedSalary {
    /// Mean of every number in the text.
    pub amount: f64,
    pub unit: SalaryUnit,
}

impl ParsedSalary {
    pub fn annual(&self) -> f64 {
        let annual = match self.unit {
            SalaryUnit::DailyRate => self.amount * WORKING_DAYS_PER_YEAR,
            SalaryUnit::Thousands => self.amount * 1000.0,
            SalaryUnit::Annual => self.amount,
        };
        annual.min(f64::MAX)
    }
}

/// Parse a salary text into its working amount and unit.
///
/// Returns `None` when the text holds no digits.
pub fn parse_salary(raw: &str) -> Option<ParsedSalary> {
    let text = raw.to_lowercase();

    let numbers: Vec<f64> = DIGIT_RUN
        .find_iter(&text)
        .map(|m| digit_run_value(m.as_str()))
        .collect();
    if numbers.is_empty() {
        return None;
    }

    let amount = (numbers.iter().sum::<f64>() / numbers.len() as f64).min(f64::MAX);

    Some(ParsedSalary {
        amount,
        unit: classify(&text, amount),
    })
}

/// Estimated annual salary for a free-text salary, 0 when it has no digits.
pub fn normalize_salary(raw: &str) -> f64 {
    parse_salary(raw).map(|parsed| parsed.annual()).unwrap_or(0.0)
}

fn digit_run_value(run: &str) -> f64 {
    run.chars()
        .filter_map(decimal_value)
        .fold(0.0, |value, digit| (value * 10.0 + f64::from(digit)).min(f64::MAX))
}

/// Value of a Unicode decimal digit.
///
/// Decimal digits are encoded in contiguous runs of complete 0-9 sets, so
/// the offset from the start of the run gives the value.
fn decimal_value(c: char) -> Option<u32> {
    if let Some(digit) = c.to_digit(10) {
        return Some(digit);
    }
    if !is_decimal_digit(c) {
        return None;
    }

    let mut start = c as u32;
    while let Some(prev) = start
        .checked_sub(1)
        .and_then(char::from_u32)
        .filter(|&prev| is_decimal_digit(prev))
    {
        start = prev as u32;
    }
    Some((c as u32 - start) % 10)
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT.is_match(c.encode_utf8(&mut buf))
}

fn classify(text: &str, amount: f64) -> SalaryUnit {
    let daily_marker = DAILY_RATE_MARKERS.iter().any(|marker| text.contains(marker));
    let thousands_marker = text.contains(THOUSANDS_MARKER);
    let in_daily_band = amount > DAILY_RATE_BAND.0 && amount < DAILY_RATE_BAND.1;

    if daily_marker || (in_daily_band && !thousands_marker) {
        SalaryUnit::DailyRate
    } else if thousands_marker || amount < SHORT_AMOUNT_CEILING {
        SalaryUnit::Thousands
    } else {
        SalaryUnit::Annual
    }
}
