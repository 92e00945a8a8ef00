//! data-loader: Read statement and headline CSVs into analysis tables.
//!
//! Loaders normalize headers (trim, lowercase, spaces -> `_`), detect the
//! field separator, parse dates and return rows sorted ascending by date.
//! Column presence beyond `date` is left to the ratio engine.

pub mod news;
pub mod statements;


pub use news::{load_news_csv, sample_news};
pub use statements::{load_statements_csv, sample_financials};

use chrono::NaiveDate;

/// Characters sampled when guessing the separator.
const SEPARATOR_SAMPLE: usize = 2000;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y"];

/// Pick `,`, `;` or tab by frequency in the leading sample.
/// Comma wins ties, then semicolon.
pub fn detect_separator(text: &str) -> u8 {
    let (mut commas, mut semis, mut tabs) = (0usize, 0usize, 0usize);
    for c in text.chars().take(SEPARATOR_SAMPLE) {
        match c {
            ',' => commas += 1,
            ';' => semis += 1,
            '\t' => tabs += 1,
            _ => {}
        }
    }
    if commas >= semis && commas >= tabs {
        b','
    } else if semis >= tabs {
        b';'
    } else {
        b'\t'
    }
}

/// `" Net Income "` -> `"net_income"`.
pub fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .replace(' ', "_")
}

/// Parse a calendar date, accepting a few common layouts and a
/// timestamp whose first ten characters are an ISO date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            raw.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}

/// Numeric cell; blanks and unparseable text are missing values.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn csv_reader(text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(detect_separator(text))
        .from_reader(text.as_bytes())
}
