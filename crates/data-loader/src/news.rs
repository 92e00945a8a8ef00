use analysis_core::Headline;

use crate::{csv_reader, normalize_header, parse_date};

const SAMPLE_NEWS: &str = include_str!("../data/sample_news.csv");

/// Read `date, source, headline` rows from a news CSV.
///
/// Never fails: unreadable or headline-less input yields no rows, so the
/// summary simply omits its sentiment sentence.
pub fn load_news_csv(text: &str) -> Vec<Headline> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut reader = csv_reader(text);
    let headers: Vec<String> = match reader.headers() {
        Ok(h) => h.iter().map(normalize_header).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "unreadable news CSV, skipping sentiment");
            return Vec::new();
        }
    };

    let position = |name: &str| headers.iter().position(|h| h == name);
    let Some(headline_idx) = position("headline") else {
        tracing::warn!("news CSV has no headline column, skipping sentiment");
        return Vec::new();
    };
    let date_idx = position("date");
    let source_idx = position("source");

    let mut out = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed news row");
                continue;
            }
        };
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("").trim();
        out.push(Headline {
            date: parse_date(cell(date_idx)),
            source: cell(source_idx).to_string(),
            headline: cell(Some(headline_idx)).to_string(),
        });
    }

    tracing::debug!(headlines = out.len(), "loaded news headlines");
    out
}

/// Bundled headlines that accompany the sample financials.
pub fn sample_news() -> Vec<Headline> {
    load_news_csv(SAMPLE_NEWS)
}
