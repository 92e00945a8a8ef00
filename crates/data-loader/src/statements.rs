use analysis_core::{AnalysisError, StatementRow, StatementTable};

use crate::{csv_reader, normalize_header, parse_date, parse_number};

const SAMPLE_FINANCIALS: &str = include_str!("../data/sample_financials.csv");

/// Parse a statement CSV into a date-sorted [`StatementTable`].
///
/// Rows whose date cannot be parsed are dropped. Unknown columns are kept in
/// the header list but otherwise ignored.
pub fn load_statements_csv(text: &str) -> Result<StatementTable, AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::InvalidData("File is empty.".to_string()));
    }

    let mut reader = csv_reader(text);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AnalysisError::InvalidData(format!("Unable to parse CSV content: {e}")))?
        .iter()
        .map(normalize_header)
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(AnalysisError::InvalidData(
            "CSV appears empty or has no readable columns.".to_string(),
        ));
    }

    let Some(date_idx) = headers.iter().position(|h| h == "date") else {
        return Err(AnalysisError::Schema {
            missing: vec!["date".to_string()],
        });
    };

    let mut rows = Vec::new();
    let mut records_seen = 0usize;
    for result in reader.records() {
        let record = result
            .map_err(|e| AnalysisError::InvalidData(format!("Unable to parse CSV content: {e}")))?;
        records_seen += 1;

        let Some(date) = record.get(date_idx).and_then(parse_date) else {
            continue;
        };
        let mut row = StatementRow::empty(date);
        for (idx, column) in headers.iter().enumerate() {
            if idx == date_idx {
                continue;
            }
            row.set_field(column, record.get(idx).and_then(parse_number));
        }
        rows.push(row);
    }

    if records_seen == 0 {
        return Err(AnalysisError::InvalidData(
            "CSV appears empty or has no readable columns.".to_string(),
        ));
    }
    if rows.is_empty() {
        return Err(AnalysisError::InvalidData(
            "Could not parse any valid dates in 'date' column.".to_string(),
        ));
    }

    let dropped = records_seen - rows.len();
    if dropped > 0 {
        tracing::warn!(dropped, "dropped statement rows with unparseable dates");
    }

    rows.sort_by_key(|r| r.date);
    tracing::debug!(periods = rows.len(), columns = headers.len(), "loaded statement table");

    let mut columns: Vec<String> = Vec::with_capacity(headers.len());
    for header in headers {
        if !header.is_empty() && !columns.contains(&header) {
            columns.push(header);
        }
    }
    Ok(StatementTable::new(columns, rows))
}

/// Bundled eight-quarter statement history used when no file is supplied.
pub fn sample_financials() -> Result<StatementTable, AnalysisError> {
    load_statements_csv(SAMPLE_FINANCIALS)
}
