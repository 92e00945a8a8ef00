use analysis_core::RatioRow;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Ratio table as CSV; undefined ratios become empty cells.
pub fn ratios_to_csv(rows: &[RatioRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer.into_inner().context("Unable to flush CSV writer")?;
    Ok(String::from_utf8(bytes)?)
}

/// Ratio table as pretty JSON; undefined ratios become `null`.
pub fn ratios_to_json(rows: &[RatioRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Write the ratio table to `path`, as JSON for `.json` files and CSV otherwise.
pub fn write_ratios(path: &Path, rows: &[RatioRow]) -> Result<()> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("json"));
    let content = if is_json {
        ratios_to_json(rows)?
    } else {
        ratios_to_csv(rows)?
    };
    fs::write(path, content)
        .with_context(|| format!("Unable to write ratio export to {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = rows.len(), "Exported ratio table");
    Ok(())
}
