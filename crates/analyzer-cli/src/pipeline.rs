use analysis_core::{
    Headline, HeadlineScorer, RatioCalculator, RatioRow, SentimentTable, StatementTable,
};
use anyhow::{Context, Result};
use fundamental_analysis::FundamentalAnalysisEngine;
use health_summary::SummaryGenerator;
use sentiment_analysis::{score_headlines, shared_scorer};
use std::fs;
use std::path::Path;

use crate::config::AnalyzerConfig;

/// Everything one analysis run produces.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub ratios: Vec<RatioRow>,
    pub sentiment: SentimentTable,
    pub summary: String,
}

/// Load inputs named by `config`, then analyze them.
pub fn run(config: &AnalyzerConfig) -> Result<AnalysisReport> {
    let statements = match &config.statements_path {
        Some(path) => {
            let text = read_lossy(path)
                .with_context(|| format!("Unable to read statements file {}", path.display()))?;
            data_loader::load_statements_csv(&text)
                .with_context(|| format!("Unable to load statements from {}", path.display()))?
        }
        None => {
            tracing::info!("No statements file given, using built-in sample data");
            data_loader::sample_financials().context("Built-in sample data is unreadable")?
        }
    };

    let headlines = match &config.news_path {
        Some(path) => match read_lossy(path) {
            Ok(text) => data_loader::load_news_csv(&text),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "news file unreadable, continuing without sentiment");
                Vec::new()
            }
        },
        None if config.uses_sample_data() => data_loader::sample_news(),
        None => Vec::new(),
    };

    analyze(&statements, &headlines, config)
}

/// Read a text export, replacing invalid UTF-8 with U+FFFD instead of failing.
///
/// Spreadsheet exports are often Latin-1 or Windows-1252; a stray byte should
/// only cost the cell it sits in.
fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            tracing::warn!(path = %path.display(), "file is not valid UTF-8, replacing undecodable bytes");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// Ratio table, sentiment table and narrative for already-loaded inputs.
pub fn analyze(
    statements: &StatementTable,
    headlines: &[Headline],
    config: &AnalyzerConfig,
) -> Result<AnalysisReport> {
    analyze_with(
        &FundamentalAnalysisEngine::new(),
        shared_scorer(),
        statements,
        headlines,
        config,
    )
}

/// Same as [`analyze`], with the ratio engine and headline scorer supplied.
pub fn analyze_with(
    calculator: &dyn RatioCalculator,
    scorer: &dyn HeadlineScorer,
    statements: &StatementTable,
    headlines: &[Headline],
    config: &AnalyzerConfig,
) -> Result<AnalysisReport> {
    let ratios = calculator
        .compute(statements)
        .context("Statement data failed validation")?;
    tracing::info!(periods = ratios.len(), "Computed financial ratios");

    let sentiment = score_headlines(headlines, scorer);
    tracing::info!(headlines = sentiment.len(), "Scored headline sentiment");

    let summary = SummaryGenerator::new().generate(
        &ratios,
        Some(&sentiment),
        &config.label,
        &config.currency,
        config.style,
    );

    Ok(AnalysisReport {
        ratios,
        sentiment,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::{AnalysisError, StatementRow, REQUIRED_STATEMENT_COLUMNS};
    use chrono::NaiveDate;
    use health_summary::SummaryStyle;
    use std::path::PathBuf;

    fn temp_file(name: &str, bytes: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("analyzer-cli-{}-{}", std::process::id(), name));
        fs::write(&path, bytes).unwrap();
        path
    }

    /// Returns a fixed ratio row regardless of input.
    struct FixedCalculator;

    impl RatioCalculator for FixedCalculator {
        fn compute(&self, _statements: &StatementTable) -> Result<Vec<RatioRow>, AnalysisError> {
            Ok(vec![RatioRow {
                date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
                revenue: Some(100.0),
                net_income: Some(5.0),
                gross_margin: Some(0.3),
                operating_margin: Some(0.1),
                net_margin: Some(0.05),
                current_ratio: Some(0.5),
                quick_ratio: Some(0.4),
                debt_to_equity: Some(2.5),
                asset_turnover: None,
                inventory_turnover: None,
                roe: None,
                roa: None,
            }])
        }
    }

    struct GloomyScorer;

    impl HeadlineScorer for GloomyScorer {
        fn compound(&self, _headline: &str) -> f64 {
            -0.8
        }
    }

    fn config(style: SummaryStyle) -> AnalyzerConfig {
        AnalyzerConfig {
            label: "ACME".to_string(),
            currency: "GBP".to_string(),
            style,
            statements_path: None,
            news_path: None,
            export_path: None,
        }
    }

    #[test]
    fn test_sample_pipeline_end_to_end() {
        let report = run(&config(SummaryStyle::AnalystDeepDive)).unwrap();

        assert_eq!(report.ratios.len(), 8);
        assert_eq!(report.sentiment.len(), 8);
        assert!(report.summary.starts_with("**ACME** financial health snapshot (GBP reporting):"));
        assert!(report.summary.contains("Recent news sentiment appears"));
        assert!(report.summary.contains("_Methodology:_"));
    }

    #[test]
    fn test_schema_error_surfaces_missing_columns() {
        let table = StatementTable::new(
            vec!["date".to_string(), "revenue".to_string()],
            vec![StatementRow::empty(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap())],
        );
        let err = analyze(&table, &[], &config(SummaryStyle::ExecutiveBrief)).unwrap_err();

        let schema = err.downcast_ref::<AnalysisError>().unwrap();
        assert!(schema.missing_columns().contains(&"cogs".to_string()));
        assert!(format!("{err:#}").contains("Missing required columns"));
    }

    #[test]
    fn test_undefined_ratios_flow_into_summary() {
        let mut row = StatementRow::empty(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        row.revenue = Some(0.0);
        row.cogs = Some(10.0);
        let table = StatementTable::from_rows(vec![row]);

        let report = analyze(&table, &[], &config(SummaryStyle::ExecutiveBrief)).unwrap();
        assert!(report.summary.contains("Gross margin n/a"));
        assert!(report.summary.contains("Current ratio n/a"));
        assert!(!report.summary.contains("sentiment appears"));
    }

    #[test]
    fn test_non_utf8_bytes_do_not_abort_loading() {
        let mut statements = REQUIRED_STATEMENT_COLUMNS.join(",").into_bytes();
        statements.extend_from_slice(b",note\n");
        statements.extend_from_slice(b"2024-03-31,100,60,25,20,50,25,200,80,120,caf\xe9\n");
        let mut news = b"date,source,headline\n".to_vec();
        news.extend_from_slice(b"2024-03-30,Le Monde,Caf\xe9 chain posts record profit\n");

        let mut cfg = config(SummaryStyle::ExecutiveBrief);
        cfg.statements_path = Some(temp_file("latin1-statements.csv", &statements));
        cfg.news_path = Some(temp_file("latin1-news.csv", &news));
        let report = run(&cfg).unwrap();

        assert_eq!(report.ratios.len(), 1);
        assert_eq!(report.ratios[0].gross_margin, Some(0.4));
        assert_eq!(report.sentiment.len(), 1);
        assert!(report.sentiment.rows[0].headline.contains('\u{FFFD}'));
        assert!(report.sentiment.rows[0].compound.unwrap() > 0.0);
        assert!(report.summary.contains("sentiment appears **positive**"));
    }

    #[test]
    fn test_analyze_with_uses_supplied_components() {
        let table = StatementTable::from_rows(Vec::new());
        let headlines = vec![Headline {
            date: NaiveDate::from_ymd_opt(2024, 6, 1),
            source: "wire".to_string(),
            headline: "Anything at all".to_string(),
        }];
        let report = analyze_with(
            &FixedCalculator,
            &GloomyScorer,
            &table,
            &headlines,
            &config(SummaryStyle::ExecutiveBrief),
        )
        .unwrap();

        assert_eq!(report.ratios.len(), 1);
        assert_eq!(report.sentiment.rows[0].compound, Some(-0.8));
        assert!(report.summary.contains("risk: below 1.0"));
        assert!(report.summary.contains("sentiment appears **negative**"));
    }

    #[test]
    fn test_missing_statements_file_is_an_error() {
        let mut cfg = config(SummaryStyle::ExecutiveBrief);
        cfg.statements_path = Some("/nonexistent/statements.csv".into());
        assert!(run(&cfg).is_err());
    }
}
