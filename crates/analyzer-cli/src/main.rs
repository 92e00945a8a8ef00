//! analyzer-cli: Compute financial-health ratios and print a narrative summary.
//!
//! Usage:
//!   cargo run -p analyzer-cli                                  # built-in sample data
//!   cargo run -p analyzer-cli -- --statements fin.csv --news news.csv --label MSFT
//!   cargo run -p analyzer-cli -- --style "Analyst deep-dive" --export ratios.json

mod config;
mod export;
mod pipeline;

use anyhow::Result;
use config::AnalyzerConfig;

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  analyzer-cli [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --statements PATH   Statement CSV (default: built-in sample data)");
    eprintln!("  --news PATH         Headline CSV with date, source, headline columns");
    eprintln!("  --label TEXT        Ticker or company label (default: AAPL)");
    eprintln!("  --currency TEXT     Currency label for display (default: USD)");
    eprintln!("  --style TEXT        \"Executive brief\" or \"Analyst deep-dive\"");
    eprintln!("  --strict-style      Reject unrecognized styles instead of using the brief");
    eprintln!("  --export PATH       Write the ratio table (.json for JSON, CSV otherwise)");
    eprintln!();
    eprintln!("Each option can also be set in the environment or a .env file:");
    eprintln!("  STATEMENTS_CSV, NEWS_CSV, ANALYZER_LABEL, ANALYZER_CURRENCY, SUMMARY_STYLE, RATIO_EXPORT");
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "analyzer_cli=info,fundamental_analysis=warn".into());
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    // Logs go to stderr so the summary on stdout stays clean.
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let config = AnalyzerConfig::from_env(&args)?;
    tracing::info!(
        label = %config.label,
        currency = %config.currency,
        style = %config.style,
        sample_data = config.uses_sample_data(),
        "Starting financial health analysis"
    );
    tracing::debug!(config = %serde_json::to_string(&config)?, "Resolved configuration");

    let report = pipeline::run(&config)?;
    tracing::debug!(
        periods = report.ratios.len(),
        headlines = report.sentiment.len(),
        "Analysis complete"
    );
    println!("{}", report.summary);

    if let Some(path) = &config.export_path {
        export::write_ratios(path, &report.ratios)?;
    }

    Ok(())
}
