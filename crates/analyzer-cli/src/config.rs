use anyhow::{bail, Result};
use health_summary::SummaryStyle;
use serde::Serialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzerConfig {
    // Display
    pub label: String,    // "AAPL"
    pub currency: String, // "USD"
    pub style: SummaryStyle,

    // Inputs (None = built-in sample data)
    pub statements_path: Option<PathBuf>,
    pub news_path: Option<PathBuf>,

    // Output
    pub export_path: Option<PathBuf>,
}

impl AnalyzerConfig {
    /// Load from the process environment, then apply command-line overrides.
    pub fn from_env(args: &[String]) -> Result<Self> {
        Self::from_sources(|key| env::var(key).ok(), args)
    }

    /// `lookup` resolves environment keys; flags in `args` win over it.
    pub fn from_sources<F>(lookup: F, args: &[String]) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // A value flag must be followed by a value, not by the next flag.
        let flag = |name: &str| -> Result<Option<String>> {
            let Some(i) = args.iter().position(|a| a == name) else {
                return Ok(None);
            };
            match args.get(i + 1) {
                Some(value) if !value.starts_with("--") => Ok(Some(value.clone())),
                _ => bail!("{} requires a value", name),
            }
        };
        let setting = |flag_name: &str, env_key: &str| -> Result<Option<String>> {
            Ok(flag(flag_name)?
                .or_else(|| lookup(env_key))
                .filter(|v| !v.trim().is_empty()))
        };

        let strict_style = args.iter().any(|a| a == "--strict-style");
        let style = match setting("--style", "SUMMARY_STYLE")? {
            Some(raw) if strict_style => raw.parse::<SummaryStyle>()?,
            Some(raw) => SummaryStyle::from_label(&raw),
            None => SummaryStyle::default(),
        };

        let config = Self {
            label: flag("--label")?
                .or_else(|| lookup("ANALYZER_LABEL"))
                .unwrap_or_else(|| "AAPL".to_string()),
            currency: flag("--currency")?
                .or_else(|| lookup("ANALYZER_CURRENCY"))
                .unwrap_or_else(|| "USD".to_string()),
            style,
            statements_path: setting("--statements", "STATEMENTS_CSV")?.map(PathBuf::from),
            news_path: setting("--news", "NEWS_CSV")?.map(PathBuf::from),
            export_path: setting("--export", "RATIO_EXPORT")?.map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.label.trim().is_empty() {
            bail!("label must not be empty (set ANALYZER_LABEL or --label)");
        }
        if self.currency.trim().is_empty() {
            bail!("currency label must not be empty (set ANALYZER_CURRENCY or --currency)");
        }
        Ok(())
    }

    pub fn uses_sample_data(&self) -> bool {
        self.statements_path.is_none()
    }
}
