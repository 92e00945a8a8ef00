//! Financial Health Summary
//!
//! Turns a ratio table (and optional headline sentiment) into a short
//! narrative assessment: profitability, liquidity, leverage, returns,
//! fixed watchpoints and an outlook line.

pub mod format;
pub mod snapshot;
pub mod style;


pub use format::{format_pct, format_ratio};
pub use snapshot::{HealthSnapshot, LiquidityNote, SentimentBias, SentimentReading, Trend};
pub use style::SummaryStyle;

use analysis_core::{RatioRow, SentimentTable};

/// Text returned when there is nothing to summarize.
pub const NO_DATA_SUMMARY: &str = "No ratio data available.";

const METHODOLOGY_NOTE: &str = "_Methodology:_ Ratios computed from standardized statement lines; \
sentiment derived from headline polarity scoring of recent news.";

const RISK_WATCHPOINTS: &str = "**Risks & watchpoints**\n\
- Monitor leverage trend and interest coverage.\n\
- Track margin trajectory against input costs.\n\
- If current ratio < 1.0, watch working-capital strain.";

/// Renders health summaries. Holds no state between calls.
pub struct SummaryGenerator;

impl SummaryGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Build the narrative for the latest period of `ratios`.
    ///
    /// `ratios` must be sorted ascending by date; the last row is taken as the
    /// current snapshot. Never fails: missing sentiment or short histories
    /// only drop the corresponding sentence.
    pub fn generate(
        &self,
        ratios: &[RatioRow],
        sentiment: Option<&SentimentTable>,
        label: &str,
        currency: &str,
        style: SummaryStyle,
    ) -> String {
        let Some(snapshot) = HealthSnapshot::build(ratios, sentiment) else {
            return NO_DATA_SUMMARY.to_string();
        };
        tracing::debug!(
            periods = snapshot.periods,
            has_sentiment = snapshot.sentiment.is_some(),
            style = style.label(),
            "rendering health summary"
        );
        self.render(&snapshot, label, currency, style)
    }

    fn render(&self, s: &HealthSnapshot, label: &str, currency: &str, style: SummaryStyle) -> String {
        let sentiment_line = s
            .sentiment
            .as_ref()
            .map(|r| {
                format!(
                    " Recent news sentiment appears **{}** (avg compound {:.2}).",
                    r.bias.as_str(),
                    r.average
                )
            })
            .unwrap_or_default();

        let periods_word = if s.periods == 1 { "period" } else { "periods" };

        let mut body = format!(
            "**{label}** financial health snapshot ({currency} reporting):\n\
             - **Profitability:** Gross margin {gross} ({gross_dir}), operating margin {op}, net margin {net} ({net_dir}).\n\
             - **Liquidity:** Current ratio {cur} ({liquidity}); quick ratio {quick}.\n\
             - **Leverage:** Debt-to-equity {de} ({de_dir}).\n\
             - **Returns:** ROE {roe}.\n\
             \n\
             {RISK_WATCHPOINTS}\n\
             \n\
             **Outlook:** Based on {periods} reported {periods_word}.{sentiment_line}",
            gross = format_pct(s.latest.gross_margin),
            gross_dir = s.gross_margin_trend.as_str(),
            op = format_pct(s.latest.operating_margin),
            net = format_pct(s.latest.net_margin),
            net_dir = s.net_margin_trend.as_str(),
            cur = format_ratio(s.latest.current_ratio),
            liquidity = s.liquidity.annotation(),
            quick = format_ratio(s.latest.quick_ratio),
            de = format_ratio(s.latest.debt_to_equity),
            de_dir = s.leverage_trend.as_str(),
            roe = format_pct(s.latest.roe),
            periods = s.periods,
        );

        if style.includes_methodology() {
            body.push_str("\n\n");
            body.push_str(METHODOLOGY_NOTE);
        }

        body
    }
}

impl Default for SummaryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper over [`SummaryGenerator::generate`].
pub fn generate_summary(
    ratios: &[RatioRow],
    sentiment: Option<&SentimentTable>,
    label: &str,
    currency: &str,
    style: SummaryStyle,
) -> String {
    SummaryGenerator::new().generate(ratios, sentiment, label, currency, style)
}
