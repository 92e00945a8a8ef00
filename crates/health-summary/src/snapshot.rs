use analysis_core::stats::{trailing_mean, window_delta};
use analysis_core::{Ratio, RatioKind, RatioRow, SentimentTable};

/// Rows considered when classifying a ratio's direction.
pub const TREND_WINDOW: usize = 4;
/// Minimum absolute change that counts as a move.
pub const TREND_THRESHOLD: f64 = 0.02;
/// Headlines averaged for the sentiment reading.
pub const SENTIMENT_WINDOW: usize = 30;
/// Average compound beyond which sentiment is called positive or negative.
pub const SENTIMENT_THRESHOLD: f64 = 0.05;

// Absorbs representation error so deltas like 0.28 - 0.30 stay on the boundary.
const BOUNDARY_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Improving,
    Worsening,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Worsening => "worsening",
            Trend::Stable => "stable",
        }
    }

    /// Classify a last-minus-first change. An unknown change is stable.
    pub fn from_delta(delta: Option<f64>) -> Self {
        match delta {
            Some(d) if d > TREND_THRESHOLD + BOUNDARY_TOLERANCE => Trend::Improving,
            Some(d) if d < -TREND_THRESHOLD - BOUNDARY_TOLERANCE => Trend::Worsening,
            _ => Trend::Stable,
        }
    }

    /// Direction of one ratio over the trailing window of `rows`.
    ///
    /// Undefined cells are skipped; fewer than two defined values is stable.
    pub fn for_ratio(rows: &[RatioRow], kind: RatioKind) -> Self {
        let series: Vec<Ratio> = rows.iter().map(|r| r.get(kind)).collect();
        Self::for_series(&series)
    }

    pub fn for_series(series: &[Ratio]) -> Self {
        Self::from_delta(window_delta(series, TREND_WINDOW))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBias {
    Positive,
    Negative,
    Mixed,
}

impl SentimentBias {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentBias::Positive => "positive",
            SentimentBias::Negative => "negative",
            SentimentBias::Mixed => "mixed",
        }
    }

    pub fn from_average(avg: f64) -> Self {
        if avg > SENTIMENT_THRESHOLD {
            SentimentBias::Positive
        } else if avg < -SENTIMENT_THRESHOLD {
            SentimentBias::Negative
        } else {
            SentimentBias::Mixed
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentReading {
    pub bias: SentimentBias,
    pub average: f64,
}

impl SentimentReading {
    /// Average compound over the trailing headlines.
    ///
    /// `None` when the table is absent, empty, lacks a compound column, or
    /// holds no defined compound value in the window.
    pub fn from_table(table: Option<&SentimentTable>) -> Option<Self> {
        let table = table.filter(|t| !t.is_empty())?;
        if !table.has_compound() {
            tracing::warn!("sentiment table has no compound column, omitting sentiment");
            return None;
        }
        let compounds: Vec<Option<f64>> = table.rows.iter().map(|r| r.compound).collect();
        let average = trailing_mean(&compounds, SENTIMENT_WINDOW)?;
        Some(Self {
            bias: SentimentBias::from_average(average),
            average,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquidityNote {
    Healthy,
    AtRisk,
    Unknown,
}

impl LiquidityNote {
    pub fn from_current_ratio(current_ratio: Ratio) -> Self {
        match current_ratio.filter(|v| v.is_finite()) {
            Some(v) if v >= 1.0 => LiquidityNote::Healthy,
            Some(_) => LiquidityNote::AtRisk,
            None => LiquidityNote::Unknown,
        }
    }

    pub fn annotation(&self) -> &'static str {
        match self {
            LiquidityNote::Healthy => "healthy: at or above 1.0",
            LiquidityNote::AtRisk => "risk: below 1.0",
            LiquidityNote::Unknown => "n/a",
        }
    }
}

/// Everything the narrative needs, extracted from the input tables.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthSnapshot {
    pub latest: RatioRow,
    pub periods: usize,
    pub gross_margin_trend: Trend,
    pub net_margin_trend: Trend,
    pub leverage_trend: Trend,
    pub liquidity: LiquidityNote,
    pub sentiment: Option<SentimentReading>,
}

impl HealthSnapshot {
    /// `None` when there are no ratio rows.
    pub fn build(ratios: &[RatioRow], sentiment: Option<&SentimentTable>) -> Option<Self> {
        let latest = ratios.last()?.clone();
        debug_assert!(
            ratios.windows(2).all(|w| w[0].date <= w[1].date),
            "ratio rows must be sorted ascending by date"
        );

        Some(Self {
            liquidity: LiquidityNote::from_current_ratio(latest.current_ratio),
            latest,
            periods: ratios.len(),
            gross_margin_trend: Trend::for_ratio(ratios, RatioKind::GrossMargin),
            net_margin_trend: Trend::for_ratio(ratios, RatioKind::NetMargin),
            leverage_trend: Trend::for_ratio(ratios, RatioKind::DebtToEquity),
            sentiment: SentimentReading::from_table(sentiment),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_improving() {
        assert_eq!(Trend::for_series(&[Some(0.10), Some(0.11), Some(0.13)]), Trend::Improving);
    }

    #[test]
    fn test_trend_boundary_is_stable() {
        assert_eq!(Trend::for_series(&[Some(0.30), Some(0.29), Some(0.28)]), Trend::Stable);
        assert_eq!(Trend::for_series(&[Some(0.28), Some(0.29), Some(0.30)]), Trend::Stable);
    }

    #[test]
    fn test_trend_worsening() {
        assert_eq!(Trend::for_series(&[Some(0.30), Some(0.27)]), Trend::Worsening);
    }

    #[test]
    fn test_trend_short_or_undefined_series_is_stable() {
        assert_eq!(Trend::for_series(&[]), Trend::Stable);
        assert_eq!(Trend::for_series(&[Some(0.5)]), Trend::Stable);
        assert_eq!(Trend::for_series(&[None, Some(0.5), None]), Trend::Stable);
    }

    #[test]
    fn test_trend_uses_last_four_rows_only() {
        // 0.90 falls outside the window, so the delta is 0.10 -> 0.11.
        let series = [Some(0.90), Some(0.10), Some(0.12), Some(0.09), Some(0.11)];
        assert_eq!(Trend::for_series(&series), Trend::Stable);
    }

    #[test]
    fn test_trend_skips_undefined_cells() {
        let series = [Some(0.20), None, Some(0.25), None];
        assert_eq!(Trend::for_series(&series), Trend::Improving);
    }

    #[test]
    fn test_sentiment_bias_thresholds() {
        assert_eq!(SentimentBias::from_average(0.10), SentimentBias::Positive);
        assert_eq!(SentimentBias::from_average(0.05), SentimentBias::Mixed);
        assert_eq!(SentimentBias::from_average(-0.05), SentimentBias::Mixed);
        assert_eq!(SentimentBias::from_average(-0.2), SentimentBias::Negative);
    }

    #[test]
    fn test_liquidity_note() {
        assert_eq!(LiquidityNote::from_current_ratio(Some(1.0)), LiquidityNote::Healthy);
        assert_eq!(LiquidityNote::from_current_ratio(Some(0.8)), LiquidityNote::AtRisk);
        assert_eq!(LiquidityNote::from_current_ratio(None), LiquidityNote::Unknown);
        assert_eq!(LiquidityNote::from_current_ratio(Some(f64::NAN)), LiquidityNote::Unknown);
    }
}
