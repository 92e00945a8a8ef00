use analysis_core::AnalysisError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Narrative variants for the health summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SummaryStyle {
    /// Snapshot only.
    #[default]
    ExecutiveBrief,
    /// Snapshot plus a methodology note.
    AnalystDeepDive,
}

impl SummaryStyle {
    pub const ALL: [SummaryStyle; 2] = [SummaryStyle::ExecutiveBrief, SummaryStyle::AnalystDeepDive];

    pub fn label(&self) -> &'static str {
        match self {
            SummaryStyle::ExecutiveBrief => "Executive brief",
            SummaryStyle::AnalystDeepDive => "Analyst deep-dive",
        }
    }

    pub fn includes_methodology(&self) -> bool {
        matches!(self, SummaryStyle::AnalystDeepDive)
    }

    /// Lenient lookup: anything unrecognized falls back to the executive brief.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_else(|_| {
            tracing::warn!(label, "unrecognized summary style, using executive brief");
            SummaryStyle::ExecutiveBrief
        })
    }
}

impl FromStr for SummaryStyle {
    type Err = AnalysisError;

    /// Strict lookup. Accepts the display labels case-insensitively, plus
    /// the short forms `brief` and `deep-dive`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "executive brief" | "executive-brief" | "brief" => Ok(SummaryStyle::ExecutiveBrief),
            "analyst deep-dive" | "analyst deep dive" | "deep-dive" | "analyst" => {
                Ok(SummaryStyle::AnalystDeepDive)
            }
            _ => Err(AnalysisError::Config(format!(
                "unknown summary style '{}'; expected one of: {}",
                s,
                SummaryStyle::ALL.map(|st| st.label()).join(", ")
            ))),
        }
    }
}

impl fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
