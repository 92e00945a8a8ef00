use crate::{AnalysisError, RatioRow, StatementTable};

/// Trait for engines that turn statement tables into ratio tables
pub trait RatioCalculator: Send + Sync {
    fn compute(&self, statements: &StatementTable) -> Result<Vec<RatioRow>, AnalysisError>;
}

/// Trait for headline polarity scorers.
///
/// Implementations return a compound score in [-1, 1].
pub trait HeadlineScorer: Send + Sync {
    fn compound(&self, headline: &str) -> f64;
}
