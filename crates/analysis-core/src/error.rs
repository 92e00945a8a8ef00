use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// One or more required statement columns are absent from the input table.
    #[error("Missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalysisError {
    /// Column names carried by a schema error, empty for every other kind.
    pub fn missing_columns(&self) -> &[String] {
        match self {
            AnalysisError::Schema { missing } => missing,
            _ => &[],
        }
    }
}
