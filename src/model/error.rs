use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("No input tables were provided")]
    NoInput,

    #[error("Failed to scan processed fire table '{0}'")]
    TableScan(PathBuf, #[source] PolarsError),

    #[error("Required column '{0}' is missing or non-numeric")]
    Column(String, #[source] PolarsError),

    #[error("Cleaning removed every row; nothing left to fit")]
    EmptyAfterCleaning,

    #[error("Feature '{0}' has zero variance after cleaning")]
    ZeroVariance(String),

    #[error("Need more observations than regressors ({rows} rows, {regressors} regressors)")]
    TooFewRows { rows: usize, regressors: usize },

    #[error("Principal component decomposition is degenerate")]
    DegeneratePca,

    #[error("Least-squares system is singular")]
    SingularFit,

    #[error(transparent)]
    Polars(#[from] PolarsError),
}
