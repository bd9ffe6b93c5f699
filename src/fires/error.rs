use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FireTableError {
    #[error("Failed to read wildfire table '{0}'")]
    Read(PathBuf, #[source] PolarsError),

    #[error("Failed to create output table '{0}'")]
    WriteIo(PathBuf, #[source] std::io::Error),

    #[error("Failed to encode output table '{0}'")]
    WriteCsv(PathBuf, #[source] PolarsError),

    #[error("Required column '{0}' is missing or has the wrong type")]
    Column(String, #[source] PolarsError),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}
