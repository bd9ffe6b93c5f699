use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateDataError {
    #[error("Failed to scan data directory '{0}'")]
    DirScan(PathBuf, #[source] std::io::Error),

    #[error("Failed to open gridded dataset '{0}'")]
    DatasetOpen(PathBuf, #[source] netcdf::Error),

    #[error("No latitude/longitude coordinate variables in '{0}'")]
    MissingCoordinates(PathBuf),

    #[error("Variable '{variable}' not found in '{path}'")]
    MissingVariable { path: PathBuf, variable: String },

    #[error("Failed to read variable '{variable}' from '{path}'")]
    VariableRead {
        path: PathBuf,
        variable: String,
        #[source]
        source: netcdf::Error,
    },

    #[error("Variable '{variable}' in '{path}' has unsupported rank {ndims}")]
    UnsupportedShape {
        path: PathBuf,
        variable: String,
        ndims: usize,
    },

    #[error("Point ({lat}, {lon}) lies outside the grid of '{path}'")]
    OutOfGrid { path: PathBuf, lat: f64, lon: f64 },
}
