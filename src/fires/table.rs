//! Reading and writing the wildfire event table.
//!
//! The source table (Canadian NFDB point export) carries YEAR, MONTH and DAY
//! as loosely formatted strings, LATITUDE/LONGITUDE as floats, SIZE_HA, CAUSE
//! and a set of pre-joined land-surface columns. The date parts must stay
//! strings: inferring them as integers would lose nothing numerically but the
//! join keys are formed from the raw text.

use crate::fires::error::FireTableError;
use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;

pub const COL_YEAR: &str = "YEAR";
pub const COL_MONTH: &str = "MONTH";
pub const COL_DAY: &str = "DAY";
pub const COL_LATITUDE: &str = "LATITUDE";
pub const COL_LONGITUDE: &str = "LONGITUDE";

/// The six columns the join appends, in output order.
pub const WEATHER_COLUMNS: [&str; 6] = [
    "SPECIFIC_HUMIDITY",
    "TEMP",
    "PRECIP_ICE",
    "PRECIP_WATER",
    "PRECIP_VAPOR",
    "WIND",
];

/// Reads the wildfire CSV, forcing the date-part columns to stay strings.
pub fn read_fire_table(path: &Path) -> Result<DataFrame, FireTableError> {
    let overrides = Schema::from_iter([
        Field::new(COL_YEAR.into(), DataType::String),
        Field::new(COL_MONTH.into(), DataType::String),
        Field::new(COL_DAY.into(), DataType::String),
    ]);

    CsvReadOptions::default()
        .with_has_header(true)
        .with_schema_overwrite(Some(Arc::new(overrides)))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| FireTableError::Read(path.to_path_buf(), e))?
        .finish()
        .map_err(|e| FireTableError::Read(path.to_path_buf(), e))
}

/// Writes the (augmented) table back out as CSV, header included, row order
/// preserved.
pub fn write_fire_table(df: &mut DataFrame, path: &Path) -> Result<(), FireTableError> {
    let file = std::fs::File::create(path)
        .map_err(|e| FireTableError::WriteIo(path.to_path_buf(), e))?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(df)
        .map_err(|e| FireTableError::WriteCsv(path.to_path_buf(), e))
}
