//! Point weather lookup for an exact historical date ("past" mode).

use crate::climate::date_index::DateFileIndex;
use crate::climate::error::ClimateDataError;
use crate::climate::grid::GridDataset;
use crate::climate::{in_domain, WeatherSample};
use chrono::NaiveDate;
use log::warn;
use std::path::Path;

/// MERRA-2 variable names behind each [`WeatherSample`] field.
pub const VAR_SPECIFIC_HUMIDITY: &str = "QV2M";
pub const VAR_TEMPERATURE: &str = "T2M";
pub const VAR_PRECIP_ICE: &str = "TQI";
pub const VAR_PRECIP_WATER: &str = "TQL";
pub const VAR_PRECIP_VAPOR: &str = "TQV";
pub const VAR_WIND_EAST: &str = "U2M";
pub const VAR_WIND_NORTH: &str = "V2M";

/// Forms the 8-digit `YYYYMMDD` key from loosely formatted date parts.
///
/// Month and day arrive as 1-2 digit strings ("9" and "09" form the same
/// key). Parts that do not parse, or do not form a real calendar date,
/// yield `None`.
pub(crate) fn date_key(year: &str, month: &str, day: &str) -> Option<String> {
    let y: i32 = year.trim().parse().ok()?;
    let m: u32 = month.trim().parse().ok()?;
    let d: u32 = day.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(y, m, d)?;
    Some(format!("{y:04}{m:02}{d:02}"))
}

/// Reads all six derived variables from one granule, opening it once.
pub(crate) fn read_sample(path: &Path, lat: f64, lon: f64) -> Result<WeatherSample, ClimateDataError> {
    let grid = GridDataset::open(path)?;
    let east = grid.interpolate(VAR_WIND_EAST, lat, lon)?;
    let north = grid.interpolate(VAR_WIND_NORTH, lat, lon)?;
    Ok(WeatherSample {
        specific_humidity: grid.interpolate(VAR_SPECIFIC_HUMIDITY, lat, lon)?,
        temperature: grid.interpolate(VAR_TEMPERATURE, lat, lon)?,
        precip_ice: grid.interpolate(VAR_PRECIP_ICE, lat, lon)?,
        precip_water: grid.interpolate(VAR_PRECIP_WATER, lat, lon)?,
        precip_vapor: grid.interpolate(VAR_PRECIP_VAPOR, lat, lon)?,
        wind_speed: east.hypot(north),
    })
}

/// Weather for an exact date and location, or `None` when no data exists.
///
/// Returns `None` for any precondition failure: unparseable date parts, a
/// point outside the supported domain, or a date with no indexed file. A
/// malformed granule is caught here too and converted to `None` (with a
/// warning) so a batch join never aborts on a single bad file. The result is
/// never partial.
pub fn sample_on(
    index: &DateFileIndex,
    year: &str,
    month: &str,
    day: &str,
    lat: f64,
    lon: f64,
) -> Option<WeatherSample> {
    if !in_domain(lat, lon) {
        return None;
    }
    let key = date_key(year, month, day)?;
    let path = index.first_file(&key)?;
    match read_sample(path, lat, lon) {
        Ok(sample) => Some(sample),
        Err(e) => {
            warn!("Weather lookup for {key} at ({lat}, {lon}) failed: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::testutil::{standard_variables, write_constant_granule};
    use approx::assert_relative_eq;
    use tempfile::tempdir;

    #[test]
    fn returns_full_sample_for_indexed_date() {
        let dir = tempdir().unwrap();
        write_constant_granule(
            &dir.path().join("foo_20150809.nc"),
            &standard_variables(2.0, 0.0),
        );
        let index = DateFileIndex::build(dir.path()).unwrap();

        let sample = sample_on(&index, "2015", "8", "9", 54.5, -127.0).expect("sample");
        assert_relative_eq!(sample.specific_humidity, 0.01);
        assert_relative_eq!(sample.temperature, 290.0);
        assert_relative_eq!(sample.precip_ice, 0.0);
        assert_relative_eq!(sample.precip_water, 0.0);
        assert_relative_eq!(sample.precip_vapor, 10.0);
        assert_relative_eq!(sample.wind_speed, 2.0);
    }

    #[test]
    fn wind_speed_is_vector_magnitude() {
        let dir = tempdir().unwrap();
        write_constant_granule(
            &dir.path().join("foo_20150809.nc"),
            &standard_variables(3.0, 4.0),
        );
        let index = DateFileIndex::build(dir.path()).unwrap();

        let sample = sample_on(&index, "2015", "8", "9", 54.5, -127.0).expect("sample");
        assert_relative_eq!(sample.wind_speed, 5.0);
    }

    #[test]
    fn zero_padded_and_bare_date_parts_agree() {
        let dir = tempdir().unwrap();
        write_constant_granule(
            &dir.path().join("foo_20150909.nc"),
            &standard_variables(2.0, 0.0),
        );
        let index = DateFileIndex::build(dir.path()).unwrap();

        let bare = sample_on(&index, "2015", "9", "9", 54.5, -127.0);
        let padded = sample_on(&index, "2015", "09", "09", 54.5, -127.0);
        assert!(bare.is_some());
        assert_eq!(bare, padded);
    }

    #[test]
    fn unindexed_date_yields_none() {
        let dir = tempdir().unwrap();
        write_constant_granule(
            &dir.path().join("foo_20150809.nc"),
            &standard_variables(2.0, 0.0),
        );
        let index = DateFileIndex::build(dir.path()).unwrap();

        assert_eq!(sample_on(&index, "2015", "8", "10", 54.5, -127.0), None);
    }

    #[test]
    fn out_of_domain_yields_none_before_io() {
        // An empty index proves the domain check runs before any file access.
        let index = DateFileIndex::default();
        assert_eq!(sample_on(&index, "2015", "8", "9", 10.0, -127.0), None);
        assert_eq!(sample_on(&index, "2015", "8", "9", 54.5, 10.0), None);
    }

    #[test]
    fn malformed_inputs_yield_none() {
        let index = DateFileIndex::default();
        assert_eq!(sample_on(&index, "", "8", "9", 54.5, -127.0), None);
        assert_eq!(sample_on(&index, "2015", "13", "9", 54.5, -127.0), None);
        assert_eq!(sample_on(&index, "2015", "2", "30", 54.5, -127.0), None);
    }

    #[test]
    fn malformed_granule_yields_none() {
        let dir = tempdir().unwrap();
        // Granule exists for the date but lacks the weather variables.
        write_constant_granule(&dir.path().join("foo_20150809.nc"), &[("UNRELATED", 1.0)]);
        let index = DateFileIndex::build(dir.path()).unwrap();

        assert_eq!(sample_on(&index, "2015", "8", "9", 54.5, -127.0), None);
    }

    #[test]
    fn date_key_is_zero_padded() {
        assert_eq!(date_key("2015", "9", "9").as_deref(), Some("20150909"));
        assert_eq!(date_key("2015", "09", "09").as_deref(), Some("20150909"));
        assert_eq!(date_key("2015", "12", "31").as_deref(), Some("20151231"));
        assert_eq!(date_key("2015", "0", "9"), None);
        assert_eq!(date_key("abcd", "9", "9"), None);
    }
}
