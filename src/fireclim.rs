//! The main entry point for querying local MERRA-2 granules against fire
//! records: index a data directory once, then look up weather for single
//! events, estimate climatological normals, or augment a whole fire table.

use crate::climate::climatology::{estimate, DEFAULT_CLIMATOLOGY_YEARS};
use crate::climate::date_index::DateFileIndex;
use crate::climate::lookup::sample_on;
use crate::climate::WeatherSample;
use crate::error::FireClimError;
use crate::fires::join::join_weather;
use bon::bon;
use polars::frame::DataFrame;
use std::ops::RangeInclusive;
use std::path::Path;

/// Client over an indexed directory of MERRA-2 monthly-mean granules.
///
/// # Examples
///
/// ```no_run
/// use fireclim::FireClim;
/// use std::path::Path;
///
/// # fn run() -> Result<(), fireclim::FireClimError> {
/// let client = FireClim::open(Path::new("merra2_data"))?;
/// let weather = client.weather_on("2015", "9", "9", 54.5, -127.0);
/// let normals = client
///     .climatology()
///     .month("9")
///     .day("9")
///     .latitude(54.5)
///     .longitude(-127.0)
///     .call();
/// # Ok(())
/// # }
/// ```
pub struct FireClim {
    index: DateFileIndex,
}

#[bon]
impl FireClim {
    /// Indexes every dated granule under `data_dir`. The directory is
    /// scanned once; reopen to pick up new files.
    pub fn open(data_dir: &Path) -> Result<Self, FireClimError> {
        let index = DateFileIndex::build(data_dir)?;
        Ok(Self { index })
    }

    pub fn index(&self) -> &DateFileIndex {
        &self.index
    }

    /// Weather at a point on a specific historical date. `None` when the
    /// point is outside the supported domain, the date is malformed, or no
    /// granule covers that date.
    pub fn weather_on(
        &self,
        year: &str,
        month: &str,
        day: &str,
        latitude: f64,
        longitude: f64,
    ) -> Option<WeatherSample> {
        sample_on(&self.index, year, month, day, latitude, longitude)
    }

    /// Climatological normal for a calendar day: the per-variable mean over
    /// that day across the sampled years (1980 through 2024 unless `years`
    /// overrides it).
    ///
    /// # Arguments
    ///
    /// * `.month(&str)` / `.day(&str)`: **Required.** Calendar day, 1-2 digit
    ///   strings as they appear in fire records.
    /// * `.latitude(f64)` / `.longitude(f64)`: **Required.** Query point.
    /// * `.years(RangeInclusive<i32>)`: Optional. Years to average over.
    #[builder]
    pub fn climatology(
        &self,
        month: &str,
        day: &str,
        latitude: f64,
        longitude: f64,
        years: Option<RangeInclusive<i32>>,
    ) -> Option<WeatherSample> {
        let years = years.unwrap_or(DEFAULT_CLIMATOLOGY_YEARS);
        estimate(&self.index, month, day, latitude, longitude, years)
    }

    /// Appends the six weather columns to a fire event table, row for row.
    pub fn join_events(&self, df: &DataFrame) -> Result<DataFrame, FireClimError> {
        Ok(join_weather(df, &self.index)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::testutil::{standard_variables, write_constant_granule};
    use approx::assert_relative_eq;
    use tempfile::tempdir;

    #[test]
    fn client_answers_point_and_climatology_queries() {
        let dir = tempdir().unwrap();
        write_constant_granule(
            &dir.path().join("MERRA2_400.tavgM_2d_slv_Nx.20150909.nc"),
            &standard_variables(3.0, 4.0),
        );
        let client = FireClim::open(dir.path()).expect("open");
        assert_eq!(client.index().len(), 1);

        let sample = client.weather_on("2015", "9", "9", 54.5, -127.0).unwrap();
        assert_relative_eq!(sample.wind_speed, 5.0);

        let normal = client
            .climatology()
            .month("9")
            .day("9")
            .latitude(54.5)
            .longitude(-127.0)
            .years(2015..=2015)
            .call()
            .unwrap();
        assert_relative_eq!(normal.wind_speed, 5.0);
    }

    #[test]
    fn open_fails_on_a_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(FireClim::open(&missing).is_err());
    }
}
