//! Joins per-event weather onto the wildfire table.

use crate::climate::date_index::DateFileIndex;
use crate::climate::lookup::sample_on;
use crate::fires::error::FireTableError;
use crate::fires::table::{
    COL_DAY, COL_LATITUDE, COL_LONGITUDE, COL_MONTH, COL_YEAR, WEATHER_COLUMNS,
};
use log::info;
use polars::prelude::*;

const PROGRESS_EVERY: usize = 1000;

/// Appends the six weather columns to a fire event table.
///
/// Each row is looked up by its own date and location; rows whose lookup
/// yields no data keep nulls in all six new columns while every original
/// column is carried through untouched. Row count and order are preserved,
/// and a failed row never aborts the batch. The input frame is not mutated;
/// a new augmented frame is returned.
pub fn join_weather(df: &DataFrame, index: &DateFileIndex) -> Result<DataFrame, FireTableError> {
    let column = |name: &str| {
        df.column(name)
            .map_err(|e| FireTableError::Column(name.to_string(), e))
    };
    let years = column(COL_YEAR)?
        .str()
        .map_err(|e| FireTableError::Column(COL_YEAR.to_string(), e))?;
    let months = column(COL_MONTH)?
        .str()
        .map_err(|e| FireTableError::Column(COL_MONTH.to_string(), e))?;
    let days = column(COL_DAY)?
        .str()
        .map_err(|e| FireTableError::Column(COL_DAY.to_string(), e))?;
    let lats = column(COL_LATITUDE)?
        .f64()
        .map_err(|e| FireTableError::Column(COL_LATITUDE.to_string(), e))?;
    let lons = column(COL_LONGITUDE)?
        .f64()
        .map_err(|e| FireTableError::Column(COL_LONGITUDE.to_string(), e))?;

    let n = df.height();
    let mut humidity: Vec<Option<f64>> = Vec::with_capacity(n);
    let mut temperature: Vec<Option<f64>> = Vec::with_capacity(n);
    let mut ice: Vec<Option<f64>> = Vec::with_capacity(n);
    let mut water: Vec<Option<f64>> = Vec::with_capacity(n);
    let mut vapor: Vec<Option<f64>> = Vec::with_capacity(n);
    let mut wind: Vec<Option<f64>> = Vec::with_capacity(n);
    let mut matched = 0usize;

    for row in 0..n {
        let sample = match (
            years.get(row),
            months.get(row),
            days.get(row),
            lats.get(row),
            lons.get(row),
        ) {
            (Some(year), Some(month), Some(day), Some(lat), Some(lon)) => {
                sample_on(index, year, month, day, lat, lon)
            }
            _ => None,
        };

        match sample {
            Some(s) => {
                humidity.push(Some(s.specific_humidity));
                temperature.push(Some(s.temperature));
                ice.push(Some(s.precip_ice));
                water.push(Some(s.precip_water));
                vapor.push(Some(s.precip_vapor));
                wind.push(Some(s.wind_speed));
                matched += 1;
            }
            None => {
                humidity.push(None);
                temperature.push(None);
                ice.push(None);
                water.push(None);
                vapor.push(None);
                wind.push(None);
            }
        }

        if row % PROGRESS_EVERY == 0 {
            info!("Associated weather for {row}/{n} fire events");
        }
    }
    info!("Weather association complete: {matched}/{n} events matched");

    let mut out = df.clone();
    let [h_name, t_name, i_name, w_name, v_name, wd_name] = WEATHER_COLUMNS;
    out.with_column(Series::new(h_name.into(), humidity))?;
    out.with_column(Series::new(t_name.into(), temperature))?;
    out.with_column(Series::new(i_name.into(), ice))?;
    out.with_column(Series::new(w_name.into(), water))?;
    out.with_column(Series::new(v_name.into(), vapor))?;
    out.with_column(Series::new(wd_name.into(), wind))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::testutil::{standard_variables, write_constant_granule};
    use approx::assert_relative_eq;
    use tempfile::tempdir;

    fn sample_table() -> DataFrame {
        df!(
            COL_YEAR => ["2015", "2015", "2015"],
            COL_MONTH => ["9", "9", "9"],
            COL_DAY => ["9", "9", "10"],
            COL_LATITUDE => [54.5, 10.0, 54.5],
            COL_LONGITUDE => [-127.0, -127.0, -127.0],
            "SIZE_HA" => [1.5, 20.0, 0.4],
            "CAUSE" => ["L", "H", "L"],
        )
        .unwrap()
    }

    #[test]
    fn augments_matching_rows_and_leaves_others_null() {
        let dir = tempdir().unwrap();
        write_constant_granule(
            &dir.path().join("foo_20150909.nc"),
            &standard_variables(2.0, 0.0),
        );
        let index = DateFileIndex::build(dir.path()).unwrap();

        let df = sample_table();
        let joined = join_weather(&df, &index).expect("join");

        // Row identity and original columns preserved.
        assert_eq!(joined.height(), 3);
        assert_eq!(
            joined.column("CAUSE").unwrap().str().unwrap().get(1),
            Some("H")
        );
        assert_eq!(
            joined.column("SIZE_HA").unwrap().f64().unwrap().get(2),
            Some(0.4)
        );

        let wind = joined.column("WIND").unwrap().f64().unwrap();
        // Row 0: valid date and location.
        assert_relative_eq!(wind.get(0).unwrap(), 2.0);
        // Row 1: latitude outside the supported domain.
        assert_eq!(wind.get(1), None);
        // Row 2: no granule for Sept 10.
        assert_eq!(wind.get(2), None);

        // The no-data row is uniformly null across all six columns.
        for name in WEATHER_COLUMNS {
            assert_eq!(joined.column(name).unwrap().f64().unwrap().get(1), None);
        }
        // The matched row is uniformly populated.
        for name in WEATHER_COLUMNS {
            assert!(joined.column(name).unwrap().f64().unwrap().get(0).is_some());
        }
    }

    #[test]
    fn empty_index_leaves_every_row_null() {
        let index = DateFileIndex::default();
        let df = sample_table();
        let joined = join_weather(&df, &index).expect("join");
        assert_eq!(joined.height(), 3);
        assert_eq!(
            joined
                .column("SPECIFIC_HUMIDITY")
                .unwrap()
                .f64()
                .unwrap()
                .null_count(),
            3
        );
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let index = DateFileIndex::default();
        let df = df!("YEAR" => ["2015"]).unwrap();
        assert!(matches!(
            join_weather(&df, &index),
            Err(FireTableError::Column(_, _))
        ));
    }
}
