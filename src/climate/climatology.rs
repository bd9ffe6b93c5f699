//! Day-of-year climatological estimates ("future" mode).
//!
//! Absent an actual forecast, the expected conditions for a month/day are
//! approximated by averaging the historical record for that calendar day
//! across every year that has data.

use crate::climate::date_index::DateFileIndex;
use crate::climate::lookup::read_sample;
use crate::climate::{in_domain, WeatherSample};
use chrono::NaiveDate;
use log::warn;
use std::ops::RangeInclusive;

/// Years the MERRA-2 record spans, inclusive.
pub const DEFAULT_CLIMATOLOGY_YEARS: RangeInclusive<i32> = 1980..=2024;

/// Mean weather for a month/day and location across `years`.
///
/// Each candidate year contributes one sample if its date key is indexed;
/// years without data, and years whose granule fails to read, are skipped.
/// Returns the arithmetic per-variable mean, or `None` when the point is
/// outside the domain, the date parts are malformed, or no year contributed
/// a sample. The zero-sample case is an explicit `None`, not a division by
/// zero.
pub fn estimate(
    index: &DateFileIndex,
    month: &str,
    day: &str,
    lat: f64,
    lon: f64,
    years: RangeInclusive<i32>,
) -> Option<WeatherSample> {
    if !in_domain(lat, lon) {
        return None;
    }
    let m: u32 = month.trim().parse().ok()?;
    let d: u32 = day.trim().parse().ok()?;

    let mut sum = WeatherSample {
        specific_humidity: 0.0,
        temperature: 0.0,
        precip_ice: 0.0,
        precip_water: 0.0,
        precip_vapor: 0.0,
        wind_speed: 0.0,
    };
    let mut count = 0u32;

    for year in years {
        // Feb 29 simply contributes nothing in non-leap years.
        if NaiveDate::from_ymd_opt(year, m, d).is_none() {
            continue;
        }
        let key = format!("{year:04}{m:02}{d:02}");
        let Some(path) = index.first_file(&key) else {
            continue;
        };
        match read_sample(path, lat, lon) {
            Ok(sample) => {
                sum.specific_humidity += sample.specific_humidity;
                sum.temperature += sample.temperature;
                sum.precip_ice += sample.precip_ice;
                sum.precip_water += sample.precip_water;
                sum.precip_vapor += sample.precip_vapor;
                sum.wind_speed += sample.wind_speed;
                count += 1;
            }
            Err(e) => {
                warn!("Climatology read for {key} at ({lat}, {lon}) failed: {e}");
            }
        }
    }

    if count == 0 {
        return None;
    }
    let n = f64::from(count);
    Some(WeatherSample {
        specific_humidity: sum.specific_humidity / n,
        temperature: sum.temperature / n,
        precip_ice: sum.precip_ice / n,
        precip_water: sum.precip_water / n,
        precip_vapor: sum.precip_vapor / n,
        wind_speed: sum.wind_speed / n,
    })
}
