//! Date-indexed access to gridded MERRA-2 climate data.
//!
//! [`date_index::DateFileIndex`] maps 8-digit date keys to granule paths,
//! [`grid`] interpolates a named variable at a point, and [`lookup`] /
//! [`climatology`] combine the two into six derived weather variables for a
//! dated fire location ("past" mode) or a day-of-year average across the
//! historical record ("future" mode).

pub mod climatology;
pub mod date_index;
pub mod error;
pub mod grid;
pub mod lookup;
#[cfg(test)]
pub(crate) mod testutil;

use std::ops::Range;

/// Latitudes the supported MERRA-2 subset covers, as an open interval.
pub const LAT_RANGE: Range<f64> = 25.0..84.0;

/// Longitudes the supported MERRA-2 subset covers, as an open interval.
pub const LON_RANGE: Range<f64> = -172.0..-52.0;

/// Whether a point lies strictly inside the supported geographic domain.
///
/// Evaluated before any file I/O; a point outside it always yields "no data".
pub fn in_domain(lat: f64, lon: f64) -> bool {
    lat > LAT_RANGE.start && lat < LAT_RANGE.end && lon > LON_RANGE.start && lon < LON_RANGE.end
}

/// The six derived climate variables for one date and location.
///
/// A sample is all-or-nothing: lookups return `Option<WeatherSample>`, never a
/// partially populated tuple. Units follow MERRA-2: specific humidity in
/// kg/kg, temperature in K, the precipitable quantities in kg/m^2, wind in
/// m/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherSample {
    pub specific_humidity: f64,
    pub temperature: f64,
    pub precip_ice: f64,
    pub precip_water: f64,
    pub precip_vapor: f64,
    pub wind_speed: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_accepts_interior_points() {
        assert!(in_domain(54.5692, -126.9287));
        assert!(in_domain(25.1, -171.9));
    }

    #[test]
    fn domain_is_an_open_interval() {
        assert!(!in_domain(25.0, -127.0));
        assert!(!in_domain(84.0, -127.0));
        assert!(!in_domain(54.5, -172.0));
        assert!(!in_domain(54.5, -52.0));
    }

    #[test]
    fn domain_rejects_far_points() {
        assert!(!in_domain(0.0, 160.0));
        assert!(!in_domain(-54.5, -127.0));
    }
}
