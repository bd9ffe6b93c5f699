//! Shared fixtures for tests that need real granule files on disk.

use crate::climate::lookup::{
    VAR_PRECIP_ICE, VAR_PRECIP_VAPOR, VAR_PRECIP_WATER, VAR_SPECIFIC_HUMIDITY, VAR_TEMPERATURE,
    VAR_WIND_EAST, VAR_WIND_NORTH,
};
use std::path::Path;

/// Writes a granule whose variables are constant over a 3x3 grid containing
/// (54.5, -127.0) as a node.
pub(crate) fn write_constant_granule(path: &Path, values: &[(&str, f64)]) {
    let lats = [54.0, 54.5, 55.0];
    let lons = [-127.5, -127.0, -126.5];
    let mut file = netcdf::create(path).expect("create netcdf");
    file.add_dimension("time", 1).unwrap();
    file.add_dimension("lat", lats.len()).unwrap();
    file.add_dimension("lon", lons.len()).unwrap();

    let mut lat_var = file.add_variable::<f64>("lat", &["lat"]).unwrap();
    lat_var.put_values(&lats, ..).unwrap();
    let mut lon_var = file.add_variable::<f64>("lon", &["lon"]).unwrap();
    lon_var.put_values(&lons, ..).unwrap();

    for (name, value) in values {
        let mut var = file
            .add_variable::<f64>(name, &["time", "lat", "lon"])
            .unwrap();
        var.put_values(&[*value; 9], ..).unwrap();
    }
}

/// The full MERRA-2 variable set with chosen wind components.
pub(crate) fn standard_variables(u2m: f64, v2m: f64) -> Vec<(&'static str, f64)> {
    vec![
        (VAR_SPECIFIC_HUMIDITY, 0.01),
        (VAR_TEMPERATURE, 290.0),
        (VAR_PRECIP_ICE, 0.0),
        (VAR_PRECIP_WATER, 0.0),
        (VAR_PRECIP_VAPOR, 10.0),
        (VAR_WIND_EAST, u2m),
        (VAR_WIND_NORTH, v2m),
    ]
}
