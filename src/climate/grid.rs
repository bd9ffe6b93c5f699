//! Point access to one gridded monthly-mean dataset file.

use crate::climate::error::ClimateDataError;
use std::path::{Path, PathBuf};

/// One opened granule, with its coordinate axes read up front.
///
/// Opened fresh per lookup and dropped on return; nothing is cached across
/// calls. Monthly-mean MERRA-2 products store a single time record per file,
/// so variables are read at record 0. Coordinate axes are expected in
/// ascending order, which holds for every MERRA-2 collection.
pub struct GridDataset {
    file: netcdf::File,
    path: PathBuf,
    lats: Vec<f64>,
    lons: Vec<f64>,
}

impl GridDataset {
    pub fn open(path: &Path) -> Result<Self, ClimateDataError> {
        let file = netcdf::open(path)
            .map_err(|e| ClimateDataError::DatasetOpen(path.to_path_buf(), e))?;
        let lats = read_axis(&file, path, &["lat", "latitude"])?;
        let lons = read_axis(&file, path, &["lon", "longitude"])?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
            lats,
            lons,
        })
    }

    /// Bilinearly interpolates `variable` at `(lat, lon)`.
    ///
    /// Fails if the variable is absent, has a rank other than `(time, lat,
    /// lon)` or `(lat, lon)`, or the point falls outside the grid. Callers
    /// are expected to have applied the geographic domain check already.
    pub fn interpolate(&self, variable: &str, lat: f64, lon: f64) -> Result<f64, ClimateDataError> {
        let var = self
            .file
            .variable(variable)
            .ok_or_else(|| ClimateDataError::MissingVariable {
                path: self.path.clone(),
                variable: variable.to_string(),
            })?;

        let ndims = var.dimensions().len();
        if ndims != 2 && ndims != 3 {
            return Err(ClimateDataError::UnsupportedShape {
                path: self.path.clone(),
                variable: variable.to_string(),
                ndims,
            });
        }

        let out_of_grid = || ClimateDataError::OutOfGrid {
            path: self.path.clone(),
            lat,
            lon,
        };
        let (j, t) = bracket(&self.lats, lat).ok_or_else(out_of_grid)?;
        let (i, u) = bracket(&self.lons, lon).ok_or_else(out_of_grid)?;

        let node = |jj: usize, ii: usize| -> Result<f64, ClimateDataError> {
            let read = if ndims == 3 {
                var.get_value::<f64, _>((0usize, jj, ii))
            } else {
                var.get_value::<f64, _>((jj, ii))
            };
            read.map_err(|e| ClimateDataError::VariableRead {
                path: self.path.clone(),
                variable: variable.to_string(),
                source: e,
            })
        };

        let v00 = node(j, i)?;
        let v01 = node(j, i + 1)?;
        let v10 = node(j + 1, i)?;
        let v11 = node(j + 1, i + 1)?;

        Ok((1.0 - t) * ((1.0 - u) * v00 + u * v01) + t * ((1.0 - u) * v10 + u * v11))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Opens `path`, interpolates one variable, and drops the file handle.
pub fn read_interpolated(
    path: &Path,
    variable: &str,
    lat: f64,
    lon: f64,
) -> Result<f64, ClimateDataError> {
    GridDataset::open(path)?.interpolate(variable, lat, lon)
}

fn read_axis(
    file: &netcdf::File,
    path: &Path,
    names: &[&str],
) -> Result<Vec<f64>, ClimateDataError> {
    for name in names {
        if let Some(var) = file.variable(name) {
            return var
                .get_values::<f64, _>(..)
                .map_err(|e| ClimateDataError::VariableRead {
                    path: path.to_path_buf(),
                    variable: (*name).to_string(),
                    source: e,
                });
        }
    }
    Err(ClimateDataError::MissingCoordinates(path.to_path_buf()))
}

/// Lower bracketing index and fractional position of `x` along an ascending
/// axis, or `None` when `x` falls outside it.
fn bracket(axis: &[f64], x: f64) -> Option<(usize, f64)> {
    if axis.len() < 2 {
        return None;
    }
    let (first, last) = (axis[0], axis[axis.len() - 1]);
    if x < first || x > last {
        return None;
    }
    let hi = axis.partition_point(|&c| c <= x).clamp(1, axis.len() - 1);
    let j = hi - 1;
    let t = (x - axis[j]) / (axis[hi] - axis[j]);
    t.is_finite().then_some((j, t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::tempdir;

    /// A 3x3 grid around (54.5, -127.0) with T2M = 2*lat + 3*lon, which
    /// bilinear interpolation reproduces exactly.
    fn write_linear_grid(path: &Path) {
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

        let mut values = Vec::new();
        for lat in lats {
            for lon in lons {
                values.push(2.0 * lat + 3.0 * lon);
            }
        }
        let mut t2m = file
            .add_variable::<f64>("T2M", &["time", "lat", "lon"])
            .unwrap();
        t2m.put_values(&values, ..).unwrap();
    }

    #[test]
    fn bilinear_reproduces_linear_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid_20150809.nc4");
        write_linear_grid(&path);

        let v = read_interpolated(&path, "T2M", 54.3, -127.2).expect("interpolate");
        assert_relative_eq!(v, 2.0 * 54.3 + 3.0 * -127.2, epsilon = 1e-9);
    }

    #[test]
    fn grid_nodes_are_exact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid_20150809.nc4");
        write_linear_grid(&path);

        let v = read_interpolated(&path, "T2M", 54.5, -127.0).expect("interpolate");
        assert_relative_eq!(v, 2.0 * 54.5 + 3.0 * -127.0, epsilon = 1e-9);
    }

    #[test]
    fn grid_edges_are_inside() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid_20150809.nc4");
        write_linear_grid(&path);

        let v = read_interpolated(&path, "T2M", 55.0, -126.5).expect("interpolate");
        assert_relative_eq!(v, 2.0 * 55.0 + 3.0 * -126.5, epsilon = 1e-9);
    }

    #[test]
    fn outside_grid_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid_20150809.nc4");
        write_linear_grid(&path);

        assert!(matches!(
            read_interpolated(&path, "T2M", 60.0, -127.0),
            Err(ClimateDataError::OutOfGrid { .. })
        ));
    }

    #[test]
    fn missing_variable_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid_20150809.nc4");
        write_linear_grid(&path);

        assert!(matches!(
            read_interpolated(&path, "QV2M", 54.5, -127.0),
            Err(ClimateDataError::MissingVariable { .. })
        ));
    }

    #[test]
    fn bracket_handles_boundaries() {
        let axis = [0.0, 1.0, 2.0];
        assert_eq!(bracket(&axis, 0.0), Some((0, 0.0)));
        assert_eq!(bracket(&axis, 2.0), Some((1, 1.0)));
        assert_eq!(bracket(&axis, -0.1), None);
        assert_eq!(bracket(&axis, 2.1), None);
    }
}
