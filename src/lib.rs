//! Correlate historical wildfire records with MERRA-2 reanalysis climate data.
//!
//! The crate indexes a local directory of monthly-mean MERRA-2 granules by
//! their embedded `YYYYMMDD` date, interpolates named geophysical variables to
//! fire locations, joins the derived climate variables onto a wildfire event
//! table, and fits a PCA-reduced least-squares model of log fire size.
//!
//! The usual flow is [`FireClim::open`] to build the date index, then either
//! single-point queries ([`FireClim::weather_on`], [`FireClim::climatology`])
//! or a whole-table join ([`FireClim::join_events`]) followed by a
//! [`model::FirePipeline`] fit.

mod climate;
mod download;
mod error;
mod fireclim;
mod fires;
pub mod model;

pub use error::FireClimError;
pub use fireclim::FireClim;

pub use climate::climatology::{estimate, DEFAULT_CLIMATOLOGY_YEARS};
pub use climate::date_index::DateFileIndex;
pub use climate::error::ClimateDataError;
pub use climate::grid::{read_interpolated, GridDataset};
pub use climate::lookup::sample_on;
pub use climate::{in_domain, WeatherSample, LAT_RANGE, LON_RANGE};

pub use fires::error::FireTableError;
pub use fires::join::join_weather;
pub use fires::table::{read_fire_table, write_fire_table, WEATHER_COLUMNS};

pub use model::{FirePipeline, ModelError, ModelReport, FEATURE_COLUMNS};

pub use download::error::DownloadError;
pub use download::urls::{merra2_stream, monthly_granule_urls};
pub use download::Downloader;
