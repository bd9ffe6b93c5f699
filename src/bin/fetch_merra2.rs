//! Downloads the MERRA-2 monthly granules the pipeline consumes:
//! `fetch_merra2 <out_dir> <start_year> <end_year>`.
//!
//! Credentials come from the EARTHDATA_USERNAME and EARTHDATA_PASSWORD
//! environment variables.

use anyhow::{bail, Context, Result};
use fireclim::{monthly_granule_urls, Downloader};
use std::path::PathBuf;

/// Single-level diagnostics (2 m humidity, temperature, winds, total
/// precipitable ice/water/vapor) and the land-surface collection.
const COLLECTIONS: [(&str, &str); 2] = [
    ("M2TMNXSLV.5.12.4", "tavgM_2d_slv_Nx"),
    ("M2TMNXLND.5.12.4", "tavgM_2d_lnd_Nx"),
];

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [out_dir, start, end] = args.as_slice() else {
        bail!("usage: fetch_merra2 <out_dir> <start_year> <end_year>");
    };
    let out_dir = PathBuf::from(out_dir);
    let start: i32 = start.parse().context("start year must be an integer")?;
    let end: i32 = end.parse().context("end year must be an integer")?;
    if start > end {
        bail!("start year {start} is after end year {end}");
    }

    let username = std::env::var("EARTHDATA_USERNAME")
        .context("EARTHDATA_USERNAME is not set")?;
    let password = std::env::var("EARTHDATA_PASSWORD")
        .context("EARTHDATA_PASSWORD is not set")?;
    let downloader = Downloader::new(&username, &password)?;

    let mut total = 0usize;
    for (collection, short_name) in COLLECTIONS {
        let urls = monthly_granule_urls(collection, short_name, start..=end);
        println!("Fetching {} granules from {collection}", urls.len());
        total += downloader.fetch_all(&urls, &out_dir).await?;
    }
    println!("Downloaded {total} new granules to {}", out_dir.display());
    Ok(())
}
