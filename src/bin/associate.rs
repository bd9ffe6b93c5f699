//! Joins MERRA-2 weather onto a wildfire CSV:
//! `associate <granule_dir> <fire_csv> <out_csv>`.

use anyhow::{bail, Context, Result};
use fireclim::{read_fire_table, write_fire_table, FireClim};
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [granule_dir, fire_csv, out_csv] = args.as_slice() else {
        bail!("usage: associate <granule_dir> <fire_csv> <out_csv>");
    };
    let granule_dir = PathBuf::from(granule_dir);
    let fire_csv = PathBuf::from(fire_csv);
    let out_csv = PathBuf::from(out_csv);

    let client = FireClim::open(&granule_dir)
        .with_context(|| format!("indexing granules under {}", granule_dir.display()))?;
    println!(
        "Indexed {} granules covering {} dates",
        client.index().files_indexed(),
        client.index().len()
    );

    let df = read_fire_table(&fire_csv)
        .with_context(|| format!("reading fire table {}", fire_csv.display()))?;
    println!("Loaded {} fire events", df.height());

    let mut joined = client.join_events(&df)?;
    write_fire_table(&mut joined, &out_csv)
        .with_context(|| format!("writing {}", out_csv.display()))?;
    println!("Wrote augmented table to {}", out_csv.display());
    Ok(())
}
