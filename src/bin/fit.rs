//! Fits the log fire size model on processed fire tables:
//! `fit [--json <report.json>] <fire_csv>...`.

use anyhow::{bail, Context, Result};
use fireclim::FirePipeline;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();
    let mut args = std::env::args().skip(1).peekable();
    let mut json_out: Option<PathBuf> = None;
    if args.peek().map(String::as_str) == Some("--json") {
        args.next();
        match args.next() {
            Some(path) => json_out = Some(PathBuf::from(path)),
            None => bail!("--json requires a file path"),
        }
    }
    let tables: Vec<PathBuf> = args.map(PathBuf::from).collect();
    if tables.is_empty() {
        bail!("usage: fit [--json <report.json>] <fire_csv>...");
    }

    let df = FirePipeline::load_tables(&tables).context("loading fire tables")?;
    let report = FirePipeline::new().fit(&df).context("fitting model")?;
    print!("{report}");

    if let Some(path) = json_out {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, json)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Report written to {}", path.display());
    }
    Ok(())
}
