//! Maps 8-digit `YYYYMMDD` date keys to the granule files covering that date.

use crate::climate::error::ClimateDataError;
use log::info;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// An 8-digit run bounded by non-digits, so a longer digit run never yields a
/// spurious date key.
fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:^|\D)(\d{8})(?:\D|$)").expect("date pattern is a valid literal regex")
    })
}

/// Index of gridded data files keyed by the `YYYYMMDD` substring of their
/// file name.
///
/// Built once over a directory and read-only afterwards. Several files may
/// legitimately share a date (e.g. differing MERRA-2 production streams for
/// the same month); all are retained, in lexicographic path order, and lookup
/// consumers use the first. Lexicographic order makes "first file wins"
/// deterministic instead of depending on OS scan order.
#[derive(Debug, Default)]
pub struct DateFileIndex {
    by_date: HashMap<String, Vec<PathBuf>>,
    files_indexed: usize,
}

impl DateFileIndex {
    /// Scans `dir` (non-recursively) and indexes every entry whose file name
    /// embeds an 8-digit date. Entries without one are silently skipped.
    pub fn build(dir: &Path) -> Result<Self, ClimateDataError> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| ClimateDataError::DirScan(dir.to_path_buf(), e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ClimateDataError::DirScan(dir.to_path_buf(), e))?;
            paths.push(entry.path());
        }
        paths.sort();

        let mut by_date: HashMap<String, Vec<PathBuf>> = HashMap::new();
        let mut files_indexed = 0;
        for path in paths {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Some(captures) = date_pattern().captures(name) {
                let date = captures[1].to_string();
                by_date.entry(date).or_default().push(path);
                files_indexed += 1;
            }
        }

        info!(
            "Indexed {} dated files under {} distinct dates in {}",
            files_indexed,
            by_date.len(),
            dir.display()
        );
        Ok(Self {
            by_date,
            files_indexed,
        })
    }

    /// All files associated with an 8-digit date key, in indexed order.
    pub fn get(&self, date: &str) -> Option<&[PathBuf]> {
        self.by_date.get(date).map(|v| v.as_slice())
    }

    /// The first (lexicographically smallest) file for a date, the one
    /// lookups read.
    pub fn first_file(&self, date: &str) -> Option<&Path> {
        self.by_date
            .get(date)
            .and_then(|v| v.first())
            .map(PathBuf::as_path)
    }

    /// Number of distinct dates present.
    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    /// Number of files indexed, counting every file under a shared date.
    pub fn files_indexed(&self) -> usize {
        self.files_indexed
    }
}
