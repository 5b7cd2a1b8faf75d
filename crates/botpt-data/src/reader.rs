//! Raw `.dat` file discovery and loading.
//!
//! Walks the raw-data root for `.dat` files and parses each into
//! [`Reading`]s, skipping comment lines, missing-data markers and malformed
//! rows. One bad row (or one unreadable file) never aborts the build.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use botpt_core::error::{BuildError, Result};
use botpt_core::models::Reading;
use botpt_core::timeparse::parse_timestamp;
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::table::{is_header_row, is_missing, ColumnPick, Delimiter};

// ── Discovery ─────────────────────────────────────────────────────────────────

/// Find all `.dat` files recursively under `raw_dir`, sorted by path.
pub fn find_dat_files(raw_dir: &Path) -> Vec<PathBuf> {
    if !raw_dir.exists() {
        warn!("Raw data path does not exist: {}", raw_dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(raw_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("dat"))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Derive the station key for a file from its directory structure.
///
/// `data/raw/MJ03F/PARO1/file.dat` → `"MJ03F/PARO1"`. Deeper hierarchies
/// keep all intermediate components; a file sitting directly in `raw_dir`
/// keys by its file stem instead.
pub fn station_key(raw_dir: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(raw_dir).unwrap_or(path);

    let parts: Vec<String> = rel
        .parent()
        .map(|p| {
            p.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();

    if parts.is_empty() {
        rel.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| rel.to_string_lossy().into_owned())
    } else {
        parts.join("/")
    }
}

// ── Per-file loading ──────────────────────────────────────────────────────────

/// Readings parsed from one file plus row-level counters for logging.
#[derive(Debug, Default)]
pub struct FileReadings {
    /// Successfully parsed readings, in file order.
    pub readings: Vec<Reading>,
    /// Content rows encountered (comments and blanks excluded).
    pub rows_read: u64,
    /// Rows dropped as malformed or missing data.
    pub rows_skipped: u64,
}

/// Parse one `.dat` file into raw (unconverted) readings.
///
/// Lines starting with `#` are comments. The delimiter is sniffed from the
/// first content line; if that line is a header, column names pick the
/// timestamp/value columns, otherwise columns 0 and 1 are used. Rows that
/// fail to parse are counted and skipped with a `debug!`.
///
/// Naive timestamps are interpreted in `tz` and converted to UTC.
pub fn load_dat_file(path: &Path, tz: &Tz) -> Result<FileReadings> {
    let file = std::fs::File::open(path).map_err(|source| BuildError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = std::io::BufReader::new(file);

    let mut out = FileReadings::default();
    let mut delimiter: Option<Delimiter> = None;
    let mut pick = ColumnPick::positional();

    for line_result in reader.lines() {
        let line = match line_result {
            Ok(l) => l,
            Err(e) => {
                // Typically invalid UTF-8; the bad bytes are consumed, so
                // later lines still parse.
                out.rows_read += 1;
                out.rows_skipped += 1;
                debug!("Skipping unreadable line in {}: {}", path.display(), e);
                continue;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // First content line: sniff the delimiter and look for a header.
        let delim = match delimiter {
            Some(d) => d,
            None => {
                let d = Delimiter::sniff(trimmed);
                delimiter = Some(d);
                let cells = d.split(trimmed);
                if is_header_row(&cells, tz) {
                    pick = ColumnPick::from_header(&cells);
                    continue;
                }
                d
            }
        };

        out.rows_read += 1;

        let cells = delim.split(trimmed);
        match parse_row(&cells, pick, tz) {
            Some(reading) => out.readings.push(reading),
            None => {
                out.rows_skipped += 1;
                debug!("Skipping malformed row in {}: {}", path.display(), trimmed);
            }
        }
    }

    debug!(
        "File {}: {} rows read, {} skipped, {} readings",
        path.display(),
        out.rows_read,
        out.rows_skipped,
        out.readings.len()
    );

    Ok(out)
}

/// Parse one data row into a [`Reading`], returning `None` when the row is
/// malformed or carries a missing-data marker.
fn parse_row(cells: &[&str], pick: ColumnPick, tz: &Tz) -> Option<Reading> {
    // A single-column file can never yield a value distinct from its time.
    if pick.value_idx == pick.time_idx {
        return None;
    }
    let time_cell = cells.get(pick.time_idx)?;
    let value_cell = cells.get(pick.value_idx)?;

    if is_missing(time_cell) || is_missing(value_cell) {
        return None;
    }

    let timestamp = parse_timestamp(time_cell, tz)?;
    let value: f64 = value_cell.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    Some(Reading::new(timestamp, value))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
