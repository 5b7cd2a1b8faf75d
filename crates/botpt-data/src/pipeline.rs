//! The build pipeline: discover → parse → aggregate → write.
//!
//! One sequential pass per invocation; the only persisted artifact is the
//! JSON file, which is fully rewritten each run.

use botpt_core::error::{BuildError, Result};
use botpt_core::settings::Settings;
use tracing::{debug, info, warn};

use crate::aggregator::DatasetAggregator;
use crate::reader::{find_dat_files, load_dat_file, station_key};
use crate::resample::ResampleRule;
use crate::writer::{build_payload, write_json};

// ── BuildReport ───────────────────────────────────────────────────────────────

/// Counters describing one completed build, for the summary log line.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct BuildReport {
    /// `.dat` files discovered under the raw root.
    pub files_found: usize,
    /// Files successfully parsed (unreadable files are skipped).
    pub files_parsed: usize,
    /// Content rows seen across all parsed files.
    pub rows_read: u64,
    /// Rows dropped as malformed or missing.
    pub rows_skipped: u64,
    /// Series written into the artifact.
    pub series_written: usize,
    /// Points written across all series.
    pub points_written: usize,
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// Run the full build.
///
/// 1. Resolve configuration (unit, timezone, resample rule); each is fatal
///    when invalid.
/// 2. Discover `.dat` files under the raw root (missing root is fatal).
/// 3. Parse each file; unreadable files are skipped with a warning.
/// 4. Merge per-station, convert to kPa, average duplicates, resample.
/// 5. Write the artifact atomically.
pub fn build_site_data(settings: &Settings) -> Result<BuildReport> {
    let unit = settings.source_unit()?;
    let tz = settings.source_timezone()?;
    let rule = ResampleRule::parse(&settings.resample)?;

    if !settings.raw_dir.is_dir() {
        return Err(BuildError::RawDirNotFound(settings.raw_dir.clone()));
    }

    // ── Step 1: Discover ──────────────────────────────────────────────────────
    let files = find_dat_files(&settings.raw_dir);
    info!(
        "Found {} .dat file(s) under {}",
        files.len(),
        settings.raw_dir.display()
    );

    let mut report = BuildReport {
        files_found: files.len(),
        ..BuildReport::default()
    };

    // ── Step 2: Parse ─────────────────────────────────────────────────────────
    let mut fragments = Vec::new();
    for path in &files {
        match load_dat_file(path, &tz) {
            Ok(out) => {
                report.files_parsed += 1;
                report.rows_read += out.rows_read;
                report.rows_skipped += out.rows_skipped;
                if out.readings.is_empty() {
                    debug!("No usable readings in {}", path.display());
                    continue;
                }
                fragments.push((station_key(&settings.raw_dir, path), out.readings));
            }
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
            }
        }
    }

    // ── Step 3: Aggregate ─────────────────────────────────────────────────────
    let mut stations = DatasetAggregator::merge(fragments, unit);
    for readings in stations.values_mut() {
        *readings = DatasetAggregator::resample(std::mem::take(readings), rule);
    }

    // ── Step 4: Write ─────────────────────────────────────────────────────────
    let note = match rule {
        ResampleRule::None => "Raw cadence".to_string(),
        ResampleRule::Every { .. } => {
            format!("Resampled for display ({})", settings.resample.trim())
        }
    };
    let payload = build_payload(&stations, &note);
    report.series_written = payload.meta.count_series;
    report.points_written = payload.meta.count_points;

    write_json(&settings.out, &payload)?;

    if report.rows_skipped > 0 {
        warn!(
            "Skipped {} malformed row(s) out of {}",
            report.rows_skipped, report.rows_read
        );
    }

    Ok(report)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
