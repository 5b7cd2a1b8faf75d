//! Assembly and atomic writing of the output artifact.

use std::collections::BTreeMap;
use std::path::Path;

use botpt_core::error::Result;
use botpt_core::models::{DatasetMeta, DatasetPayload, Reading, SeriesPayload};
use botpt_core::timeparse::format_utc;
use botpt_core::units::OUTPUT_UNIT;
use tracing::info;

/// Round a converted value to 4 decimals for the artifact.
pub fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

/// Build the JSON payload from fully aggregated per-station series.
///
/// `note` describes the cadence (raw vs. resampled) and lands in `meta`.
pub fn build_payload(stations: &BTreeMap<String, Vec<Reading>>, note: &str) -> DatasetPayload {
    let mut series: BTreeMap<String, SeriesPayload> = BTreeMap::new();
    let mut count_points = 0usize;

    for (station, readings) in stations {
        let points: Vec<(String, f64)> = readings
            .iter()
            .map(|r| (format_utc(r.timestamp), round4(r.value)))
            .collect();
        count_points += points.len();
        series.insert(
            station.clone(),
            SeriesPayload {
                unit: OUTPUT_UNIT.to_string(),
                points,
            },
        );
    }

    DatasetPayload {
        meta: DatasetMeta {
            count_series: series.len(),
            count_points,
            note: note.to_string(),
        },
        series,
    }
}

/// Serialize `payload` to `path`, creating parent directories as needed.
/// Writes to a temp file then renames for atomicity.
pub fn write_json(path: &Path, payload: &DatasetPayload) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string(payload)?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &json)?;
    std::fs::rename(&tmp, path)?;

    info!(
        "Wrote {} ({} series, {} points)",
        path.display(),
        payload.meta.count_series,
        payload.meta.count_points
    );
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
