//! Per-station series aggregation.
//!
//! Merges the readings of all files belonging to one station, applies the
//! source-unit conversion exactly once, averages duplicate timestamps and
//! optionally resamples for display.

use std::collections::BTreeMap;

use botpt_core::models::Reading;
use botpt_core::units::PressureUnit;
use chrono::DateTime;

use crate::resample::ResampleRule;

// ── DatasetAggregator ─────────────────────────────────────────────────────────

/// Stateless helper that turns per-file fragments into per-station series.
pub struct DatasetAggregator;

impl DatasetAggregator {
    /// Merge file fragments into one chronologically ordered series per
    /// station, converting every value into kilopascals.
    ///
    /// Conversion happens here and nowhere else, so it is applied exactly
    /// once per raw value. Duplicate timestamps within a station are
    /// averaged. Returns a `BTreeMap` so station order is deterministic.
    pub fn merge(
        fragments: Vec<(String, Vec<Reading>)>,
        unit: PressureUnit,
    ) -> BTreeMap<String, Vec<Reading>> {
        let mut stations: BTreeMap<String, Vec<Reading>> = BTreeMap::new();

        for (station, readings) in fragments {
            let converted = readings
                .into_iter()
                .map(|r| Reading::new(r.timestamp, unit.to_kilopascals(r.value)));
            stations.entry(station).or_default().extend(converted);
        }

        for readings in stations.values_mut() {
            readings.sort_by_key(|r| r.timestamp);
            *readings = Self::mean_duplicates(std::mem::take(readings));
        }

        stations
    }

    /// Resample a sorted series by bucketing timestamps to the rule's width
    /// and averaging each bucket. `ResampleRule::None` returns the input
    /// unchanged.
    pub fn resample(readings: Vec<Reading>, rule: ResampleRule) -> Vec<Reading> {
        let Some(width) = rule.bucket_seconds() else {
            return readings;
        };

        let mut buckets: BTreeMap<i64, (f64, u64)> = BTreeMap::new();
        for r in readings {
            let bucket = r.timestamp.timestamp().div_euclid(width) * width;
            let entry = buckets.entry(bucket).or_insert((0.0, 0));
            entry.0 += r.value;
            entry.1 += 1;
        }

        buckets
            .into_iter()
            .filter_map(|(secs, (sum, count))| {
                let ts = DateTime::from_timestamp(secs, 0)?;
                Some(Reading::new(ts, sum / count as f64))
            })
            .collect()
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Collapse runs of equal timestamps in a sorted series to their mean.
    fn mean_duplicates(sorted: Vec<Reading>) -> Vec<Reading> {
        let mut out: Vec<Reading> = Vec::with_capacity(sorted.len());
        let mut iter = sorted.into_iter();

        let Some(first) = iter.next() else {
            return out;
        };
        let mut current = first.timestamp;
        let mut sum = first.value;
        let mut count = 1u64;

        for r in iter {
            if r.timestamp == current {
                sum += r.value;
                count += 1;
            } else {
                out.push(Reading::new(current, sum / count as f64));
                current = r.timestamp;
                sum = r.value;
                count = 1;
            }
        }
        out.push(Reading::new(current, sum / count as f64));
        out
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
