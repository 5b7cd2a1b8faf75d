use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single timestamped pressure reading within one series.
///
/// Values are raw as parsed from disk until the aggregation pass converts
/// them to kilopascals; a `Reading` itself carries no unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// UTC instant of the measurement.
    pub timestamp: DateTime<Utc>,
    /// Pressure value.
    pub value: f64,
}

impl Reading {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// One station's slice of the output artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesPayload {
    /// Unit label for every point, always `"kPa"` after conversion.
    pub unit: String,
    /// Chronologically ordered `[timestamp, value]` pairs. Timestamps are
    /// `%Y-%m-%dT%H:%M:%SZ` strings so the viewer can hand them straight to
    /// the charting library.
    pub points: Vec<(String, f64)>,
}

/// Summary block emitted alongside the series map.
///
/// Carries no wall-clock timestamp; two runs over identical input must
/// produce byte-identical artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMeta {
    /// Number of series in the artifact.
    pub count_series: usize,
    /// Total number of points across all series.
    pub count_points: usize,
    /// Human-readable cadence note (raw vs. resampled).
    pub note: String,
}

/// The complete output artifact consumed by the static viewer.
///
/// `series` is a `BTreeMap` so key order (and therefore the serialized
/// bytes) is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetPayload {
    pub meta: DatasetMeta,
    pub series: BTreeMap<String, SeriesPayload>,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_payload_points_serialize_as_pairs() {
        let payload = SeriesPayload {
            unit: "kPa".to_string(),
            points: vec![("2023-01-01T00:00:00Z".to_string(), 101.325)],
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(
            json,
            r#"{"unit":"kPa","points":[["2023-01-01T00:00:00Z",101.325]]}"#
        );
    }

    #[test]
    fn test_dataset_payload_empty_series_map() {
        let payload = DatasetPayload {
            meta: DatasetMeta {
                count_series: 0,
                count_points: 0,
                note: "Raw cadence".to_string(),
            },
            series: BTreeMap::new(),
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains(r#""series":{}"#));
        assert!(json.contains(r#""count_series":0"#));
    }

    #[test]
    fn test_dataset_payload_round_trip() {
        let mut series = BTreeMap::new();
        series.insert(
            "MJ03F/PARO1".to_string(),
            SeriesPayload {
                unit: "kPa".to_string(),
                points: vec![("2023-01-01T00:00:00Z".to_string(), 2657.5)],
            },
        );
        let payload = DatasetPayload {
            meta: DatasetMeta {
                count_series: 1,
                count_points: 1,
                note: "Resampled for display (15min)".to_string(),
            },
            series,
        };

        let json = serde_json::to_string(&payload).unwrap();
        let back: DatasetPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back.meta.count_series, 1);
        assert_eq!(back.series["MJ03F/PARO1"].points[0].1, 2657.5);
    }

    #[test]
    fn test_series_keys_sorted_in_output() {
        let mut series = BTreeMap::new();
        for key in ["MJ03F/PARO2", "MJ03E/PARO1", "MJ03F/PARO1"] {
            series.insert(
                key.to_string(),
                SeriesPayload {
                    unit: "kPa".to_string(),
                    points: vec![],
                },
            );
        }
        let payload = DatasetPayload {
            meta: DatasetMeta {
                count_series: 3,
                count_points: 0,
                note: String::new(),
            },
            series,
        };
        let json = serde_json::to_string(&payload).unwrap();
        let a = json.find("MJ03E/PARO1").unwrap();
        let b = json.find("MJ03F/PARO1").unwrap();
        let c = json.find("MJ03F/PARO2").unwrap();
        assert!(a < b && b < c);
    }
}
