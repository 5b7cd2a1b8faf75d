use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;

// ── Timestamp parsing ─────────────────────────────────────────────────────────

/// Strftime patterns tried for naive (offset-less) timestamps, in order.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d",
];

/// Parse a timestamp cell from a `.dat` file into a UTC [`DateTime`].
///
/// Handles:
/// * RFC 3339 / ISO 8601 with offset (including `Z`-suffix).
/// * Integer or float Unix seconds.
/// * Naive date-time patterns, interpreted in `tz` and converted to UTC.
///
/// Returns `None` when nothing matches; the caller decides whether to skip
/// the row.
pub fn parse_timestamp(s: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Replace trailing 'Z' with '+00:00' for RFC 3339 compatibility.
    let normalised = if let Some(stripped) = s.strip_suffix('Z') {
        format!("{}+00:00", stripped)
    } else {
        s.to_string()
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
        return Some(dt.with_timezone(&Utc));
    }

    // Unix seconds, integer or fractional.
    if let Ok(secs) = s.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0);
    }
    if let Ok(f) = s.parse::<f64>() {
        let secs = f.trunc() as i64;
        let nanos = (f.fract() * 1_000_000_000.0).round() as u32;
        return DateTime::from_timestamp(secs, nanos);
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return local_to_utc(naive, tz);
        }
        // Date-only patterns use NaiveDate.
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            let naive = date.and_hms_opt(0, 0, 0)?;
            return local_to_utc(naive, tz);
        }
    }

    debug!("could not parse timestamp string \"{}\"", s);
    None
}

/// Resolve a naive timestamp in `tz` to UTC, taking the earlier instant for
/// ambiguous local times (DST fold).
fn local_to_utc(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format a UTC timestamp the way the output artifact expects:
/// `%Y-%m-%dT%H:%M:%SZ`, second precision.
pub fn format_utc(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    fn utc() -> Tz {
        "UTC".parse().unwrap()
    }

    #[test]
    fn test_parse_rfc3339_with_z() {
        let dt = parse_timestamp("2023-01-01T00:00:00Z", &utc()).unwrap();
        assert_eq!(format_utc(dt), "2023-01-01T00:00:00Z");
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_timestamp("2023-01-01T02:00:00+02:00", &utc()).unwrap();
        assert_eq!(format_utc(dt), "2023-01-01T00:00:00Z");
    }

    #[test]
    fn test_parse_naive_datetime_as_utc() {
        let dt = parse_timestamp("2023-06-15 12:30:00", &utc()).unwrap();
        assert_eq!(format_utc(dt), "2023-06-15T12:30:00Z");
    }

    #[test]
    fn test_parse_naive_datetime_in_local_zone() {
        let tz: Tz = "America/Los_Angeles".parse().unwrap();
        // PST is UTC-8 in January.
        let dt = parse_timestamp("2023-01-15 00:00:00", &tz).unwrap();
        assert_eq!(format_utc(dt), "2023-01-15T08:00:00Z");
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_timestamp("2023-03-04", &utc()).unwrap();
        assert_eq!(format_utc(dt), "2023-03-04T00:00:00Z");
    }

    #[test]
    fn test_parse_unix_seconds() {
        let dt = parse_timestamp("1672531200", &utc()).unwrap();
        assert_eq!(format_utc(dt), "2023-01-01T00:00:00Z");
    }

    #[test]
    fn test_parse_fractional_unix_seconds() {
        let dt = parse_timestamp("1672531200.5", &utc()).unwrap();
        assert_eq!(dt.timestamp(), 1_672_531_200);
        assert_eq!(dt.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_parse_garbage_returns_none() {
        assert!(parse_timestamp("not-a-time", &utc()).is_none());
        assert!(parse_timestamp("", &utc()).is_none());
        assert!(parse_timestamp("   ", &utc()).is_none());
    }

    #[test]
    fn test_format_utc_second_precision() {
        let dt = parse_timestamp("2023-01-01T00:00:00.750Z", &utc()).unwrap();
        assert_eq!(format_utc(dt), "2023-01-01T00:00:00Z");
    }
}
