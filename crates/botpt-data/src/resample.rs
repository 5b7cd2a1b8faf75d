//! Display-cadence resampling rules.
//!
//! Raw BOTPT files arrive at 15-second cadence; the viewer does not need
//! (or want) millions of points per trace. A rule like `"15min"` buckets
//! readings and averages each bucket.

use botpt_core::error::{BuildError, Result};
use regex::Regex;

/// How readings are thinned before serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResampleRule {
    /// Keep the raw cadence.
    None,
    /// Average readings into buckets of this many seconds.
    Every { seconds: i64 },
}

impl ResampleRule {
    /// Parse a rule string: `"none"` (or empty) disables, otherwise a count
    /// plus a unit suffix, e.g. `"30s"`, `"15min"`, `"1h"`, `"1d"`.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return Ok(ResampleRule::None);
        }

        let re = Regex::new(r"(?i)^(\d+)\s*(s|sec|secs|m|min|mins|h|hr|hour|hours|d|day|days)$")
            .expect("regex is valid");
        let caps = re
            .captures(trimmed)
            .ok_or_else(|| BuildError::InvalidResampleRule(s.to_string()))?;

        let count: i64 = caps[1]
            .parse()
            .map_err(|_| BuildError::InvalidResampleRule(s.to_string()))?;
        if count == 0 {
            return Err(BuildError::InvalidResampleRule(s.to_string()));
        }

        let unit_seconds = match caps[2].to_lowercase().as_str() {
            "s" | "sec" | "secs" => 1,
            "m" | "min" | "mins" => 60,
            "h" | "hr" | "hour" | "hours" => 3_600,
            "d" | "day" | "days" => 86_400,
            _ => unreachable!("regex restricts suffixes"),
        };

        Ok(ResampleRule::Every {
            seconds: count * unit_seconds,
        })
    }

    /// Bucket width in seconds, or `None` for raw cadence.
    pub fn bucket_seconds(&self) -> Option<i64> {
        match self {
            ResampleRule::None => None,
            ResampleRule::Every { seconds } => Some(*seconds),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
