//! Delimited-table primitives for raw `.dat` files.
//!
//! Files in the wild use commas, semicolons, tabs or plain whitespace, may
//! or may not carry a header row, and sprinkle `NA`/`NaN` markers through
//! the value column. Everything here is per-line; the reader drives it.

use botpt_core::timeparse::parse_timestamp;
use chrono_tz::Tz;

// ── Delimiter ─────────────────────────────────────────────────────────────────

/// Column separator used by one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Semicolon,
    Tab,
    /// Any run of spaces/tabs.
    Whitespace,
}

impl Delimiter {
    /// Guess the separator from the first content line of a file.
    ///
    /// Checked in order comma → semicolon → tab, falling back to whitespace,
    /// mirroring how the files are actually produced (comma-separated export
    /// or fixed-width instrument logs).
    pub fn sniff(line: &str) -> Self {
        if line.contains(',') {
            Delimiter::Comma
        } else if line.contains(';') {
            Delimiter::Semicolon
        } else if line.contains('\t') {
            Delimiter::Tab
        } else {
            Delimiter::Whitespace
        }
    }

    /// Split a line into trimmed cells.
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Delimiter::Comma => line.split(',').map(str::trim).collect(),
            Delimiter::Semicolon => line.split(';').map(str::trim).collect(),
            Delimiter::Tab => line.split('\t').map(str::trim).collect(),
            Delimiter::Whitespace => line.split_whitespace().collect(),
        }
    }
}

// ── Missing data ──────────────────────────────────────────────────────────────

/// Cell contents treated as missing data; rows containing them are skipped.
const NA_VALUES: &[&str] = &["", "na", "nan", "null"];

/// Returns `true` when `cell` is a missing-data marker.
pub fn is_missing(cell: &str) -> bool {
    NA_VALUES.contains(&cell.trim().to_lowercase().as_str())
}

// ── Column selection ──────────────────────────────────────────────────────────

/// Header names recognised for the timestamp column, in preference order.
const TIME_KEYS: &[&str] = &["time", "timestamp", "date", "datetime"];

/// Header names recognised for the pressure column, in preference order.
const VALUE_KEYS: &[&str] = &["pressure", "prs", "kpa", "psi", "value", "val"];

/// Indices of the timestamp and value columns within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPick {
    pub time_idx: usize,
    pub value_idx: usize,
}

impl ColumnPick {
    /// Positional fallback when no header names matched: column 0 is time,
    /// column 1 is the value.
    pub fn positional() -> Self {
        ColumnPick {
            time_idx: 0,
            value_idx: 1,
        }
    }

    /// Pick columns from a header row by name, falling back to positions.
    pub fn from_header(cells: &[&str]) -> Self {
        let lc: Vec<String> = cells.iter().map(|c| c.trim().to_lowercase()).collect();

        let time_idx = TIME_KEYS
            .iter()
            .find_map(|k| lc.iter().position(|c| c == k))
            .unwrap_or(0);
        let mut value_idx = VALUE_KEYS
            .iter()
            .find_map(|k| lc.iter().position(|c| c == k))
            .unwrap_or(1);

        if value_idx == time_idx && cells.len() > 1 {
            value_idx = 1;
        }

        ColumnPick {
            time_idx,
            value_idx,
        }
    }
}

// ── Header detection ──────────────────────────────────────────────────────────

/// Decide whether the first content row of a file is a header.
///
/// A data row carries either a numeric cell or a parseable timestamp in its
/// first cell; a header row (`time,psi`) has neither.
pub fn is_header_row(cells: &[&str], tz: &Tz) -> bool {
    let any_numeric = cells.iter().any(|c| c.trim().parse::<f64>().is_ok());
    if any_numeric {
        return false;
    }
    match cells.first() {
        Some(first) => parse_timestamp(first, tz).is_none(),
        None => false,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> Tz {
        "UTC".parse().unwrap()
    }

    // ── Delimiter ─────────────────────────────────────────────────────────────

    #[test]
    fn test_sniff_comma() {
        assert_eq!(Delimiter::sniff("2023-01-01T00:00:00Z,14.7"), Delimiter::Comma);
    }

    #[test]
    fn test_sniff_semicolon() {
        assert_eq!(Delimiter::sniff("2023-01-01;14.7"), Delimiter::Semicolon);
    }

    #[test]
    fn test_sniff_tab() {
        assert_eq!(Delimiter::sniff("2023-01-01\t14.7"), Delimiter::Tab);
    }

    #[test]
    fn test_sniff_whitespace_fallback() {
        assert_eq!(Delimiter::sniff("2023-01-01 14.7"), Delimiter::Whitespace);
    }

    #[test]
    fn test_split_trims_cells() {
        let cells = Delimiter::Comma.split("2023-01-01T00:00:00Z , 14.7 ");
        assert_eq!(cells, vec!["2023-01-01T00:00:00Z", "14.7"]);
    }

    #[test]
    fn test_split_whitespace_collapses_runs() {
        let cells = Delimiter::Whitespace.split("2023-01-01   14.7");
        assert_eq!(cells, vec!["2023-01-01", "14.7"]);
    }

    // ── is_missing ────────────────────────────────────────────────────────────

    #[test]
    fn test_missing_markers() {
        for cell in ["", "  ", "NA", "na", "NaN", "nan", "null"] {
            assert!(is_missing(cell), "{cell:?} should be missing");
        }
        assert!(!is_missing("14.7"));
        assert!(!is_missing("0"));
    }

    // ── ColumnPick ────────────────────────────────────────────────────────────

    #[test]
    fn test_from_header_named_columns() {
        let pick = ColumnPick::from_header(&["Time", "Pressure"]);
        assert_eq!(pick, ColumnPick { time_idx: 0, value_idx: 1 });
    }

    #[test]
    fn test_from_header_reordered_columns() {
        let pick = ColumnPick::from_header(&["psi", "timestamp"]);
        assert_eq!(pick, ColumnPick { time_idx: 1, value_idx: 0 });
    }

    #[test]
    fn test_from_header_extra_columns() {
        let pick = ColumnPick::from_header(&["seq", "datetime", "temp", "kPa"]);
        assert_eq!(pick, ColumnPick { time_idx: 1, value_idx: 3 });
    }

    #[test]
    fn test_from_header_unrecognised_falls_back_to_positions() {
        let pick = ColumnPick::from_header(&["a", "b", "c"]);
        assert_eq!(pick, ColumnPick::positional());
    }

    #[test]
    fn test_from_header_value_never_collides_with_time() {
        // "time" matches the time keys AND nothing matches a value key;
        // the value column must shift off the time column.
        let pick = ColumnPick::from_header(&["time", "xyz"]);
        assert_eq!(pick, ColumnPick { time_idx: 0, value_idx: 1 });
    }

    // ── is_header_row ─────────────────────────────────────────────────────────

    #[test]
    fn test_header_row_detected() {
        assert!(is_header_row(&["time", "psi"], &utc()));
        assert!(is_header_row(&["Timestamp", "Pressure"], &utc()));
    }

    #[test]
    fn test_data_row_with_numeric_value_not_header() {
        assert!(!is_header_row(&["2023-01-01T00:00:00Z", "14.7"], &utc()));
    }

    #[test]
    fn test_data_row_with_na_value_not_header() {
        // No numeric cell, but the first cell parses as a date.
        assert!(!is_header_row(&["2023-01-01", "NA"], &utc()));
    }

    #[test]
    fn test_epoch_seconds_row_not_header() {
        assert!(!is_header_row(&["1672531200", "14.7"], &utc()));
    }
}
