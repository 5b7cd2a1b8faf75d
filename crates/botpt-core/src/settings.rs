use clap::Parser;
use std::path::PathBuf;

use crate::error::BuildError;
use crate::units::PressureUnit;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Batch converter from raw BOTPT `.dat` files to the viewer's JSON artifact
#[derive(Parser, Debug, Clone)]
#[command(
    name = "botpt-build",
    about = "Aggregate raw .dat pressure files into one JSON document for the static viewer",
    version
)]
pub struct Settings {
    /// Root directory scanned recursively for .dat files
    #[arg(long, default_value = "data/raw")]
    pub raw_dir: PathBuf,

    /// Output path of the consolidated JSON artifact
    #[arg(long, default_value = "site/data/all_series.json")]
    pub out: PathBuf,

    /// Unit assumed for raw values ("psi" or "kPa"); output is always kPa
    #[arg(long, env = "ASSUME_UNITS", default_value = "psi")]
    pub assume_units: String,

    /// Resample cadence for display, e.g. "15min", "1h"; "none" disables
    #[arg(long, default_value = "15min")]
    pub resample: String,

    /// IANA timezone used to interpret naive source timestamps
    #[arg(long, default_value = "UTC")]
    pub timezone: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Resolve `assume_units` into a typed unit. Fatal on anything but
    /// `psi`/`kPa`.
    pub fn source_unit(&self) -> Result<PressureUnit, BuildError> {
        self.assume_units.parse()
    }

    /// Resolve `timezone` into an IANA [`chrono_tz::Tz`].
    pub fn source_timezone(&self) -> Result<chrono_tz::Tz, BuildError> {
        self.timezone
            .parse()
            .map_err(|_| BuildError::UnknownTimezone(self.timezone.clone()))
    }

    /// Effective log level after applying the `--debug` override.
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "DEBUG"
        } else {
            &self.log_level
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
