use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the BOTPT site builder.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The raw-data root directory does not exist.
    #[error("Raw data directory not found: {0}")]
    RawDirNotFound(PathBuf),

    /// A data file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured source unit is not one of the recognised values.
    /// Always fatal; a misread physical unit corrupts every output value.
    #[error("Unknown source unit \"{0}\" (expected \"psi\" or \"kPa\")")]
    UnknownUnit(String),

    /// The resample rule string could not be parsed.
    #[error("Invalid resample rule \"{0}\" (expected e.g. \"15min\", \"1h\", or \"none\")")]
    InvalidResampleRule(String),

    /// The configured timezone name is not in the IANA database.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// The output artifact could not be serialized.
    #[error("Failed to serialize output JSON: {0}")]
    JsonWrite(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the builder crates.
pub type Result<T> = std::result::Result<T, BuildError>;
