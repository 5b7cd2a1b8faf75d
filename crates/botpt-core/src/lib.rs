//! Core domain types for the BOTPT site builder.
//!
//! Holds the pressure-unit model, timestamp parsing, the JSON payload types
//! shared with the static viewer, error definitions and CLI settings.

pub mod error;
pub mod models;
pub mod settings;
pub mod timeparse;
pub mod units;

pub use error::{BuildError, Result};
