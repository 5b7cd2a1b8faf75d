//! Data ingestion and aggregation layer for the BOTPT site builder.
//!
//! Responsible for discovering raw `.dat` files, parsing their delimited
//! tables into timestamped readings, merging and resampling per-station
//! series, and writing the consolidated JSON artifact the viewer loads.

pub mod aggregator;
pub mod pipeline;
pub mod reader;
pub mod resample;
pub mod table;
pub mod writer;

pub use botpt_core as core;
