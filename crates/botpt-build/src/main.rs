mod bootstrap;

use anyhow::Result;
use botpt_core::settings::Settings;
use botpt_data::pipeline::build_site_data;
use clap::Parser;

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(settings.effective_log_level())?;
    bootstrap::ensure_out_dir(&settings.out)?;

    tracing::info!("botpt-build v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Raw dir: {}, assumed unit: {}, resample: {}",
        settings.raw_dir.display(),
        settings.assume_units,
        settings.resample
    );

    let report = build_site_data(&settings)?;

    tracing::info!(
        "Build complete: {} file(s) parsed ({} found), {} series, {} points, {} row(s) skipped",
        report.files_parsed,
        report.files_found,
        report.series_written,
        report.points_written,
        report.rows_skipped
    );

    Ok(())
}
