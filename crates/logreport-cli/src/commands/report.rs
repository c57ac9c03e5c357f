use anyhow::{Context, Result};
use logreport_core::{RunOutcome, Settings, pipeline};
use std::sync::atomic::AtomicBool;

/// Build the report for the freshest log, or do nothing if it already exists
pub fn execute(settings: &Settings, interrupt: &AtomicBool) -> Result<RunOutcome> {
    tracing::debug!("Running with {:?}", settings);

    let outcome = pipeline::run(settings, interrupt).context("Failed to build report")?;

    match &outcome {
        RunOutcome::Written {
            report, endpoints, ..
        } => {
            tracing::info!(
                "Done! Report with {} endpoints written to {}",
                endpoints,
                report.display()
            );
        }
        RunOutcome::AlreadyExists { report, .. } => {
            tracing::info!("Report {} already exists, nothing to do", report.display());
        }
    }

    Ok(outcome)
}
