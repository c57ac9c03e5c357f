use crate::analysis::{
    AggregateState, Analyzer, EndpointStat, StatisticsBuilder, StreamAggregator,
};
use crate::log::{LogDiscovery, LogFileRef};
use crate::report::{ReportTemplate, ReportWriter, prepare_report_dir};
use crate::{Error, Result, Settings};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// How a successful run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// A new report was written
    Written {
        report: PathBuf,
        log: LogFileRef,
        endpoints: usize,
    },
    /// The report for the latest log already exists; nothing was read or written
    AlreadyExists { report: PathBuf, log: LogFileRef },
}

impl RunOutcome {
    pub fn report_path(&self) -> &Path {
        match self {
            RunOutcome::Written { report, .. } | RunOutcome::AlreadyExists { report, .. } => report,
        }
    }
}

/// Ranked statistics for the latest log, without a report
#[derive(Debug, Clone)]
pub struct LogAnalysis {
    pub log: LogFileRef,
    pub total_lines: u64,
    pub total_errors: u64,
    pub stats: Vec<EndpointStat>,
}

/// Aggregate `log`, apply the error-rate gate and build the ranked table
fn analyze_log(
    log: &LogFileRef,
    settings: &Settings,
    interrupt: &AtomicBool,
) -> Result<(AggregateState, Vec<EndpointStat>)> {
    let state = StreamAggregator::new()
        .with_interrupt(interrupt)
        .aggregate_file(log)?;

    state.check_error_rate(settings.max_error_fraction)?;

    tracing::info!("Calculating statistics...");
    let stats = StatisticsBuilder.analyze(&state)?;

    Ok((state, stats))
}

/// Compute statistics for the most recent log in `settings.log_dir`
pub fn analyze_latest(settings: &Settings, interrupt: &AtomicBool) -> Result<LogAnalysis> {
    let log = LogDiscovery::latest(&settings.log_dir)?;
    let (state, stats) = analyze_log(&log, settings, interrupt)?;

    Ok(LogAnalysis {
        log,
        total_lines: state.total_lines,
        total_errors: state.total_errors,
        stats,
    })
}

/// Build the report for the most recent log.
///
/// Does nothing when that report already exists. `interrupt` is polled while
/// the log is read; setting it aborts the run before anything is written.
pub fn run(settings: &Settings, interrupt: &AtomicBool) -> Result<RunOutcome> {
    tracing::info!("Searching fresh log file in {}", settings.log_dir.display());
    let log = LogDiscovery::latest(&settings.log_dir)?;

    let report = ReportWriter::report_path(&settings.report_dir, log.date);
    if report.exists() {
        tracing::info!("Report {} already exists", report.display());
        return Ok(RunOutcome::AlreadyExists { report, log });
    }

    let template = ReportTemplate::from_file(&settings.report_template)?;
    prepare_report_dir(&settings.report_dir, &settings.assets)?;

    let (_, stats) = analyze_log(&log, settings, interrupt)?;
    if interrupt.load(Ordering::Relaxed) {
        return Err(Error::Interrupted);
    }

    tracing::info!("Writing report file: {}", report.display());
    ReportWriter::new(template, settings.report_size).to_file(&stats, &report)?;

    Ok(RunOutcome::Written {
        report,
        log,
        endpoints: stats.len(),
    })
}
