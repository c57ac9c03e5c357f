use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Log directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("No nginx log files found in {}", .0.display())]
    NoLogFound(PathBuf),

    #[error("Failed to list log directory {}: {source}", .path.display())]
    LogDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Incorrect date in the log filename: {}", .0.display())]
    MalformedLogDate(PathBuf),

    #[error("Failed to read log file {}: {source}", .path.display())]
    LogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Too many error lines ({:.2}%) in the log file: {errors} of {lines}",
        error_percent(.errors, .lines)
    )]
    ExcessiveParseErrors { errors: u64, lines: u64 },

    #[error("No parsable lines in the log file, nothing to report")]
    NoDataToReport,

    #[error("Report template not found: {}: {source}", .path.display())]
    TemplateNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report {}: {source}", .path.display())]
    ReportWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to prepare report directory {}: {source}", .path.display())]
    ReportDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy asset {}: {source}", .path.display())]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Interrupted by user")]
    Interrupted,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report data: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn error_percent(errors: &u64, lines: &u64) -> f64 {
    if *lines == 0 {
        return 0.0;
    }
    100.0 * *errors as f64 / *lines as f64
}

pub type Result<T> = std::result::Result<T, Error>;
