use clap::ValueEnum;
use logreport_core::Error;

pub mod commands;
pub mod config;

/// Exit status for any failed run
pub const EXIT_FAILURE: u8 = 1;
/// Exit status when the run was stopped with Ctrl+C
pub const EXIT_INTERRUPTED: u8 = 2;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Pretty => "pretty",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

/// Map a failed run to the process exit status
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<Error>() {
        Some(Error::Interrupted) => EXIT_INTERRUPTED,
        _ => EXIT_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_for_interrupt() {
        let err: anyhow::Error = Error::Interrupted.into();
        assert_eq!(exit_code(&err), EXIT_INTERRUPTED);
    }

    #[test]
    fn test_exit_code_through_context() {
        let result: Result<(), Error> = Err(Error::Interrupted);
        let err = result.context("Failed to build report").unwrap_err();
        assert_eq!(exit_code(&err), EXIT_INTERRUPTED);
    }

    #[test]
    fn test_exit_code_for_failures() {
        let err: anyhow::Error = Error::NoDataToReport.into();
        assert_eq!(exit_code(&err), EXIT_FAILURE);

        let err = anyhow::anyhow!("bad config");
        assert_eq!(exit_code(&err), EXIT_FAILURE);
    }
}
