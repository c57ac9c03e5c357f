use super::AggregateState;
use crate::log::{LogFileRef, LogLineParser, LogLines, LogReader};
use crate::{Error, Result};
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};

/// Folds log lines into an [`AggregateState`] in a single forward pass
#[derive(Default)]
pub struct StreamAggregator<'a> {
    interrupt: Option<&'a AtomicBool>,
}

impl<'a> StreamAggregator<'a> {
    pub fn new() -> Self {
        Self { interrupt: None }
    }

    /// Abort the pass with [`Error::Interrupted`] once `flag` is set
    pub fn with_interrupt(mut self, flag: &'a AtomicBool) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// Open `log` and aggregate all of its lines
    pub fn aggregate_file(&self, log: &LogFileRef) -> Result<AggregateState> {
        tracing::info!("Reading and analyzing log file: {}", log.path.display());

        let reader = LogReader::open(log).map_err(|source| Error::LogRead {
            path: log.path.clone(),
            source,
        })?;

        let state = self.aggregate(reader).map_err(|e| match e {
            Error::Io(source) => Error::LogRead {
                path: log.path.clone(),
                source,
            },
            other => other,
        })?;

        tracing::info!(
            "Total lines: {}, parsed: {}, error lines: {}",
            state.total_lines,
            state.total_matched,
            state.total_errors
        );

        Ok(state)
    }

    pub fn aggregate<R: BufRead>(&self, reader: R) -> Result<AggregateState> {
        let mut state = AggregateState::default();

        for line in LogLines::new(reader) {
            if self.interrupt.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return Err(Error::Interrupted);
            }

            let line = line?;
            match LogLineParser::parse(&line) {
                Ok(entry) => state.record_match(entry.endpoint, entry.duration),
                Err(_) => {
                    tracing::debug!("Error line: {}", line);
                    state.record_error();
                }
            }
        }

        Ok(state)
    }
}
