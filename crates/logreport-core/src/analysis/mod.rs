mod aggregator;
mod statistics;

pub use aggregator::StreamAggregator;
pub use statistics::{StatisticsBuilder, median, round3};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Counters and per-endpoint durations gathered in one pass over a log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateState {
    /// Durations per endpoint, endpoints in first-seen order
    pub durations_by_endpoint: IndexMap<String, Vec<f64>>,
    pub total_lines: u64,
    pub total_matched: u64,
    pub total_errors: u64,
    pub total_duration: f64,
}

impl AggregateState {
    /// Record a line that matched the grammar
    pub fn record_match(&mut self, endpoint: &str, duration: f64) {
        self.total_lines += 1;
        self.total_matched += 1;
        self.total_duration += duration;

        match self.durations_by_endpoint.get_mut(endpoint) {
            Some(durations) => durations.push(duration),
            None => {
                self.durations_by_endpoint
                    .insert(endpoint.to_string(), vec![duration]);
            }
        }
    }

    /// Record a line that did not match the grammar
    pub fn record_error(&mut self) {
        self.total_lines += 1;
        self.total_errors += 1;
    }

    /// Share of scanned lines that failed to parse, `0.0` for an empty log
    pub fn error_rate(&self) -> f64 {
        if self.total_lines == 0 {
            return 0.0;
        }
        self.total_errors as f64 / self.total_lines as f64
    }

    /// Fail when the error rate is above `max_fraction`
    pub fn check_error_rate(&self, max_fraction: f64) -> crate::Result<()> {
        if self.total_lines > 0 && self.error_rate() > max_fraction {
            return Err(crate::Error::ExcessiveParseErrors {
                errors: self.total_errors,
                lines: self.total_lines,
            });
        }
        Ok(())
    }
}

/// Latency summary for a single endpoint.
///
/// Fields are declared in sorted key order so the serialized objects come out
/// with stable, sorted keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointStat {
    pub count: u64,
    #[serde(rename = "count_perc")]
    pub count_percent: f64,
    pub time_avg: f64,
    pub time_max: f64,
    #[serde(rename = "time_med")]
    pub time_median: f64,
    #[serde(rename = "time_perc")]
    pub time_percent: f64,
    pub time_sum: f64,
    #[serde(rename = "url")]
    pub endpoint: String,
}

pub trait Analyzer {
    type Output;

    fn analyze(&self, state: &AggregateState) -> crate::Result<Self::Output>;
}
