use super::{AggregateState, Analyzer, EndpointStat};
use crate::{Error, Result};

/// Round to 3 decimal places, halves away from zero
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Median of `values`, `None` when empty
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len().is_multiple_of(2) {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Turns aggregated durations into ranked [`EndpointStat`] rows
pub struct StatisticsBuilder;

impl StatisticsBuilder {
    fn endpoint_stat(
        endpoint: &str,
        durations: &[f64],
        total_matched: u64,
        total_duration: f64,
    ) -> EndpointStat {
        let count = durations.len() as u64;
        let time_sum = round3(durations.iter().sum());
        let time_max = durations.iter().copied().fold(f64::MIN, f64::max);

        let time_percent = if total_duration > 0.0 {
            round3(100.0 * time_sum / total_duration)
        } else {
            0.0
        };

        EndpointStat {
            count,
            count_percent: round3(100.0 * count as f64 / total_matched as f64),
            time_avg: round3(time_sum / count as f64),
            time_max: round3(time_max),
            time_median: round3(median(durations).unwrap_or_default()),
            time_percent,
            time_sum,
            endpoint: endpoint.to_string(),
        }
    }

    /// Order by total time descending, then by endpoint descending
    pub fn rank(stats: &mut [EndpointStat]) {
        stats.sort_by(|a, b| {
            b.time_sum
                .total_cmp(&a.time_sum)
                .then_with(|| b.endpoint.cmp(&a.endpoint))
        });
    }
}

impl Analyzer for StatisticsBuilder {
    type Output = Vec<EndpointStat>;

    fn analyze(&self, state: &AggregateState) -> Result<Self::Output> {
        tracing::debug!(
            "Calculating statistics for {} endpoints",
            state.durations_by_endpoint.len()
        );

        if state.total_matched == 0 {
            return Err(Error::NoDataToReport);
        }

        let mut stats: Vec<EndpointStat> = state
            .durations_by_endpoint
            .iter()
            .filter(|(_, durations)| !durations.is_empty())
            .map(|(endpoint, durations)| {
                Self::endpoint_stat(
                    endpoint,
                    durations,
                    state.total_matched,
                    state.total_duration,
                )
            })
            .collect();

        Self::rank(&mut stats);

        tracing::info!("Statistics ready: {} endpoints", stats.len());

        Ok(stats)
    }
}
