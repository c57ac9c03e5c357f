use crate::OutputFormat;
use anyhow::{Context, Result};
use logreport_core::Settings;
use logreport_core::pipeline::{self, LogAnalysis};
use std::borrow::Cow;
use std::sync::atomic::AtomicBool;

/// Analyze the freshest log and keep the `limit` slowest endpoints
pub fn top_endpoints(
    settings: &Settings,
    interrupt: &AtomicBool,
    limit: usize,
) -> Result<LogAnalysis> {
    let mut analysis =
        pipeline::analyze_latest(settings, interrupt).context("Failed to analyze log")?;
    analysis.stats.truncate(limit);
    Ok(analysis)
}

pub fn execute(
    settings: &Settings,
    interrupt: &AtomicBool,
    limit: usize,
    format: OutputFormat,
) -> Result<()> {
    tracing::info!(
        "Printing top {} endpoints as {}",
        limit,
        format.as_str()
    );

    let analysis = top_endpoints(settings, interrupt, limit)?;

    match format {
        OutputFormat::Json => output_json(&analysis)?,
        OutputFormat::Csv => output_csv(&analysis),
        OutputFormat::Pretty => output_pretty(&analysis),
    }

    Ok(())
}

fn output_pretty(analysis: &LogAnalysis) {
    use console::style;

    println!("\n{}", style("Endpoint Latency Report").bold().cyan());
    println!("{}", style("=======================").cyan());

    println!("\n{}", style("Summary:").bold());
    println!("  Log File:      {}", analysis.log.path.display());
    println!("  Log Date:      {}", analysis.log.date);
    println!("  Total Lines:   {}", analysis.total_lines);
    println!("  Error Lines:   {}", analysis.total_errors);

    if !analysis.stats.is_empty() {
        println!("\n{}", style("Slowest Endpoints:").bold());
        for (i, stat) in analysis.stats.iter().enumerate() {
            println!(
                "  {}. [{:.3} s, {:.3}%] count={} avg={:.3} max={:.3} med={:.3} - {}",
                i + 1,
                stat.time_sum,
                stat.time_percent,
                stat.count,
                stat.time_avg,
                stat.time_max,
                stat.time_median,
                stat.endpoint
            );
        }
    }

    println!();
}

fn output_json(analysis: &LogAnalysis) -> Result<()> {
    let json = serde_json::to_string_pretty(&analysis.stats)?;
    println!("{}", json);
    Ok(())
}

fn output_csv(analysis: &LogAnalysis) {
    println!("url,count,count_perc,time_sum,time_perc,time_avg,time_max,time_med");
    for stat in &analysis.stats {
        println!(
            "{},{},{},{},{},{},{},{}",
            csv_field(&stat.endpoint),
            stat.count,
            stat.count_percent,
            stat.time_sum,
            stat.time_percent,
            stat.time_avg,
            stat.time_max,
            stat.time_median
        );
    }
}

/// Quote a field when it holds a separator, quote or line break
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("/api/v2/banner/1"), "/api/v2/banner/1");
        assert_eq!(csv_field("/a?x=1,2"), "\"/a?x=1,2\"");
        assert_eq!(csv_field(r#"/a"b"#), r#""/a""b""#);
    }
}
