use super::ReportTemplate;
use crate::analysis::EndpointStat;
use crate::{Error, Result};
use chrono::NaiveDate;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct ReportWriter {
    template: ReportTemplate,
    report_size: usize,
}

impl ReportWriter {
    pub fn new(template: ReportTemplate, report_size: usize) -> Self {
        Self {
            template,
            report_size,
        }
    }

    /// Path of the report for a log dated `date`: `report-YYYY.MM.DD.html`
    pub fn report_path(report_dir: &Path, date: NaiveDate) -> PathBuf {
        report_dir.join(format!("report-{}.html", date.format("%Y.%m.%d")))
    }

    /// Serialize the top rows of an already ranked table as a JSON array
    pub fn table_json(&self, stats: &[EndpointStat]) -> Result<String> {
        let rows = &stats[..stats.len().min(self.report_size)];
        Ok(serde_json::to_string(rows)?)
    }

    /// Render the full HTML report
    pub fn to_string(&self, stats: &[EndpointStat]) -> Result<String> {
        let table_json = self.table_json(stats)?;
        Ok(self.template.render(&table_json))
    }

    /// Render and write the report to `path`.
    ///
    /// The content goes to a temporary file next to `path` which is then renamed
    /// over it, so `path` never holds a partially written report.
    pub fn to_file(&self, stats: &[EndpointStat], path: &Path) -> Result<()> {
        tracing::debug!("Writing report file to: {}", path.display());

        let html = self.to_string(stats)?;
        let write_failed = |source: std::io::Error| Error::ReportWriteFailed {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = tempfile::Builder::new()
            .prefix(".report-")
            .suffix(".html.tmp")
            .tempfile_in(dir)
            .map_err(write_failed)?;
        temp.write_all(html.as_bytes()).map_err(write_failed)?;
        temp.as_file().sync_all().map_err(write_failed)?;
        temp.persist(path).map_err(|e| write_failed(e.error))?;

        tracing::info!(
            "Successfully wrote report with {} rows to {}",
            stats.len().min(self.report_size),
            path.display()
        );

        Ok(())
    }
}
