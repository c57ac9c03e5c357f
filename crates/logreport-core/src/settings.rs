use std::path::{Path, PathBuf};
use tracing::Level;

pub const DEFAULT_REPORT_SIZE: usize = 1000;
pub const DEFAULT_MAX_ERROR_FRACTION: f64 = 0.1;
pub const TABLESORTER_ASSET: &str = "jquery.tablesorter.min.js";

/// Settings for one run, built once at startup and never mutated
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Maximum number of rows in the report table
    pub report_size: usize,
    pub report_dir: PathBuf,
    pub report_template: PathBuf,
    pub log_dir: PathBuf,
    /// Largest tolerated share of unparsable lines, in `[0, 1]`
    pub max_error_fraction: f64,
    /// Static files copied into `report_dir` alongside the reports
    pub assets: Vec<PathBuf>,
    pub logging_file: Option<PathBuf>,
    pub logging_level: Level,
}

impl Settings {
    /// The table sorter script expected next to `template`
    pub fn default_assets(template: &Path) -> Vec<PathBuf> {
        let dir = template.parent().unwrap_or_else(|| Path::new(""));
        vec![dir.join(TABLESORTER_ASSET)]
    }
}

impl Default for Settings {
    fn default() -> Self {
        let report_template = PathBuf::from("./report.html");
        Self {
            report_size: DEFAULT_REPORT_SIZE,
            report_dir: PathBuf::from("./reports"),
            assets: Self::default_assets(&report_template),
            report_template,
            log_dir: PathBuf::from("./log"),
            max_error_fraction: DEFAULT_MAX_ERROR_FRACTION,
            logging_file: None,
            logging_level: Level::INFO,
        }
    }
}
