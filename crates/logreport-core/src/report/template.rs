use crate::{Error, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;

/// Name of the token replaced with the report table, written `$table_json` or `${table_json}`
pub const PLACEHOLDER: &str = "table_json";

lazy_static! {
    static ref PLACEHOLDER_PATTERN: Regex =
        Regex::new(r"\$(?:\{table_json\}|table_json\b)").unwrap();
    // `$$` is an escaped dollar and must be consumed before a placeholder can match
    static ref SUBSTITUTION_PATTERN: Regex =
        Regex::new(r"\$(?:(?P<escaped>\$)|\{table_json\}|table_json\b)").unwrap();
}

/// HTML report template with a single data placeholder
#[derive(Debug, Clone)]
pub struct ReportTemplate {
    source: String,
}

impl ReportTemplate {
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Reading report template from: {}", path.display());

        let source = fs::read_to_string(path).map_err(|source| Error::TemplateNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        if !PLACEHOLDER_PATTERN.is_match(&source) {
            tracing::warn!(
                "Report template {} has no ${} placeholder",
                path.display(),
                PLACEHOLDER
            );
        }

        Ok(Self { source })
    }

    pub fn from_str(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }

    /// Substitute `table_json` into the template and collapse `$$` to `$`.
    ///
    /// Any other `$` tokens are left as they are.
    pub fn render(&self, table_json: &str) -> String {
        SUBSTITUTION_PATTERN
            .replace_all(&self.source, |caps: &Captures| {
                if caps.name("escaped").is_some() {
                    "$"
                } else {
                    table_json
                }
            })
            .into_owned()
    }
}
