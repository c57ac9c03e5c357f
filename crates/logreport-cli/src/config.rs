use anyhow::{Context, Result, bail};
use logreport_core::Settings;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Load settings from an optional key=value file, falling back to defaults
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_settings(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Parse `KEY = value` (or `KEY: value`) lines over the defaults.
///
/// Blank lines, `#`/`;` comments and `[section]` headers are skipped. Keys are
/// case-insensitive and unknown keys are ignored.
pub fn parse_settings(content: &str) -> Result<Settings> {
    let mut settings = Settings::default();
    let mut assets_configured = false;

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty()
            || line.starts_with('#')
            || line.starts_with(';')
            || (line.starts_with('[') && line.ends_with(']'))
        {
            continue;
        }

        let Some((key, value)) = split_entry(line) else {
            bail!("line {}: expected KEY = value, got '{}'", idx + 1, line);
        };

        match key.to_ascii_uppercase().as_str() {
            "REPORT_SIZE" => {
                settings.report_size = match value.parse::<usize>() {
                    Ok(size) if size > 0 => size,
                    _ => bail!(
                        "line {}: REPORT_SIZE must be a positive integer, got '{}'",
                        idx + 1,
                        value
                    ),
                };
            }
            "REPORT_DIR" => settings.report_dir = PathBuf::from(value),
            "REPORT_HTML_TEMPLATE" => settings.report_template = PathBuf::from(value),
            "LOG_DIR" => settings.log_dir = PathBuf::from(value),
            "MAX_ERROR_PERCENT" => {
                settings.max_error_fraction = match value.parse::<f64>() {
                    Ok(fraction) if (0.0..=1.0).contains(&fraction) => fraction,
                    _ => bail!(
                        "line {}: MAX_ERROR_PERCENT must be a fraction between 0 and 1, got '{}'",
                        idx + 1,
                        value
                    ),
                };
            }
            "REPORT_ASSETS" => {
                settings.assets = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(PathBuf::from)
                    .collect();
                assets_configured = true;
            }
            "LOGGING_FILE" => {
                settings.logging_file = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "LOGGING_LEVEL" => {
                settings.logging_level = parse_level(value).with_context(|| {
                    format!("line {}: unknown LOGGING_LEVEL '{}'", idx + 1, value)
                })?;
            }
            _ => {}
        }
    }

    if !assets_configured {
        settings.assets = Settings::default_assets(&settings.report_template);
    }

    Ok(settings)
}

/// Split on whichever of `=` or `:` comes first
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let at = line.find(['=', ':'])?;
    let key = line[..at].trim();
    if key.is_empty() {
        return None;
    }
    Some((key, line[at + 1..].trim()))
}

fn parse_level(value: &str) -> Result<Level> {
    match value.to_ascii_uppercase().as_str() {
        "WARNING" => Ok(Level::WARN),
        "CRITICAL" | "FATAL" => Ok(Level::ERROR),
        _ => Ok(value.parse::<Level>()?),
    }
}
