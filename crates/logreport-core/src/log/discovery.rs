use crate::{Error, Result};
use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref LOG_FILENAME_PATTERN: Regex =
        Regex::new(r"^nginx-access-ui\.log-(?P<date>[0-9]{8})(?P<gz>\.gz)?$").unwrap();
}

/// A log file selected for processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFileRef {
    pub path: PathBuf,
    pub date: NaiveDate,
    pub compressed: bool,
}

impl LogFileRef {
    /// Build a reference from a file name, or `None` if the name is not a UI access log.
    ///
    /// A name that matches but carries an impossible calendar date is an error.
    pub fn from_path(path: &Path) -> Result<Option<Self>> {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return Ok(None);
        };
        let Some(captures) = LOG_FILENAME_PATTERN.captures(name) else {
            return Ok(None);
        };

        let digits = &captures["date"];
        let date = NaiveDate::parse_from_str(digits, "%Y%m%d")
            .ok()
            .filter(|date| date.year() >= 1)
            .ok_or_else(|| Error::MalformedLogDate(path.to_path_buf()))?;

        Ok(Some(Self {
            path: path.to_path_buf(),
            date,
            compressed: captures.name("gz").is_some(),
        }))
    }
}

pub struct LogDiscovery;

impl LogDiscovery {
    /// Find the most recent UI access log in `log_dir` (by the date in its name)
    pub fn latest(log_dir: &Path) -> Result<LogFileRef> {
        tracing::debug!("Searching log files in: {}", log_dir.display());

        if !log_dir.is_dir() {
            return Err(Error::DirectoryNotFound(log_dir.to_path_buf()));
        }

        let list_failed = |source: std::io::Error| Error::LogDir {
            path: log_dir.to_path_buf(),
            source,
        };
        let mut latest: Option<LogFileRef> = None;

        for dir_entry in fs::read_dir(log_dir).map_err(list_failed)? {
            let path = dir_entry.map_err(list_failed)?.path();
            if !path.is_file() {
                continue;
            }

            let Some(candidate) = LogFileRef::from_path(&path)? else {
                continue;
            };

            if latest.as_ref().is_none_or(|l| candidate.date > l.date) {
                latest = Some(candidate);
            }
        }

        let latest = latest.ok_or_else(|| Error::NoLogFound(log_dir.to_path_buf()))?;

        tracing::info!(
            "Last log found: {} ({})",
            latest.path.display(),
            latest.date
        );

        Ok(latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_latest_picks_greatest_date() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "nginx-access-ui.log-20170630");
        touch(dir.path(), "nginx-access-ui.log-20170701.gz");
        touch(dir.path(), "nginx-access-ui.log-20170629");

        let latest = LogDiscovery::latest(dir.path()).unwrap();
        assert_eq!(
            latest.path.file_name().unwrap(),
            "nginx-access-ui.log-20170701.gz"
        );
        assert_eq!(latest.date, NaiveDate::from_ymd_opt(2017, 7, 1).unwrap());
        assert!(latest.compressed);
    }

    #[test]
    fn test_plain_log_is_not_compressed() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "nginx-access-ui.log-20180101");

        let latest = LogDiscovery::latest(dir.path()).unwrap();
        assert!(!latest.compressed);
    }

    #[test]
    fn test_ignores_other_files_and_directories() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "nginx-access-ui.log-20170630");
        touch(dir.path(), "nginx-access-ui.log-20991231.bz2");
        touch(dir.path(), "nginx-access-api.log-20991231");
        touch(dir.path(), "nginx-access-ui.log-2099123");
        fs::create_dir(dir.path().join("nginx-access-ui.log-20991231")).unwrap();

        let latest = LogDiscovery::latest(dir.path()).unwrap();
        assert_eq!(latest.date, NaiveDate::from_ymd_opt(2017, 6, 30).unwrap());
    }

    #[test]
    fn test_does_not_recurse() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("archive");
        fs::create_dir(&nested).unwrap();
        touch(&nested, "nginx-access-ui.log-20170630");

        let result = LogDiscovery::latest(dir.path());
        assert!(matches!(result, Err(Error::NoLogFound(_))));
    }

    #[test]
    fn test_invalid_calendar_date_fails() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "nginx-access-ui.log-20170630");
        touch(dir.path(), "nginx-access-ui.log-20171340");

        let result = LogDiscovery::latest(dir.path());
        assert!(matches!(result, Err(Error::MalformedLogDate(_))));
    }

    #[test]
    fn test_year_zero_is_malformed() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "nginx-access-ui.log-00001231");

        let result = LogDiscovery::latest(dir.path());
        assert!(matches!(result, Err(Error::MalformedLogDate(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_names_the_path() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let log_dir = dir.path().join("log");
        fs::create_dir(&log_dir).unwrap();
        touch(&log_dir, "nginx-access-ui.log-20170630");
        fs::set_permissions(&log_dir, fs::Permissions::from_mode(0o000)).unwrap();

        let result = LogDiscovery::latest(&log_dir);
        fs::set_permissions(&log_dir, fs::Permissions::from_mode(0o755)).unwrap();

        // Permission bits do not apply to root
        if result.is_ok() {
            return;
        }

        let err = result.unwrap_err();
        assert!(matches!(err, Error::LogDir { ref path, .. } if path == &log_dir));
        assert!(err.to_string().contains(&log_dir.display().to_string()));
    }

    #[test]
    fn test_log_dir_error_message() {
        let err = Error::LogDir {
            path: PathBuf::from("/var/log/nginx"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(
            err.to_string()
                .starts_with("Failed to list log directory /var/log/nginx: ")
        );
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let result = LogDiscovery::latest(&missing);
        assert!(matches!(result, Err(Error::DirectoryNotFound(_))));
    }

    #[test]
    fn test_file_instead_of_directory() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "nginx-access-ui.log-20170630");

        let result = LogDiscovery::latest(&dir.path().join("nginx-access-ui.log-20170630"));
        assert!(matches!(result, Err(Error::DirectoryNotFound(_))));
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();

        let result = LogDiscovery::latest(dir.path());
        assert!(matches!(result, Err(Error::NoLogFound(_))));
    }
}
