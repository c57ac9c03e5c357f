use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Create `report_dir` if needed and copy static assets the report pages load.
///
/// Assets already present in `report_dir` are kept. A missing source asset is
/// only logged, since the report itself is still usable without it.
pub fn prepare_report_dir(report_dir: &Path, assets: &[PathBuf]) -> Result<()> {
    if !report_dir.is_dir() {
        tracing::info!("Creating report directory: {}", report_dir.display());
        fs::create_dir_all(report_dir).map_err(|source| Error::ReportDir {
            path: report_dir.to_path_buf(),
            source,
        })?;
    }

    for asset in assets {
        let Some(file_name) = asset.file_name() else {
            continue;
        };

        let dest = report_dir.join(file_name);
        if dest.is_file() {
            continue;
        }
        if !asset.is_file() {
            tracing::warn!("Report asset not found, skipping: {}", asset.display());
            continue;
        }

        tracing::debug!("Copying {} to {}", asset.display(), dest.display());
        fs::copy(asset, &dest).map_err(|source| Error::Asset {
            path: asset.clone(),
            source,
        })?;
    }

    Ok(())
}
