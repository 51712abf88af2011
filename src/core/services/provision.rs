use std::path::Path;

use tracing::info;

use crate::core::errors::{Result, SiteconfError};

/// Make sure `dir` exists, creating parents as needed.
///
/// Returns `true` only if this call created it; an existing directory
/// is left alone.
pub fn ensure_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    info!(path = %dir.display(), "Creating log directory");
    std::fs::create_dir_all(dir).map_err(|source| SiteconfError::LogDirectory {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(true)
}
