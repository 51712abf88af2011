use std::path::Path;

use crate::core::errors::{Result, SiteconfError};
use crate::core::models::env_file::EnvFile;

/// Port for reading environment files.
///
/// `DotenvParser` is the only implementation today.
pub trait EnvFileParser: Send + Sync {
    /// Parse raw file content. `origin` is only used in error messages.
    fn parse(&self, content: &str, origin: &Path) -> Result<EnvFile>;

    /// Read and parse `path`, or `None` if the file does not exist.
    fn load(&self, path: &Path) -> Result<Option<EnvFile>> {
        if !path.is_file() {
            return Ok(None);
        }
        let bytes = std::fs::read(path)?;
        let content = String::from_utf8(bytes).map_err(|e| {
            let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
            SiteconfError::ParseError {
                file: path.to_path_buf(),
                line: valid.iter().filter(|&&b| b == b'\n').count() + 1,
                detail: "file is not valid UTF-8".to_string(),
            }
        })?;
        self.parse(&content, path)
            .map(|file| Some(file.with_source(path)))
    }
}
