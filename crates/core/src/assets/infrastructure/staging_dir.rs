use std::path::PathBuf;

use thiserror::Error;

use crate::shared::constants::{APP_DIR_NAME, STAGING_DIR_NAME};

#[derive(Error, Debug)]
pub enum StagingDirError {
    #[error("could not determine a writable cache directory")]
    NoCacheDir,
}

/// Platform-specific directory that staged classifier files are copied into.
///
/// - macOS: `~/Library/Application Support/Cascade Overlay/cascade/`
/// - Linux: `$XDG_CACHE_HOME/Cascade Overlay/cascade/` or `~/.cache/Cascade Overlay/cascade/`
/// - Windows: `%LOCALAPPDATA%/Cascade Overlay/cascade/`
pub fn default_staging_dir() -> Result<PathBuf, StagingDirError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join(APP_DIR_NAME).join(STAGING_DIR_NAME))
            .ok_or(StagingDirError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join(APP_DIR_NAME).join(STAGING_DIR_NAME))
            .ok_or(StagingDirError::NoCacheDir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_staging_dir_returns_path() {
        let dir = default_staging_dir();
        assert!(dir.is_ok());
        let path = dir.unwrap();
        assert!(path.to_string_lossy().contains("Cascade Overlay"));
        assert!(path.ends_with("cascade"));
    }
}
