//! Filesystem infrastructure: implements the `LocalFs` port.

use std::path::Path;

use anyhow::{Context, Result};

/// Production filesystem implementation of `LocalFs`.
pub struct StdFs;

impl crate::application::ports::LocalFs for StdFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    #[cfg(unix)]
    fn mode(&self, path: &Path) -> Result<Option<u32>> {
        use std::os::unix::fs::PermissionsExt;
        let meta =
            std::fs::metadata(path).with_context(|| format!("cannot stat {}", path.display()))?;
        Ok(Some(meta.permissions().mode()))
    }

    #[cfg(not(unix))]
    fn mode(&self, path: &Path) -> Result<Option<u32>> {
        std::fs::metadata(path).with_context(|| format!("cannot stat {}", path.display()))?;
        Ok(None)
    }
}
