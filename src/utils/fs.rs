//! File system helpers.
//!
//! The catalog artifact is replaced while readers may be loading it, so it
//! is always written atomically: content goes to a temporary file in the
//! target directory, is synced, and then renamed over the destination.
//! Readers see either the old file or the new one, never a partial write.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Creates a directory and its parents if missing.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Atomically writes bytes to `path`.
///
/// The temporary file is created next to the destination so the final rename
/// stays on one file system.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use wincat::utils::fs::atomic_write;
///
/// # fn example() -> anyhow::Result<()> {
/// atomic_write(Path::new("data/index.json"), b"{}")?;
/// # Ok(())
/// # }
/// ```
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    ensure_dir(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
    temp.write_all(content)
        .with_context(|| format!("Failed to write temporary file for {}", path.display()))?;
    temp.as_file()
        .sync_all()
        .with_context(|| format!("Failed to sync temporary file for {}", path.display()))?;

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}
