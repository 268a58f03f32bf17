//! Filesystem helpers for artifact relocation.

use super::error::{Error, ErrorExt, Result};
use crate::bail;
use std::path::Path;

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e.into()),
    }
}

/// Recursively copies a directory, creating any parent directories of the
/// destination path as necessary.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        bail!("{} is not a directory", from.display());
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    // Blocking iteration is fine on the blocking pool
    tokio::task::spawn_blocking(move || -> Result<()> {
        for entry in walkdir::WalkDir::new(&from) {
            let entry =
                entry.map_err(|e| Error::Generic(format!("walking {}: {}", from.display(), e)))?;
            let rel = entry
                .path()
                .strip_prefix(&from)
                .map_err(|e| Error::Generic(format!("walking {}: {}", from.display(), e)))?;
            let dest = to.join(rel);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest).fs_context("creating directory", &dest)?;
            } else {
                if let Some(parent) = dest.parent() {
                    std::fs::create_dir_all(parent).fs_context("creating directory", parent)?;
                }
                std::fs::copy(entry.path(), &dest).fs_context("copying file", &dest)?;
            }
        }
        Ok(())
    })
    .await
    .map_err(|e| Error::Generic(format!("directory copy task panicked: {}", e)))?
}
