//! Stale output removal.
//!
//! Before generating, every file under the output root whose extension is in
//! the generated-artifact set is deleted. This guarantees that resources
//! removed from a manifest tree do not leave orphaned sources behind.
//!
//! The walk covers the whole output tree, so if the output root is also the
//! resource root, hand-written `.c`/`.h` files in it are removed too.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Output directory not found: {0}")]
    RootMissing(PathBuf),
    #[error("Failed to walk output directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Delete generated files under `root`, returning the removed paths in walk
/// order.
pub fn clean_generated(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, CleanError> {
    if !root.is_dir() {
        return Err(CleanError::RootMissing(root.to_path_buf()));
    }

    let mut removed = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_generated(entry.path(), extensions) {
            continue;
        }
        let path = entry.into_path();
        fs::remove_file(&path).map_err(|source| CleanError::Remove {
            path: path.clone(),
            source,
        })?;
        debug!("Removed stale {}", path.display());
        removed.push(path);
    }
    Ok(removed)
}

fn is_generated(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy())
        .is_some_and(|ext| extensions.iter().any(|g| g.as_str() == ext.as_ref()))
}
