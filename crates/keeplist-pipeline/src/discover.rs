//! Takeout note discovery.
//!
//! Traversal is kept separate from per-file processing so the pipeline can
//! be tested without walking real directory trees.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use keeplist_core::{Error, Result};

/// Recursively collect the note JSON files under a takeout directory.
///
/// Non-JSON files are ignored; unreadable entries are skipped with a
/// warning. The result is sorted for a deterministic processing order.
pub fn discover_note_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::Config(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };

        if entry.file_type().is_file()
            && entry.path().extension().map_or(false, |ext| ext == "json")
        {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}
