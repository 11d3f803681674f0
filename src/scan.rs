//! Filesystem glob helpers shared by providers
//!
//! Wraps the `glob` crate's pattern expansion with the conventions every
//! provider relies on: patterns are joined beneath a base directory, trailing
//! path separators are stripped, and unreadable entries are skipped rather
//! than surfaced.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::ScanError;

/// Expand `pattern` beneath `dir` and return every matching path as a string.
///
/// The pattern is always confined beneath `dir`: leading separators are
/// stripped before joining, so an absolute pattern cannot replace the base
/// and glob the filesystem at large.
///
/// Matches are returned in the order the glob iterator yields them, trailing
/// separators stripped. Entries the iterator cannot read are skipped.
pub(crate) fn glob_under(dir: &Path, pattern: &str) -> Result<Vec<String>, ScanError> {
    let pattern = pattern.trim_start_matches(['/', std::path::MAIN_SEPARATOR]);
    let full = dir.join(pattern);
    let full = full
        .to_str()
        .ok_or_else(|| ScanError::NonUtf8Path(dir.to_path_buf()))?;

    let paths = glob::glob(full)?;

    Ok(paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(strip_trailing_separator(&path.to_string_lossy())),
            Err(e) => {
                warn!("Skipping unreadable glob entry: {}", e);
                None
            }
        })
        .collect())
}

/// Expand `pattern` beneath `dir`, downgrading any scan failure to an empty
/// result with a warning. This is the fail-soft form every provider uses.
pub(crate) fn glob_under_soft(dir: &Path, pattern: &str) -> Vec<String> {
    glob_under(dir, pattern).unwrap_or_else(|e| {
        warn!("Glob failed under {}: {}", dir.display(), e);
        Vec::new()
    })
}

/// Search the fixed system data directory for matching patterns.
///
/// Independent of the runtime search path; used by the site system and by any
/// provider whose backing store carries a parallel data directory.
pub(crate) fn scan_data_dir(data_dir: &Path, pattern: &str) -> Vec<String> {
    glob_under_soft(data_dir, pattern)
}

fn strip_trailing_separator(path: &str) -> String {
    path.trim_end_matches(std::path::MAIN_SEPARATOR).to_string()
}

/// Absolutize a search-path entry without touching the filesystem.
pub(crate) fn absolutize(entry: &Path) -> PathBuf {
    std::path::absolute(entry).unwrap_or_else(|_| entry.to_path_buf())
}

/// Strip the providing entry's prefix (and its separator) from a match,
/// leaving the path relative to that entry. Matches outside the entry are
/// returned unchanged.
pub(crate) fn relative_to(path: &str, entry: &Path) -> String {
    Path::new(path)
        .strip_prefix(entry)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| path.to_string())
}
