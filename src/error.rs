use std::path::PathBuf;
use thiserror::Error;

/// Error type for filesystem scan helpers.
///
/// Never crosses the public search surface: providers downgrade scan failures
/// to empty results, so callers always see the fail-soft contract.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid glob pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    #[error("Search path entry is not valid UTF-8: {0}")]
    NonUtf8Path(PathBuf),
}
