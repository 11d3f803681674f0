//! Provider contract shared by every library-resolution system
//!
//! A provider resolves glob queries against one backing system: the host's
//! site load path, the package manager's installed packages, or the rolled
//! library store. Each implements the same four-method contract; the
//! [`Finder`](crate::Finder) fans queries out across the active set.

pub mod package;
pub mod roll;
pub mod site;

pub use package::{PackageIndex, PackageProvider, PackageRecord};
pub use roll::{RollIndex, RollProvider, RolledLibrary};
pub use site::SiteProvider;

#[cfg(test)]
use mockall::automock;

use crate::options::SearchOptions;

/// Trait every library-resolution system implements.
///
/// All four methods share the fail-soft contract: an unmatched pattern, an
/// unknown `from` target, or an option the system has no concept of yields an
/// empty list, never an error. Deduplication across providers happens at the
/// dispatch level; a provider only keeps its own output in scan order.
#[cfg_attr(test, automock)]
pub trait Provider: Send + Sync {
    /// Short system name, used for logging.
    fn name(&self) -> &'static str;

    /// Search the system's primary path space.
    fn path(&self, pattern: &str, options: &SearchOptions) -> Vec<String>;

    /// Search the system's designated data subtree only.
    fn data_path(&self, pattern: &str, options: &SearchOptions) -> Vec<String>;

    /// Search the system's load path. Supports `absolute`/`relative` output
    /// shaping, defaulting to absolute.
    fn load_path(&self, pattern: &str, options: &SearchOptions) -> Vec<String>;

    /// Like [`load_path`](Provider::load_path), but restricted to loadable
    /// code files and relative by default.
    fn feature(&self, pattern: &str, options: &SearchOptions) -> Vec<String>;
}
