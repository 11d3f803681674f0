//! Multi-system file finder for host library paths.
//!
//! Locates files matching a glob pattern across the library-resolution
//! systems available to a host environment:
//!
//! - **Package system**: paths of and within installed packages known to the
//!   host package manager.
//! - **Site system**: paths in the runtime load path and the fixed system
//!   data directory.
//! - **Rolled-library system**: current or latest files within locally
//!   tracked library versions.
//!
//! A [`Finder`] issues one logical query, fans it out across every active
//! system in precedence order, and returns the merged, deduplicated result.
//! Backing stores for the package and rolled-library systems are supplied by
//! the host through the [`PackageIndex`](provider::PackageIndex) and
//! [`RollIndex`](provider::RollIndex) traits; the site system only needs a
//! [`FinderConfig`].
//!
//! ```no_run
//! use findlib::{Finder, FinderConfig, SearchOptions};
//!
//! let finder = Finder::new(FinderConfig::default());
//!
//! // All matching paths, absolute, first occurrence wins.
//! let paths = finder.find("lib/foo/*");
//!
//! // Loadable files, relative to their load-path entry.
//! let features = finder.feature("ostruct", &SearchOptions::new());
//! ```
//!
//! Every search is fail-soft: unmatched patterns, unknown `from` targets,
//! and absent subsystems all yield empty results, never errors.

pub mod config;
pub mod error;
pub mod finder;
pub mod options;
pub mod provider;
pub mod version;

pub(crate) mod scan;

pub use config::{Extensions, FinderConfig, SiteConfig};
pub use error::ScanError;
pub use finder::Finder;
pub use options::{PathMode, SearchOptions};
pub use provider::{
    PackageIndex, PackageProvider, PackageRecord, Provider, RollIndex, RollProvider,
    RolledLibrary, SiteProvider,
};
