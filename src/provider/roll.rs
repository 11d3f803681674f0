//! Rolled-library system provider
//!
//! Resolves patterns against a locally tracked set of library versions. The
//! distinguishing behavior against the package system: unscoped `load_path`
//! and `feature` queries consider only the currently active version of each
//! library, falling back to the semantically greatest one. That bounds the
//! search space for plugin discovery, where every installed version of every
//! library would be far too much.

use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexSet;
#[cfg(test)]
use mockall::automock;

use crate::config::Extensions;
use crate::options::{PathMode, SearchOptions};
use crate::provider::Provider;
use crate::scan::{glob_under_soft, relative_to};
use crate::version::find_semantic_max;

/// One tracked version of a locally rolled library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolledLibrary {
    pub name: String,
    pub version: String,
    /// Root directory of this library version.
    pub root: PathBuf,
    /// Designated data subdirectory, when the library ships one.
    pub data_dir: Option<PathBuf>,
    /// Directories this version contributes to the load path when active.
    pub load_paths: Vec<PathBuf>,
}

/// Backing store contract for the rolled-library system.
#[cfg_attr(test, automock)]
pub trait RollIndex: Send + Sync {
    /// Every tracked library version.
    fn tracked(&self) -> Vec<RolledLibrary>;

    /// The currently activated version of `name`, when one is in effect.
    fn current_version(&self, name: &str) -> Option<String>;

    /// Mark `name`/`version` as the version in effect for the remainder of
    /// the process.
    fn activate(&self, name: &str, version: &str);
}

/// Provider for the rolled-library system.
pub struct RollProvider {
    index: Arc<dyn RollIndex>,
    extensions: Extensions,
}

impl RollProvider {
    pub fn new(index: Arc<dyn RollIndex>, extensions: Extensions) -> Self {
        Self { index, extensions }
    }

    /// The current-or-latest version of `name` among `tracked`.
    fn default_version(&self, tracked: &[RolledLibrary], name: &str) -> Option<String> {
        self.index.current_version(name).or_else(|| {
            find_semantic_max(
                tracked
                    .iter()
                    .filter(|library| library.name == name)
                    .map(|library| library.version.as_str()),
            )
        })
    }

    /// Library versions selected by `from`/`version`.
    ///
    /// `bounded` restricts unscoped queries to the current-or-latest version
    /// of each library; `path`/`data_path` pass `false` and see every
    /// tracked version.
    fn selected(&self, options: &SearchOptions, bounded: bool) -> Vec<RolledLibrary> {
        let tracked = self.index.tracked();

        if let Some(name) = &options.from {
            let version = options
                .version
                .clone()
                .or_else(|| self.default_version(&tracked, name));
            return tracked
                .into_iter()
                .filter(|library| {
                    library.name == *name
                        && version.as_deref().is_none_or(|v| library.version == v)
                })
                .collect();
        }

        if let Some(version) = &options.version {
            return tracked
                .into_iter()
                .filter(|library| library.version == *version)
                .collect();
        }

        if !bounded {
            return tracked;
        }

        let names: IndexSet<String> = tracked
            .iter()
            .map(|library| library.name.clone())
            .collect();
        names
            .into_iter()
            .filter_map(|name| {
                let version = self.default_version(&tracked, &name)?;
                tracked
                    .iter()
                    .find(|library| library.name == name && library.version == version)
                    .cloned()
            })
            .collect()
    }

    /// Run `scan` over each selected library, activating any that produced
    /// at least one match when `activate` is requested.
    fn search<F>(&self, options: &SearchOptions, bounded: bool, scan: F) -> Vec<String>
    where
        F: Fn(&RolledLibrary) -> Vec<String>,
    {
        let mut found = Vec::new();
        for library in self.selected(options, bounded) {
            let matches = scan(&library);
            if options.activate && !matches.is_empty() {
                self.index.activate(&library.name, &library.version);
            }
            found.extend(matches);
        }
        found
    }

    fn scan_load_paths(library: &RolledLibrary, pattern: &str, mode: PathMode) -> Vec<String> {
        let mut found = Vec::new();
        for entry in &library.load_paths {
            let matches = glob_under_soft(entry, pattern);
            match mode {
                PathMode::Absolute => found.extend(matches),
                PathMode::Relative => {
                    found.extend(matches.iter().map(|m| relative_to(m, entry)));
                }
            }
        }
        found
    }
}

impl Provider for RollProvider {
    fn name(&self) -> &'static str {
        "roll"
    }

    fn path(&self, pattern: &str, options: &SearchOptions) -> Vec<String> {
        self.search(options, false, |library| {
            let mut found = glob_under_soft(&library.root, pattern);
            for entry in &library.load_paths {
                found.extend(glob_under_soft(entry, pattern));
            }
            found
        })
    }

    fn data_path(&self, pattern: &str, options: &SearchOptions) -> Vec<String> {
        self.search(options, false, |library| match &library.data_dir {
            Some(data_dir) => glob_under_soft(data_dir, pattern),
            None => Vec::new(),
        })
    }

    fn load_path(&self, pattern: &str, options: &SearchOptions) -> Vec<String> {
        let mode = options.path_mode(PathMode::Absolute);
        self.search(options, true, |library| {
            Self::scan_load_paths(library, pattern, mode)
        })
    }

    fn feature(&self, pattern: &str, options: &SearchOptions) -> Vec<String> {
        let mode = options.path_mode(PathMode::Relative);
        let patterns = self.extensions.feature_patterns(pattern);
        self.search(options, true, |library| {
            patterns
                .iter()
                .flat_map(|p| Self::scan_load_paths(library, p, mode))
                .collect()
        })
    }
}
