//! Site system provider
//!
//! Resolves patterns against the host's runtime load path and the fixed
//! system data directory. The site system has no package or version concept:
//! any query scoped with `from` returns empty.

use std::path::PathBuf;

use indexmap::IndexSet;

use crate::config::{Extensions, SiteConfig};
use crate::options::{PathMode, SearchOptions};
use crate::provider::Provider;
use crate::scan::{absolutize, glob_under_soft, relative_to, scan_data_dir};

/// Provider for the site system: load-path entries plus the system data
/// directory.
pub struct SiteProvider {
    site: SiteConfig,
    extensions: Extensions,
}

impl SiteProvider {
    pub fn new(site: SiteConfig, extensions: Extensions) -> Self {
        Self { site, extensions }
    }

    /// Load-path entries in order, duplicates skipped, each absolutized.
    fn search_entries(&self) -> Vec<PathBuf> {
        let unique: IndexSet<&PathBuf> = self.site.load_path.iter().collect();
        unique.into_iter().map(|entry| absolutize(entry)).collect()
    }

    /// Scan every load-path entry for `pattern`, shaping output per `mode`.
    fn scan_load_path(&self, pattern: &str, mode: PathMode) -> Vec<String> {
        let mut found = Vec::new();
        for entry in self.search_entries() {
            let matches = glob_under_soft(&entry, pattern);
            match mode {
                PathMode::Absolute => found.extend(matches),
                PathMode::Relative => {
                    found.extend(matches.iter().map(|m| relative_to(m, &entry)));
                }
            }
        }
        found
    }
}

impl Provider for SiteProvider {
    fn name(&self) -> &'static str {
        "site"
    }

    fn path(&self, pattern: &str, options: &SearchOptions) -> Vec<String> {
        if options.from.is_some() {
            return Vec::new();
        }

        let mut found = self.scan_load_path(pattern, PathMode::Absolute);
        found.extend(scan_data_dir(&self.site.data_dir, pattern));
        found
    }

    fn data_path(&self, pattern: &str, options: &SearchOptions) -> Vec<String> {
        if options.from.is_some() {
            return Vec::new();
        }

        let unique: IndexSet<String> = scan_data_dir(&self.site.data_dir, pattern)
            .into_iter()
            .collect();
        unique.into_iter().collect()
    }

    fn load_path(&self, pattern: &str, options: &SearchOptions) -> Vec<String> {
        if options.from.is_some() {
            return Vec::new();
        }

        self.scan_load_path(pattern, options.path_mode(PathMode::Absolute))
    }

    fn feature(&self, pattern: &str, options: &SearchOptions) -> Vec<String> {
        if options.from.is_some() {
            return Vec::new();
        }

        let mode = options.path_mode(PathMode::Relative);
        self.extensions
            .feature_patterns(pattern)
            .iter()
            .flat_map(|p| self.scan_load_path(p, mode))
            .collect()
    }
}
