//! Multi-system search dispatch
//!
//! A [`Finder`] fans each query out across the active library-resolution
//! systems in fixed precedence order: rolled libraries, then packages, then
//! the site system. Results are merged in that order, dropping duplicates
//! while preserving first-seen order.

use std::sync::{Arc, OnceLock};

use indexmap::IndexSet;
use tracing::debug;

use crate::config::FinderConfig;
use crate::options::SearchOptions;
use crate::provider::{PackageIndex, PackageProvider, Provider, RollIndex, RollProvider, SiteProvider};

/// Dispatches search queries across every active library-resolution system.
///
/// The site system is always active; the package and rolled-library systems
/// join the registry only when the host supplies their backing-store handles.
/// The registry is computed on first use and reused for the finder's
/// lifetime.
///
/// # Example
///
/// ```no_run
/// use findlib::{Finder, FinderConfig, SearchOptions};
///
/// let finder = Finder::new(FinderConfig::default());
/// let paths = finder.path("lib/foo/*", &SearchOptions::new());
/// ```
pub struct Finder {
    config: FinderConfig,
    package_index: Option<Arc<dyn PackageIndex>>,
    roll_index: Option<Arc<dyn RollIndex>>,
    providers: OnceLock<Vec<Box<dyn Provider>>>,
}

impl Finder {
    /// Create a finder with the site system only.
    pub fn new(config: FinderConfig) -> Self {
        Self {
            config,
            package_index: None,
            roll_index: None,
            providers: OnceLock::new(),
        }
    }

    /// Enable the package system, backed by `index`.
    pub fn with_packages(mut self, index: Arc<dyn PackageIndex>) -> Self {
        self.package_index = Some(index);
        self
    }

    /// Enable the rolled-library system, backed by `index`.
    pub fn with_rolls(mut self, index: Arc<dyn RollIndex>) -> Self {
        self.roll_index = Some(index);
        self
    }

    /// Search each system's primary path space.
    pub fn path(&self, pattern: &str, options: &SearchOptions) -> Vec<String> {
        self.dispatch(|provider| provider.path(pattern, options))
    }

    /// Shorthand for [`path`](Finder::path) with default options.
    pub fn find(&self, pattern: &str) -> Vec<String> {
        self.path(pattern, &SearchOptions::default())
    }

    /// Search each system's designated data subtree.
    pub fn data_path(&self, pattern: &str, options: &SearchOptions) -> Vec<String> {
        self.dispatch(|provider| provider.data_path(pattern, options))
    }

    /// Search each system's load path. Returns absolute paths unless
    /// `relative` is requested.
    pub fn load_path(&self, pattern: &str, options: &SearchOptions) -> Vec<String> {
        self.dispatch(|provider| provider.load_path(pattern, options))
    }

    /// Like [`load_path`](Finder::load_path), but restricted to loadable
    /// code files and relative by default. Useful for plugin discovery.
    pub fn feature(&self, pattern: &str, options: &SearchOptions) -> Vec<String> {
        self.dispatch(|provider| provider.feature(pattern, options))
    }

    /// Active providers in precedence order, computed once.
    fn providers(&self) -> &[Box<dyn Provider>] {
        self.providers.get_or_init(|| {
            let mut systems: Vec<Box<dyn Provider>> = Vec::new();
            if let Some(index) = &self.roll_index {
                systems.push(Box::new(RollProvider::new(
                    Arc::clone(index),
                    self.config.extensions.clone(),
                )));
            }
            if let Some(index) = &self.package_index {
                systems.push(Box::new(PackageProvider::new(
                    Arc::clone(index),
                    self.config.extensions.clone(),
                )));
            }
            systems.push(Box::new(SiteProvider::new(
                self.config.site.clone(),
                self.config.extensions.clone(),
            )));

            let names: Vec<&str> = systems.iter().map(|s| s.name()).collect();
            debug!(?names, "Computed search system registry");
            systems
        })
    }

    /// Fan a query out across the registry, concatenating in provider order
    /// and deduplicating with first occurrence winning.
    fn dispatch<F>(&self, query: F) -> Vec<String>
    where
        F: Fn(&dyn Provider) -> Vec<String>,
    {
        let mut found: IndexSet<String> = IndexSet::new();
        for provider in self.providers() {
            let matches = query(provider.as_ref());
            debug!(
                provider = provider.name(),
                count = matches.len(),
                "Provider results"
            );
            found.extend(matches);
        }
        found.into_iter().collect()
    }
}
