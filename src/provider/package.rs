//! Package system provider
//!
//! Resolves patterns against packages known to the host package manager. The
//! index itself is an external collaborator behind [`PackageIndex`]: it knows
//! what is installed, which version would be loaded by default, and how to
//! activate a version. This provider only selects records and globs their
//! directories.

use std::path::PathBuf;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use crate::config::Extensions;
use crate::options::{PathMode, SearchOptions};
use crate::provider::Provider;
use crate::scan::{glob_under_soft, relative_to};

/// One installed package version known to the package manager.
///
/// The index decides what counts as the root, the data subdirectory, and the
/// load-path contributions; the provider assumes nothing about the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    /// Root directory of the installed package.
    pub root: PathBuf,
    /// Designated data subdirectory, when the package ships one.
    pub data_dir: Option<PathBuf>,
    /// Directories this package contributes to the load path when activated.
    pub load_paths: Vec<PathBuf>,
}

/// Backing store contract for the package system.
#[cfg_attr(test, automock)]
pub trait PackageIndex: Send + Sync {
    /// Every installed package version.
    fn installed(&self) -> Vec<PackageRecord>;

    /// The version of `name` that would be loaded absent an explicit
    /// selector, when the index knows one.
    fn default_version(&self, name: &str) -> Option<String>;

    /// Mark `name`/`version` as the version in effect for the remainder of
    /// the process.
    fn activate(&self, name: &str, version: &str);
}

/// Provider for the package system.
pub struct PackageProvider {
    index: Arc<dyn PackageIndex>,
    extensions: Extensions,
}

impl PackageProvider {
    pub fn new(index: Arc<dyn PackageIndex>, extensions: Extensions) -> Self {
        Self { index, extensions }
    }

    /// Records selected by `from`/`version`.
    ///
    /// With `from`, only that package is considered, at the requested version
    /// or the index's default; an unknown name or version selects nothing.
    /// Without `from`, every package is considered at its default (or
    /// explicitly requested) version, falling back to all installed versions
    /// when the index has no default.
    fn selected(&self, options: &SearchOptions) -> Vec<PackageRecord> {
        let installed = self.index.installed();

        installed
            .into_iter()
            .filter(|record| match &options.from {
                Some(name) => {
                    if record.name != *name {
                        return false;
                    }
                    let version = options
                        .version
                        .clone()
                        .or_else(|| self.index.default_version(name));
                    version.as_deref().is_none_or(|v| record.version == v)
                }
                None => {
                    let version = options
                        .version
                        .clone()
                        .or_else(|| self.index.default_version(&record.name));
                    version.as_deref().is_none_or(|v| record.version == v)
                }
            })
            .collect()
    }

    /// Run `scan` over each selected record, activating any record that
    /// produced at least one match when `activate` is requested.
    fn search<F>(&self, options: &SearchOptions, scan: F) -> Vec<String>
    where
        F: Fn(&PackageRecord) -> Vec<String>,
    {
        let mut found = Vec::new();
        for record in self.selected(options) {
            let matches = scan(&record);
            if options.activate && !matches.is_empty() {
                self.index.activate(&record.name, &record.version);
            }
            found.extend(matches);
        }
        found
    }

    fn scan_load_paths(record: &PackageRecord, pattern: &str, mode: PathMode) -> Vec<String> {
        let mut found = Vec::new();
        for entry in &record.load_paths {
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

impl Provider for PackageProvider {
    fn name(&self) -> &'static str {
        "package"
    }

    fn path(&self, pattern: &str, options: &SearchOptions) -> Vec<String> {
        self.search(options, |record| {
            let mut found = glob_under_soft(&record.root, pattern);
            for entry in &record.load_paths {
                found.extend(glob_under_soft(entry, pattern));
            }
            found
        })
    }

    fn data_path(&self, pattern: &str, options: &SearchOptions) -> Vec<String> {
        self.search(options, |record| match &record.data_dir {
            Some(data_dir) => glob_under_soft(data_dir, pattern),
            None => Vec::new(),
        })
    }

    fn load_path(&self, pattern: &str, options: &SearchOptions) -> Vec<String> {
        let mode = options.path_mode(PathMode::Absolute);
        self.search(options, |record| {
            Self::scan_load_paths(record, pattern, mode)
        })
    }

    fn feature(&self, pattern: &str, options: &SearchOptions) -> Vec<String> {
        let mode = options.path_mode(PathMode::Relative);
        let patterns = self.extensions.feature_patterns(pattern);
        self.search(options, |record| {
            patterns
                .iter()
                .flat_map(|p| Self::scan_load_paths(record, p, mode))
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn touch(dir: &Path, relative: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    /// In-memory index over a fixed set of records.
    struct StaticIndex {
        records: Vec<PackageRecord>,
        defaults: HashMap<String, String>,
    }

    impl StaticIndex {
        fn new(records: Vec<PackageRecord>, defaults: &[(&str, &str)]) -> Self {
            Self {
                records,
                defaults: defaults
                    .iter()
                    .map(|(name, version)| (name.to_string(), version.to_string()))
                    .collect(),
            }
        }
    }

    impl PackageIndex for StaticIndex {
        fn installed(&self) -> Vec<PackageRecord> {
            self.records.clone()
        }

        fn default_version(&self, name: &str) -> Option<String> {
            self.defaults.get(name).cloned()
        }

        fn activate(&self, _name: &str, _version: &str) {}
    }

    /// Install `name`/`version` under the temp dir with a `lib/` load path,
    /// one source file, and a populated data directory.
    fn install(temp_dir: &Path, name: &str, version: &str) -> PackageRecord {
        let root = temp_dir.join(format!("{name}-{version}"));
        touch(&root, &format!("lib/{name}.rb"));
        touch(&root, "data/template.erb");
        PackageRecord {
            name: name.to_string(),
            version: version.to_string(),
            root: root.clone(),
            data_dir: Some(root.join("data")),
            load_paths: vec![root.join("lib")],
        }
    }

    fn provider_with(records: Vec<PackageRecord>, defaults: &[(&str, &str)]) -> PackageProvider {
        PackageProvider::new(
            Arc::new(StaticIndex::new(records, defaults)),
            Extensions::default(),
        )
    }

    #[test]
    fn path_globs_root_and_load_paths_of_selected_packages() {
        let temp_dir = TempDir::new().unwrap();
        let ansi = install(temp_dir.path(), "ansi", "1.4.0");
        let provider = provider_with(vec![ansi.clone()], &[("ansi", "1.4.0")]);

        let found = provider.path("lib/*", &SearchOptions::new());

        assert_eq!(
            found,
            vec![ansi.root.join("lib/ansi.rb").display().to_string()]
        );
    }

    #[test]
    fn from_selects_only_the_named_package() {
        let temp_dir = TempDir::new().unwrap();
        let ansi = install(temp_dir.path(), "ansi", "1.4.0");
        let facets = install(temp_dir.path(), "facets", "2.9.0");
        let provider = provider_with(
            vec![ansi, facets.clone()],
            &[("ansi", "1.4.0"), ("facets", "2.9.0")],
        );

        let found = provider.path("lib/*", &SearchOptions::new().from_package("facets"));

        assert_eq!(
            found,
            vec![facets.root.join("lib/facets.rb").display().to_string()]
        );
    }

    #[test]
    fn from_with_unknown_package_returns_empty() {
        let temp_dir = TempDir::new().unwrap();
        let ansi = install(temp_dir.path(), "ansi", "1.4.0");
        let provider = provider_with(vec![ansi], &[("ansi", "1.4.0")]);

        let found = provider.path("lib/*", &SearchOptions::new().from_package("nonexistent"));

        assert!(found.is_empty());
    }

    #[test]
    fn version_overrides_the_default_selection() {
        let temp_dir = TempDir::new().unwrap();
        let old = install(temp_dir.path(), "ansi", "1.3.0");
        let new = install(temp_dir.path(), "ansi", "1.4.0");
        let provider = provider_with(vec![old.clone(), new], &[("ansi", "1.4.0")]);

        let options = SearchOptions::new().from_package("ansi").version("1.3.0");
        let found = provider.path("lib/*", &options);

        assert_eq!(
            found,
            vec![old.root.join("lib/ansi.rb").display().to_string()]
        );
    }

    #[test]
    fn from_with_unknown_version_returns_empty() {
        let temp_dir = TempDir::new().unwrap();
        let ansi = install(temp_dir.path(), "ansi", "1.4.0");
        let provider = provider_with(vec![ansi], &[("ansi", "1.4.0")]);

        let options = SearchOptions::new().from_package("ansi").version("9.9.9");

        assert!(provider.path("lib/*", &options).is_empty());
    }

    #[test]
    fn unscoped_version_filters_every_package_to_that_exact_version() {
        let temp_dir = TempDir::new().unwrap();
        let old = install(temp_dir.path(), "ansi", "1.3.0");
        let new = install(temp_dir.path(), "ansi", "1.4.0");
        let facets = install(temp_dir.path(), "facets", "2.9.0");
        let provider = provider_with(
            vec![old.clone(), new, facets],
            &[("ansi", "1.4.0"), ("facets", "2.9.0")],
        );

        let found = provider.path("lib/*", &SearchOptions::new().version("1.3.0"));

        assert_eq!(
            found,
            vec![old.root.join("lib/ansi.rb").display().to_string()]
        );
    }

    #[test]
    fn unscoped_search_uses_each_packages_default_version() {
        let temp_dir = TempDir::new().unwrap();
        let old = install(temp_dir.path(), "ansi", "1.3.0");
        let new = install(temp_dir.path(), "ansi", "1.4.0");
        let provider = provider_with(vec![old, new.clone()], &[("ansi", "1.4.0")]);

        let found = provider.path("lib/*", &SearchOptions::new());

        assert_eq!(
            found,
            vec![new.root.join("lib/ansi.rb").display().to_string()]
        );
    }

    #[test]
    fn data_path_globs_data_dir_only() {
        let temp_dir = TempDir::new().unwrap();
        let ansi = install(temp_dir.path(), "ansi", "1.4.0");
        let provider = provider_with(vec![ansi.clone()], &[("ansi", "1.4.0")]);

        let found = provider.data_path("*.erb", &SearchOptions::new());

        assert_eq!(
            found,
            vec![ansi.root.join("data/template.erb").display().to_string()]
        );
    }

    #[test]
    fn data_path_skips_packages_without_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let mut ansi = install(temp_dir.path(), "ansi", "1.4.0");
        ansi.data_dir = None;
        let provider = provider_with(vec![ansi], &[("ansi", "1.4.0")]);

        assert!(provider.data_path("*.erb", &SearchOptions::new()).is_empty());
    }

    #[test]
    fn load_path_honors_relative_shaping() {
        let temp_dir = TempDir::new().unwrap();
        let ansi = install(temp_dir.path(), "ansi", "1.4.0");
        let provider = provider_with(vec![ansi], &[("ansi", "1.4.0")]);

        let found = provider.load_path("*", &SearchOptions::new().relative());

        assert_eq!(found, vec!["ansi.rb".to_string()]);
    }

    #[test]
    fn feature_defaults_to_relative_loadable_files() {
        let temp_dir = TempDir::new().unwrap();
        let ansi = install(temp_dir.path(), "ansi", "1.4.0");
        let provider = provider_with(vec![ansi], &[("ansi", "1.4.0")]);

        let found = provider.feature("ansi", &SearchOptions::new());

        assert_eq!(found, vec!["ansi.rb".to_string()]);
    }

    #[test]
    fn activate_fires_for_each_package_with_matches() {
        let temp_dir = TempDir::new().unwrap();
        let ansi = install(temp_dir.path(), "ansi", "1.4.0");

        let mut index = MockPackageIndex::new();
        index.expect_installed().return_const(vec![ansi]);
        index
            .expect_default_version()
            .with(eq("ansi"))
            .return_const(Some("1.4.0".to_string()));
        index
            .expect_activate()
            .with(eq("ansi"), eq("1.4.0"))
            .times(1)
            .return_const(());

        let provider = PackageProvider::new(Arc::new(index), Extensions::default());
        let found = provider.path("lib/*", &SearchOptions::new().activate());

        assert_eq!(found.len(), 1);
    }

    #[test]
    fn activate_does_not_fire_without_matches() {
        let temp_dir = TempDir::new().unwrap();
        let ansi = install(temp_dir.path(), "ansi", "1.4.0");

        let mut index = MockPackageIndex::new();
        index.expect_installed().return_const(vec![ansi]);
        index
            .expect_default_version()
            .return_const(Some("1.4.0".to_string()));
        index.expect_activate().times(0).return_const(());

        let provider = PackageProvider::new(Arc::new(index), Extensions::default());
        let found = provider.path("no/such/*", &SearchOptions::new().activate());

        assert!(found.is_empty());
    }
}
