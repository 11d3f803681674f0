use serde::Deserialize;
use std::path::PathBuf;

/// Extensions recognized as loadable code, in preference order: source,
/// interpreter bytecode, native extension.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".rb", ".rbx", ".so"];

/// Host configuration for a [`Finder`](crate::Finder).
///
/// The set of active search systems is not configured here: it follows from
/// which backing-store handles the host passes at construction time.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FinderConfig {
    pub site: SiteConfig,
    /// Extensions recognized as loadable code for `feature` searches.
    pub extensions: Extensions,
}

/// Site-system configuration: the runtime search path and the fixed system
/// data directory.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    /// Ordered list of directories the host runtime scans for loadable code.
    /// Duplicates are tolerated and skipped during searches.
    pub load_path: Vec<PathBuf>,
    /// Fixed directory for non-code resource files, searched independently
    /// of the load path.
    pub data_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            load_path: Vec::new(),
            data_dir: default_data_dir(),
        }
    }
}

/// Loadable-code extension list, each entry carrying its leading dot.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Extensions(pub Vec<String>);

impl Default for Extensions {
    fn default() -> Self {
        Self(DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect())
    }
}

impl Extensions {
    /// Whether `pattern` already ends in a recognized loadable-code extension.
    pub fn matches(&self, pattern: &str) -> bool {
        self.0.iter().any(|ext| pattern.ends_with(ext.as_str()))
    }

    /// Patterns to scan for a `feature` query: the pattern as-is when it
    /// already carries a recognized extension, otherwise one pattern per
    /// extension.
    pub fn feature_patterns(&self, pattern: &str) -> Vec<String> {
        if self.matches(pattern) {
            vec![pattern.to_string()]
        } else {
            self.0.iter().map(|ext| format!("{pattern}{ext}")).collect()
        }
    }
}

/// Returns the default system data directory.
/// Uses $XDG_DATA_HOME if set, otherwise falls back to ~/.local/share,
/// or the current directory if neither is available.
fn default_data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."))
}
