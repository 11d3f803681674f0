//! Search options shared by every provider

/// Options accepted by every search operation.
///
/// Unset flags are `false`; string selectors are `None` when absent. Which
/// options a provider honors depends on its backing system: `from`, `version`
/// and `activate` only make sense where packages exist, while `absolute` and
/// `relative` shape `load_path`/`feature` output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Restrict the search to one named package or library.
    ///
    /// Providers that search an unscoped path space (the site system) return
    /// empty results when this is set.
    pub from: Option<String>,
    /// Restrict the search to one version of the named package or library.
    pub version: Option<String>,
    /// Activate the package or library if it has matching files.
    pub activate: bool,
    /// Return filesystem-absolute paths.
    pub absolute: bool,
    /// Return paths relative to the providing search-path entry.
    pub relative: bool,
}

/// Authoritative output shape after normalizing `absolute`/`relative`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode {
    /// Filesystem-absolute paths.
    Absolute,
    /// Paths relative to the search-path entry that produced them.
    Relative,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope the search to one named package or library.
    pub fn from_package(mut self, name: impl Into<String>) -> Self {
        self.from = Some(name.into());
        self
    }

    /// Scope the search to one version of the named package or library.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Request activation of any package or library with matching files.
    pub fn activate(mut self) -> Self {
        self.activate = true;
        self
    }

    /// Request filesystem-absolute output paths.
    pub fn absolute(mut self) -> Self {
        self.absolute = true;
        self
    }

    /// Request output paths relative to the providing search-path entry.
    pub fn relative(mut self) -> Self {
        self.relative = true;
        self
    }

    /// Resolve the `absolute`/`relative` pair into one authoritative mode.
    ///
    /// `relative` wins when both flags are set. When neither is set, the
    /// caller-supplied default applies: `load_path` defaults to absolute,
    /// `feature` to relative.
    pub fn path_mode(&self, default: PathMode) -> PathMode {
        if self.relative {
            PathMode::Relative
        } else if self.absolute {
            PathMode::Absolute
        } else {
            default
        }
    }
}
