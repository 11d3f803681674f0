//! Lenient semver helpers for version selection

use semver::Version;

/// Parse a version string into a `semver::Version`, normalizing partial
/// versions and an optional `v` prefix.
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "1.2" -> Version(1, 2, 0)
/// - "v1.2.3" -> Version(1, 2, 3)
pub fn parse_version(version: &str) -> Option<Version> {
    let stripped = version.strip_prefix('v').unwrap_or(version);
    let parts: Vec<&str> = stripped.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => stripped.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Find the semantically maximum version from a list.
///
/// Invalid versions are skipped; the original string of the winner is
/// returned, prefix and all.
pub fn find_semantic_max<'a, I>(versions: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    versions
        .into_iter()
        .filter_map(|v| parse_version(v).map(|parsed| (v, parsed)))
        .max_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(original, _)| original.to_string())
}
