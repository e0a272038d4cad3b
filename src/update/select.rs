//! Latest-release selection
//!
//! Given a package catalog and per-package release flags, pick the
//! newest version a requirement may be pinned to. Versions are ordered
//! by PEP 440 semantics, dev/pre/post releases are skipped unless
//! allowed, and fully yanked releases are never selected.

use crate::domain::Version;
use crate::error::ParseError;
use crate::registry::PackageCatalog;

/// Which release kinds a package may resolve to
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseFlags {
    pub dev: bool,
    pub pre: bool,
    pub post: bool,
}

/// Select the newest eligible version from a catalog.
///
/// Returns the version string exactly as published by the index so
/// that pinned specifiers match the release identifiers users see.
/// Returns `Ok(None)` when no version survives filtering.
pub fn select_latest(
    catalog: &PackageCatalog,
    flags: ReleaseFlags,
) -> Result<Option<String>, ParseError> {
    let mut candidates: Vec<(Version, &String)> = Vec::with_capacity(catalog.versions.len());
    for raw in &catalog.versions {
        candidates.push((Version::parse(raw)?, raw));
    }
    candidates.sort_by(|a, b| b.0.cmp(&a.0));

    for (version, raw) in candidates {
        if !flags.dev && version.is_devrelease() {
            continue;
        }
        if !flags.pre && version.is_prerelease() {
            continue;
        }
        if !flags.post && version.is_postrelease() {
            continue;
        }
        if is_yanked(catalog, raw) {
            continue;
        }
        return Ok(Some(raw.clone()));
    }
    Ok(None)
}

/// A version is yanked when at least one distribution file carries it
/// and every such file is marked yanked. Versions without any matching
/// file stay eligible.
fn is_yanked(catalog: &PackageCatalog, version: &str) -> bool {
    let mut matched = false;
    for file in &catalog.files {
        if file.filename.contains(version) {
            if !file.yanked {
                return false;
            }
            matched = true;
        }
    }
    matched
}
