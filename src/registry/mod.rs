//! Package index access
//!
//! This module provides:
//! - The PackageIndex trait the upgrader resolves against
//! - Catalog types mirroring the PyPI Simple API (PEP 691) shape
//! - An HTTP client shared foundation with retry logic

mod client;
mod pypi;

pub use client::HttpClient;
pub use pypi::PyPiIndex;

use crate::error::RegistryError;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

/// One published artifact of a release
#[derive(Debug, Clone, Deserialize)]
pub struct FileEntry {
    /// Artifact filename; contains the version it belongs to
    pub filename: String,
    /// Whether the artifact has been yanked from default resolution
    #[serde(default, deserialize_with = "yanked_flag")]
    pub yanked: bool,
}

/// The published releases of one package
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageCatalog {
    /// Package name as reported by the index
    #[serde(default)]
    pub name: String,
    /// Version identifiers in index order (not pre-sorted)
    #[serde(default)]
    pub versions: Vec<String>,
    /// Published artifacts across all releases
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

// PEP 691 encodes yanked as false or a non-empty reason string
fn yanked_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(reason) => !reason.is_empty(),
        _ => false,
    })
}

/// Trait for package index adapters
#[async_trait]
pub trait PackageIndex: Send + Sync {
    /// Get the index name (for error context)
    fn index_name(&self) -> &str;

    /// Fetch the release catalog for a package
    async fn fetch_package(&self, package: &str) -> Result<PackageCatalog, RegistryError>;
}
