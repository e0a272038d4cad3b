//! PyPI Simple API adapter
//!
//! Fetches package release catalogs from the JSON rendering of the
//! Simple API (PEP 691).
//! API endpoint: {index-url}/simple/{package}/

use crate::error::RegistryError;
use crate::registry::{HttpClient, PackageCatalog, PackageIndex};
use async_trait::async_trait;

/// Default base URL of the package index
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org";

/// Content type of the JSON Simple API
const SIMPLE_JSON_ACCEPT: &str = "application/vnd.pypi.simple.v1+json";

/// PyPI Simple API adapter
pub struct PyPiIndex {
    client: HttpClient,
    base_url: String,
}

impl PyPiIndex {
    /// Create a new adapter against the default index
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, DEFAULT_INDEX_URL)
    }

    /// Create a new adapter against a custom index URL
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client: client.with_accept(SIMPLE_JSON_ACCEPT),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/simple/{}/", self.base_url, package)
    }
}

#[async_trait]
impl PackageIndex for PyPiIndex {
    fn index_name(&self) -> &str {
        &self.base_url
    }

    async fn fetch_package(&self, package: &str) -> Result<PackageCatalog, RegistryError> {
        let url = self.build_url(package);
        self.client
            .get_json::<PackageCatalog>(&url, package, &self.base_url)
            .await
    }
}
