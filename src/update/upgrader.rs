//! Requirement upgrading
//!
//! The Upgrader takes requirement strings, resolves the newest eligible
//! release for each from the package index, and rewrites pinned
//! specifiers. Batches are processed concurrently while preserving
//! input order, and requirements that need no change come back
//! byte-identical.

use crate::domain::Requirement;
use crate::error::AppError;
use crate::registry::PackageIndex;
use crate::update::{select_latest, ReleaseFlags, UpdateFilter};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Default concurrency limit for index requests
const DEFAULT_CONCURRENCY: usize = 10;

/// Outcome of a batch upgrade
#[derive(Debug)]
pub struct BatchOutcome {
    /// Upgraded requirement strings, one per input, in input order
    pub requirements: Vec<String>,
    /// Failures, each tagged with the position of the failing input
    pub errors: Vec<BatchError>,
}

/// A single failed entry within a batch
#[derive(Debug)]
pub struct BatchError {
    /// Position of the failing requirement in the input slice
    pub index: usize,
    /// The requirement string as given
    pub input: String,
    /// What went wrong
    pub error: AppError,
}

/// Upgrades requirements against a package index
pub struct Upgrader {
    index: Arc<dyn PackageIndex>,
    filter: UpdateFilter,
    semaphore: Arc<Semaphore>,
}

impl Upgrader {
    /// Create a new upgrader with the default concurrency limit
    pub fn new(index: Arc<dyn PackageIndex>, filter: UpdateFilter) -> Self {
        Self {
            index,
            filter,
            semaphore: Arc::new(Semaphore::new(DEFAULT_CONCURRENCY)),
        }
    }

    /// Set the concurrency limit
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.semaphore = Arc::new(Semaphore::new(limit));
        self
    }

    /// Upgrade a single requirement string.
    ///
    /// Returns the input unchanged when the package is skipped, when no
    /// specifier matches the configured operators, or when the index
    /// offers nothing newer. The index is only queried when a rewrite
    /// is possible.
    pub async fn upgrade_requirement(&self, input: &str) -> Result<String, AppError> {
        let requirement = Requirement::parse(input)?;

        if self.filter.should_skip(&requirement.name) {
            return Ok(input.to_string());
        }
        if requirement.specifier.is_empty() || !self.filter.matches(&requirement.specifier) {
            return Ok(input.to_string());
        }

        let catalog = self.index.fetch_package(&requirement.name).await?;
        let flags = ReleaseFlags {
            dev: self.filter.allows_dev(&requirement.name),
            pre: self.filter.allows_pre(&requirement.name),
            post: self.filter.allows_post(&requirement.name),
        };
        let latest = match select_latest(&catalog, flags)? {
            Some(version) => version,
            None => return Ok(input.to_string()),
        };

        let pinned = requirement
            .specifier
            .pin(&latest, &self.filter.match_operators)?;
        if pinned == requirement.specifier {
            return Ok(input.to_string());
        }

        Ok(requirement.with_specifier(pinned).to_string())
    }

    /// Upgrade a batch of requirement strings concurrently.
    ///
    /// The output vector always has one entry per input, in input
    /// order. A failed entry keeps its original text and is recorded
    /// in the outcome's error list with its position.
    pub async fn upgrade_all(self: &Arc<Self>, inputs: &[String]) -> BatchOutcome {
        let mut tasks = JoinSet::new();

        for (index, input) in inputs.iter().enumerate() {
            let upgrader = Arc::clone(self);
            let input = input.clone();
            tasks.spawn(async move {
                let _permit = upgrader.semaphore.acquire().await.unwrap();
                let result = upgrader.upgrade_requirement(&input).await;
                (index, input, result)
            });
        }

        let mut requirements: Vec<String> = inputs.to_vec();
        let mut errors = Vec::new();

        while let Some(joined) = tasks.join_next().await {
            // Tasks never panic and are never aborted
            let (index, input, result) = joined.unwrap();
            match result {
                Ok(upgraded) => requirements[index] = upgraded,
                Err(error) => errors.push(BatchError {
                    index,
                    input,
                    error,
                }),
            }
        }
        errors.sort_by_key(|e| e.index);

        BatchOutcome {
            requirements,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Operator;
    use crate::error::RegistryError;
    use crate::registry::PackageCatalog;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct StaticIndex {
        catalogs: HashMap<String, PackageCatalog>,
    }

    impl StaticIndex {
        fn with_versions(package: &str, versions: &[&str]) -> Arc<Self> {
            let catalog = PackageCatalog {
                name: package.to_string(),
                versions: versions.iter().map(|v| v.to_string()).collect(),
                files: Vec::new(),
            };
            let mut catalogs = HashMap::new();
            catalogs.insert(package.to_string(), catalog);
            Arc::new(Self { catalogs })
        }
    }

    #[async_trait]
    impl PackageIndex for StaticIndex {
        fn index_name(&self) -> &str {
            "static"
        }

        async fn fetch_package(&self, package: &str) -> Result<PackageCatalog, RegistryError> {
            self.catalogs
                .get(package)
                .cloned()
                .ok_or_else(|| RegistryError::package_not_found(package, "static"))
        }
    }

    fn pin_filter() -> UpdateFilter {
        UpdateFilter::new().with_match_operators(vec![
            Operator::Equal,
            Operator::LessOrEqual,
            Operator::Compatible,
        ])
    }

    #[tokio::test]
    async fn test_upgrade_pinned_requirement() {
        let index = StaticIndex::with_versions("requests", &["2.31.0", "2.32.0"]);
        let upgrader = Upgrader::new(index, pin_filter());
        let result = upgrader.upgrade_requirement("requests==2.31.0").await;
        assert_eq!(result.unwrap(), "requests==2.32.0");
    }

    #[tokio::test]
    async fn test_no_matching_operator_returns_input_verbatim() {
        let index = StaticIndex::with_versions("requests", &["2.32.0"]);
        let upgrader = Upgrader::new(index, pin_filter());
        let result = upgrader.upgrade_requirement("requests >= 2.0").await;
        assert_eq!(result.unwrap(), "requests >= 2.0");
    }

    #[tokio::test]
    async fn test_skip_list_returns_input_verbatim() {
        let index = StaticIndex::with_versions("requests", &["99.0"]);
        let filter = pin_filter().with_skip(vec!["requests".to_string()]);
        let upgrader = Upgrader::new(index, filter);
        let result = upgrader.upgrade_requirement("requests==2.31.0").await;
        assert_eq!(result.unwrap(), "requests==2.31.0");
    }

    #[tokio::test]
    async fn test_bare_name_returns_input_verbatim() {
        let index = StaticIndex::with_versions("requests", &["99.0"]);
        let upgrader = Upgrader::new(index, pin_filter());
        let result = upgrader.upgrade_requirement("requests").await;
        assert_eq!(result.unwrap(), "requests");
    }

    #[tokio::test]
    async fn test_extras_and_marker_preserved() {
        let index = StaticIndex::with_versions("uvicorn", &["0.30.0", "0.31.0"]);
        let upgrader = Upgrader::new(index, pin_filter());
        let result = upgrader
            .upgrade_requirement("uvicorn[standard]==0.30.0; python_version >= \"3.9\"")
            .await;
        assert_eq!(
            result.unwrap(),
            "uvicorn[standard]==0.31.0; python_version >= \"3.9\""
        );
    }

    #[tokio::test]
    async fn test_unknown_package_is_an_error() {
        let index = StaticIndex::with_versions("requests", &["1.0"]);
        let upgrader = Upgrader::new(index, pin_filter());
        let result = upgrader.upgrade_requirement("no-such-package==1.0").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_batch_preserves_order_and_isolates_failures() {
        let index = StaticIndex::with_versions("requests", &["2.32.0"]);
        let upgrader = Arc::new(Upgrader::new(index, pin_filter()));
        let inputs = vec![
            "requests==2.31.0".to_string(),
            "missing==1.0".to_string(),
            "requests>=1.0".to_string(),
        ];
        let outcome = upgrader.upgrade_all(&inputs).await;
        assert_eq!(
            outcome.requirements,
            vec![
                "requests==2.32.0".to_string(),
                "missing==1.0".to_string(),
                "requests>=1.0".to_string(),
            ]
        );
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].index, 1);
        assert_eq!(outcome.errors[0].input, "missing==1.0");
    }
}
