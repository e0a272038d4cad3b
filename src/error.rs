//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues with pyproject.toml reading/writing
//! - RegistryError: Issues with package index communication
//! - ParseError: Malformed requirement or version text
//! - ConfigError: Issues with CLI configuration

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Package index related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Requirement/version parsing errors
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// The [project] table is missing
    #[error("no [project] section in {path}")]
    MissingProjectTable { path: PathBuf },

    /// A rewritten requirement could not be placed back into the document
    #[error("could not locate requirement '{requirement}' in {path}")]
    RequirementNotFound { path: PathBuf, requirement: String },
}

/// Errors related to package index communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in the index
    #[error("package '{package}' not found in {registry}")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry}")]
    RateLimitExceeded { registry: String },

    /// Invalid response from the index
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },
}

/// Errors raised while parsing requirement or version text
#[derive(Error, Debug)]
pub enum ParseError {
    /// The requirement text does not conform to PEP 508
    #[error("malformed requirement '{input}': {message}")]
    MalformedRequirement { input: String, message: String },

    /// The version text does not conform to PEP 440
    #[error("malformed version '{input}'")]
    MalformedVersion { input: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// More output files than input files
    #[error("more output files ({outfiles}) than input files ({infiles})")]
    TooManyOutputFiles { outfiles: usize, infiles: usize },

    /// Invalid index URL
    #[error("invalid index url '{url}': {message}")]
    InvalidIndexUrl { url: String, message: String },
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }
}

impl ParseError {
    /// Creates a new MalformedRequirement error
    pub fn malformed_requirement(input: impl Into<String>, message: impl Into<String>) -> Self {
        ParseError::MalformedRequirement {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Creates a new MalformedVersion error
    pub fn malformed_version(input: impl Into<String>) -> Self {
        ParseError::MalformedVersion {
            input: input.into(),
        }
    }
}
