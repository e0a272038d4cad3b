//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout, User-Agent, and Accept header
//! - Exponential backoff retry logic (max 3 retries)
//! - Rate limit error handling

use crate::error::RegistryError;
use reqwest::Client;
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("uppd/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// HTTP client wrapper with retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    accept: Option<String>,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| RegistryError::NetworkError {
                package: String::new(),
                registry: "HTTP client".to_string(),
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            accept: None,
            max_retries: MAX_RETRIES,
        })
    }

    /// Set the Accept header sent with every request
    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Perform a GET request with retry logic and error context
    pub async fn get_with_context(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<reqwest::Response, RegistryError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            let mut request = self.client.get(url);
            if let Some(accept) = &self.accept {
                request = request.header(reqwest::header::ACCEPT, accept);
            }

            match request.send().await {
                Ok(response) => {
                    // Check for rate limiting
                    if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(RegistryError::RateLimitExceeded {
                            registry: registry.to_string(),
                        });

                        if attempt < self.max_retries {
                            tokio::time::sleep(Duration::from_millis(delay)).await;
                            delay *= 2;
                            continue;
                        }
                    }

                    // Check for 404 Not Found
                    if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(RegistryError::PackageNotFound {
                            package: package.to_string(),
                            registry: registry.to_string(),
                        });
                    }

                    // Check for other errors
                    if !response.status().is_success() {
                        let status = response.status();
                        return Err(RegistryError::NetworkError {
                            package: package.to_string(),
                            registry: registry.to_string(),
                            message: format!("HTTP {}", status),
                        });
                    }

                    return Ok(response);
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_error = Some(RegistryError::Timeout {
                            package: package.to_string(),
                            registry: registry.to_string(),
                        });
                    } else {
                        last_error = Some(RegistryError::NetworkError {
                            package: package.to_string(),
                            registry: registry.to_string(),
                            message: e.to_string(),
                        });
                    }

                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        delay *= 2;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| RegistryError::NetworkError {
            package: package.to_string(),
            registry: registry.to_string(),
            message: "unknown error".to_string(),
        }))
    }

    /// Perform a GET request and parse the JSON response
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        let response = self.get_with_context(url, package, registry).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| RegistryError::InvalidResponse {
                package: package.to_string(),
                registry: registry.to_string(),
                message: format!("failed to parse JSON: {}", e),
            })
    }
}
