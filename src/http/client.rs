//! HTTP client with retry and rate limiting
//!
//! Shared transport for every resource API:
//! - Mutations and plain lookups retry transient failures with exponential
//!   backoff ([`Attempts::Configured`])
//! - Status checks made from poll functions are sent exactly once
//!   ([`Attempts::Once`]); the waiter owns the retry cadence there
//! - 404 and 410 surface as `Error::NotFound` and `Error::Gone`

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::error::{Error, Result};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry-after used when a 429 carries no usable header
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL that request paths are joined onto
    pub base_url: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retries after the first attempt, for retrying requests
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further retry
    pub initial_backoff: Duration,
    /// Upper bound for a single backoff delay
    pub max_backoff: Duration,
    /// Token bucket shared by every request of this client
    pub rate_limit: Option<RateLimiterConfig>,
    /// Headers sent with every request
    pub default_headers: HashMap<String, String>,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
            rate_limit: Some(RateLimiterConfig::default()),
            default_headers: HashMap::new(),
            user_agent: format!("cloud-sdk-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for [`HttpClientConfig`]
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set the first retry delay and the delay cap
    pub fn backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Add a header sent with every request
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Send a static bearer token with every request
    pub fn bearer_token(self, token: impl AsRef<str>) -> Self {
        let value = format!("Bearer {}", token.as_ref());
        self.header("Authorization", value)
    }

    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// How many times a request may be sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempts {
    /// First attempt plus up to `max_retries` retries
    Configured,
    /// A single attempt; every failure is returned as-is
    Once,
}

/// HTTP client with retry and rate limiting
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Client with the default configuration
    ///
    /// # Panics
    ///
    /// When the TLS backend cannot be initialized.
    pub fn new() -> Self {
        Self::with_config(HttpClientConfig::default())
    }

    /// Client with a custom configuration
    ///
    /// # Panics
    ///
    /// When the TLS backend cannot be initialized. Use
    /// [`HttpClient::try_with_config`] to get the error instead.
    pub fn with_config(config: HttpClientConfig) -> Self {
        Self::try_with_config(config).expect("Failed to build HTTP client")
    }

    /// Client with a custom configuration, reporting build failures
    pub fn try_with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;
        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// GET and decode JSON, retrying transient failures
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .request(Method::GET, path, None, Attempts::Configured)
            .await?;
        Ok(response.json().await?)
    }

    /// GET and decode JSON with exactly one attempt
    ///
    /// For status checks inside poll functions: one call is one request.
    pub async fn check_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path, None, Attempts::Once).await?;
        Ok(response.json().await?)
    }

    /// Send a serializable body and decode the JSON response
    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let response = self
            .request(method, path, Some(&body), Attempts::Configured)
            .await?;
        Ok(response.json().await?)
    }

    /// Send a serializable body, discarding the response body
    pub async fn send<B>(&self, method: Method, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.request(method, path, Some(&body), Attempts::Configured)
            .await?;
        Ok(())
    }

    /// DELETE, discarding the response body
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.request(Method::DELETE, path, None, Attempts::Configured)
            .await?;
        Ok(())
    }

    /// Send a request, retrying per `attempts`
    ///
    /// Only errors for which [`Error::is_retryable`] holds are retried. A
    /// 429 waits for its `retry-after`; anything else backs off
    /// exponentially.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        attempts: Attempts,
    ) -> Result<Response> {
        let url = self.build_url(path);
        let max_retries = match attempts {
            Attempts::Configured => self.config.max_retries,
            Attempts::Once => 0,
        };

        let mut retry = 0;
        loop {
            let err = match self.send_once(&method, &url, body).await {
                Ok(response) => return Ok(response),
                Err(err) => err,
            };
            if retry >= max_retries || !err.is_retryable() {
                return Err(err);
            }

            let delay = match &err {
                Error::RateLimited {
                    retry_after_seconds,
                } => Duration::from_secs(*retry_after_seconds),
                _ => self.backoff_delay(retry),
            };
            retry += 1;
            warn!(
                "{} {} failed: {}, retry {}/{} in {:?}",
                method, url, err, retry, max_retries, delay
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn send_once(&self, method: &Method, url: &str, body: Option<&Value>) -> Result<Response> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.acquire().await;
        }

        let mut req = self.client.request(method.clone(), url);
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: self.config.timeout.as_millis() as u64,
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();
        debug!("{} {} -> {}", method, url, status.as_u16());

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited {
                retry_after_seconds: retry_after(&response),
            });
        }
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }
        Ok(response)
    }

    /// Join a path onto the base URL; absolute URLs pass through
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            None => path.to_string(),
        }
    }

    /// Exponential delay before retry number `retry + 1`, capped
    pub(crate) fn backoff_delay(&self, retry: u32) -> Duration {
        self.config
            .initial_backoff
            .checked_mul(2u32.saturating_pow(retry))
            .map_or(self.config.max_backoff, |delay| delay.min(self.config.max_backoff))
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .field("max_retries", &self.config.max_retries)
            .field("rate_limited", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

fn retry_after(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
