//! SDK configuration
//!
//! Region, token, endpoint overrides and transport/wait tuning. Loaded from
//! YAML and optionally overridden from the environment:
//!
//! ```yaml
//! region: eu01
//! token: "..."
//! endpoints:
//!   ske: https://ske.internal.example
//! http:
//!   timeout_secs: 30
//!   max_retries: 3
//! wait:
//!   throttle_ms: 2000
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::ServiceKind;
use crate::wait::WaitConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the bearer token
pub const ENV_TOKEN: &str = "CLOUD_SDK_TOKEN";

/// Environment variable holding the region
pub const ENV_REGION: &str = "CLOUD_SDK_REGION";

/// Region used when none is configured
pub const DEFAULT_REGION: &str = "eu01";

/// Default endpoint template, `{service}` and `{region}` are substituted
pub const DEFAULT_ENDPOINT_TEMPLATE: &str = "https://{service}.api.{region}.example.cloud";

/// Cap for a single retry delay
const MAX_BACKOFF: Duration = Duration::from_secs(60);

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete SDK configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Static bearer token sent with every request
    #[serde(default)]
    pub token: Option<String>,

    /// Region used to build default endpoints
    #[serde(default = "default_region")]
    pub region: String,

    /// Per-service base URL overrides
    #[serde(default)]
    pub endpoints: HashMap<ServiceKind, String>,

    /// Transport settings
    #[serde(default)]
    pub http: HttpSettings,

    /// Waiter overrides applied by every wait handler
    #[serde(default)]
    pub wait: WaitConfig,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            token: None,
            region: default_region(),
            endpoints: HashMap::new(),
            http: HttpSettings::default(),
            wait: WaitConfig::default(),
        }
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// Transport settings shared by all services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries for retryable failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// First retry delay in milliseconds, doubled per retry
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Client-side rate limit, `null` disables it
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    100
}

fn default_rate_limit() -> Option<RateLimiterConfig> {
    Some(RateLimiterConfig::default())
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            rate_limit: default_rate_limit(),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl SdkConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Defaults overridden from the process environment
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Override fields from a variable lookup
    ///
    /// Recognizes `CLOUD_SDK_TOKEN`, `CLOUD_SDK_REGION` and
    /// `CLOUD_SDK_<SERVICE>_ENDPOINT`.
    pub fn apply_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(ENV_TOKEN) {
            self.token = Some(token);
        }
        if let Some(region) = lookup(ENV_REGION) {
            self.region = region;
        }
        for kind in [
            ServiceKind::Ske,
            ServiceKind::Database,
            ServiceKind::Observability,
        ] {
            let key = format!("CLOUD_SDK_{}_ENDPOINT", kind.name().to_uppercase());
            if let Some(url) = lookup(&key) {
                self.endpoints.insert(kind, url);
            }
        }
        self.validate()
    }

    /// Check field values
    pub fn validate(&self) -> Result<()> {
        if self.region.trim().is_empty() {
            return Err(Error::invalid_value("region", "must not be empty"));
        }
        for (kind, url) in &self.endpoints {
            url::Url::parse(url)
                .map_err(|e| Error::invalid_value(format!("endpoints.{kind}"), e.to_string()))?;
        }
        if self.token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(Error::invalid_value("token", "must not be empty"));
        }
        Ok(())
    }

    /// Base URL for a service
    pub fn endpoint_for(&self, kind: ServiceKind) -> String {
        self.endpoints.get(&kind).cloned().unwrap_or_else(|| {
            DEFAULT_ENDPOINT_TEMPLATE
                .replace("{service}", kind.name())
                .replace("{region}", &self.region)
        })
    }

    /// Transport configuration for a service
    pub fn http_client_config(&self, kind: ServiceKind) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.endpoint_for(kind))
            .timeout(Duration::from_secs(self.http.timeout_secs))
            .max_retries(self.http.max_retries)
            .backoff(
                Duration::from_millis(self.http.initial_backoff_ms),
                MAX_BACKOFF,
            );

        builder = match &self.http.rate_limit {
            Some(limit) => builder.rate_limit(limit.clone()),
            None => builder.no_rate_limit(),
        };

        if let Some(token) = &self.token {
            builder = builder.bearer_token(token);
        }

        builder.build()
    }
}
