//! Shared client holder for resource APIs
//!
//! Every resource API is implemented for any type that can hand out an
//! [`HttpClient`], so one [`Service`] value (or a caller's own wrapper)
//! serves all of them.

use crate::config::SdkConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::types::ServiceKind;
use crate::wait::{WaitConfig, Waiter};
use std::sync::Arc;

/// Capability to reach a remote API
pub trait HasClient {
    /// Transport used for requests
    fn client(&self) -> &HttpClient;

    /// Waiter overrides to apply to every wait handler built on this value
    fn wait_config(&self) -> Option<&WaitConfig> {
        None
    }
}

/// Cheaply clonable handle to one service endpoint
#[derive(Debug, Clone)]
pub struct Service {
    kind: ServiceKind,
    client: Arc<HttpClient>,
    wait: WaitConfig,
}

impl Service {
    /// Wrap an existing client
    pub fn new(kind: ServiceKind, client: HttpClient) -> Self {
        Self {
            kind,
            client: Arc::new(client),
            wait: WaitConfig::default(),
        }
    }

    /// Build a client for `kind` from the SDK configuration
    pub fn from_config(kind: ServiceKind, config: &SdkConfig) -> Result<Self> {
        let client = HttpClient::try_with_config(config.http_client_config(kind))?;
        Ok(Self {
            kind,
            client: Arc::new(client),
            wait: config.wait.clone(),
        })
    }

    /// Replace the waiter overrides
    #[must_use]
    pub fn with_wait_config(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    /// Which API this service talks to
    pub fn kind(&self) -> ServiceKind {
        self.kind
    }
}

impl HasClient for Service {
    fn client(&self) -> &HttpClient {
        &self.client
    }

    fn wait_config(&self) -> Option<&WaitConfig> {
        Some(&self.wait)
    }
}

impl<T: HasClient + ?Sized> HasClient for Arc<T> {
    fn client(&self) -> &HttpClient {
        (**self).client()
    }

    fn wait_config(&self) -> Option<&WaitConfig> {
        (**self).wait_config()
    }
}

/// Apply the API's waiter overrides, if any
pub(crate) fn configure_waiter<A, T>(api: &A, waiter: &mut Waiter<T>)
where
    A: HasClient + ?Sized,
{
    if let Some(config) = api.wait_config() {
        waiter.apply_config(config);
    }
}
