//! Cluster schema types
//!
//! Only the fields the SDK reads are typed; everything else the API returns
//! is kept in `extra` so nothing is lost on a read-modify-write.

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

// ============================================================================
// Aggregated States
// ============================================================================

pub const STATE_UNSPECIFIED: &str = "STATE_UNSPECIFIED";
pub const STATE_HEALTHY: &str = "STATE_HEALTHY";
pub const STATE_CREATING: &str = "STATE_CREATING";
pub const STATE_DELETING: &str = "STATE_DELETING";
pub const STATE_UNHEALTHY: &str = "STATE_UNHEALTHY";
pub const STATE_RECONCILING: &str = "STATE_RECONCILING";
pub const STATE_HIBERNATED: &str = "STATE_HIBERNATED";
pub const STATE_HIBERNATING: &str = "STATE_HIBERNATING";
pub const STATE_WAKINGUP: &str = "STATE_WAKINGUP";

// ============================================================================
// Cluster
// ============================================================================

/// A Kubernetes cluster as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub kubernetes: Option<Kubernetes>,

    #[serde(default)]
    pub status: Option<ClusterStatus>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, JsonValue>,
}

impl Cluster {
    /// Aggregated state, if reported
    pub fn aggregated_state(&self) -> Option<&str> {
        self.status.as_ref()?.aggregated.as_deref()
    }
}

/// Kubernetes version settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kubernetes {
    pub version: String,
}

/// Reconciliation status of a cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStatus {
    /// One of the `STATE_*` constants
    #[serde(default)]
    pub aggregated: Option<String>,

    #[serde(default)]
    pub errors: Vec<ClusterError>,

    #[serde(default)]
    pub hibernated: Option<bool>,
}

/// Error reported by cluster reconciliation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterError {
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

impl std::fmt::Display for ClusterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => write!(f, "{code}: {message}"),
            (Some(code), None) => f.write_str(code),
            (None, Some(message)) => f.write_str(message),
            (None, None) => f.write_str("unknown error"),
        }
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// Body of a create-or-update request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterPayload {
    pub kubernetes: Kubernetes,

    #[serde(default)]
    pub nodepools: Vec<JsonValue>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, JsonValue>,
}
