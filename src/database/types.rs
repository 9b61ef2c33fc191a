//! Instance schema types

use crate::types::{JsonValue, StringMap};
use serde::{Deserialize, Serialize};

pub const OPERATION_TYPE_CREATE: &str = "create";
pub const OPERATION_TYPE_UPDATE: &str = "update";
pub const OPERATION_TYPE_DELETE: &str = "delete";

pub const OPERATION_STATE_IN_PROGRESS: &str = "in progress";
pub const OPERATION_STATE_SUCCEEDED: &str = "succeeded";
pub const OPERATION_STATE_FAILED: &str = "failed";

/// A managed database instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    #[serde(default)]
    pub instance_id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub plan_id: Option<String>,

    #[serde(default)]
    pub dashboard_url: Option<String>,

    #[serde(default)]
    pub last_operation: Option<LastOperation>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, JsonValue>,
}

/// Most recent mutation applied to an instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastOperation {
    /// One of the `OPERATION_TYPE_*` constants
    #[serde(rename = "type")]
    pub kind: String,

    /// One of the `OPERATION_STATE_*` constants
    pub state: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl LastOperation {
    /// Failure reason for display
    pub fn reason(&self) -> String {
        self.description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| format!("{} operation failed", self.kind))
    }
}

/// Body of a create request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstancePayload {
    pub instance_name: String,

    pub plan_id: String,

    #[serde(default, skip_serializing_if = "StringMap::is_empty")]
    pub parameters: StringMap,
}

/// Response of a create request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstanceResponse {
    pub instance_id: String,
}

/// Body of a partial update request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInstancePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,

    #[serde(default, skip_serializing_if = "StringMap::is_empty")]
    pub parameters: StringMap,
}
