//! Scrape job schema types

use crate::types::{JsonValue, StringMap};
use serde::{Deserialize, Serialize};

/// A scrape job configured on a monitoring instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeJob {
    pub job_name: String,

    #[serde(default)]
    pub metrics_path: Option<String>,

    #[serde(default)]
    pub scrape_interval: Option<String>,

    #[serde(default)]
    pub static_configs: Vec<StaticConfig>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, JsonValue>,
}

/// Static scrape targets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticConfig {
    pub targets: Vec<String>,

    #[serde(default, skip_serializing_if = "StringMap::is_empty")]
    pub labels: StringMap,
}

/// Response of the scrape config listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapeConfigList {
    #[serde(default)]
    pub data: Vec<ScrapeJob>,
}

/// Response of a single scrape config lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapeJobResponse {
    pub data: ScrapeJob,
}

/// Body of a create request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeJobPayload {
    pub job_name: String,

    pub metrics_path: String,

    pub scrape_interval: String,

    pub static_configs: Vec<StaticConfig>,
}
