//! Common types used throughout the SDK
//!
//! This module contains shared type definitions and type aliases
//! used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Service Kind
// ============================================================================

/// Remote API a client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    /// Kubernetes engine (clusters)
    Ske,
    /// Managed database instances
    Database,
    /// Observability / monitoring (scrape jobs)
    Observability,
}

impl ServiceKind {
    /// Short name used in endpoint templates and environment variables
    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Ske => "ske",
            ServiceKind::Database => "database",
            ServiceKind::Observability => "observability",
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
