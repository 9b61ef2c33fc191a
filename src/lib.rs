// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Cloud SDK
//!
//! Async Rust client for cloud resource APIs: Kubernetes clusters, managed
//! database instances and observability scrape jobs.
//!
//! ## Features
//!
//! - **One Transport**: Retrying, rate-limited HTTP client shared by all APIs
//! - **Structured Errors**: 404/410 surface as `NotFound`/`Gone`, never as text
//! - **Waiters**: Every long-running mutation has a wait handler that polls
//!   until the resource reaches a terminal state
//! - **YAML/Env Config**: Region, token, endpoints and wait tuning
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cloud_sdk::ske::{delete_cluster_wait_handler, SkeApi};
//! use cloud_sdk::{SdkConfig, Service, ServiceKind};
//!
//! #[tokio::main]
//! async fn main() -> cloud_sdk::Result<()> {
//!     let config = SdkConfig::from_env()?;
//!     let ske = Service::from_config(ServiceKind::Ske, &config)?;
//!
//!     // Returns as soon as the API accepted the request
//!     ske.delete_cluster("project-id", "prod").await?;
//!
//!     // Optionally block until the cluster is gone
//!     delete_cluster_wait_handler(ske.clone(), "project-id", "prod")
//!         .wait()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │          Resource APIs (ske, database, observability)        │
//! │   mutate() → returns immediately   *_wait_handler() → Waiter │
//! └──────────────────────────────────────────────────────────────┘
//!                 │                                │
//! ┌───────────────┴──────────────┐  ┌──────────────┴─────────────┐
//! │ Service / HasClient          │  │ Waiter                     │
//! │ HttpClient: retry, backoff,  │  │ poll fn, timeout, throttle │
//! │ rate limit, NotFound/Gone    │  │ Pending / Done / Err       │
//! └──────────────────────────────┘  └────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the SDK
pub mod error;

/// Common types and type aliases
pub mod types;

/// SDK configuration
pub mod config;

/// HTTP transport with retry and rate limiting
pub mod http;

/// Shared client holder
pub mod service;

/// Long-running operation waiter
pub mod wait;

/// Kubernetes engine clusters
pub mod ske;

/// Managed database instances
pub mod database;

/// Observability scrape jobs
pub mod observability;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::SdkConfig;
pub use error::{Error, Result};
pub use service::{HasClient, Service};
pub use types::ServiceKind;
pub use wait::{Progress, Waiter};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
