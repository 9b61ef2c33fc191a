//! Long-running operation waiter
//!
//! Turns a fire-and-forget API call into a "wait until terminal state"
//! operation by repeatedly invoking a resource-specific poll function.
//!
//! # Overview
//!
//! A resource operation (create cluster, delete instance, ...) issues its
//! mutating request right away and hands back a [`Waiter`] bound to the
//! resource identity. Calling [`Waiter::wait`] is optional:
//!
//! ```rust,ignore
//! use cloud_sdk::ske::{create_or_update_cluster_wait_handler, SkeApi};
//!
//! service.create_or_update_cluster("project-id", "prod", &payload).await?;
//!
//! let cluster = create_or_update_cluster_wait_handler(service.clone(), "project-id", "prod")
//!     .set_timeout(Duration::from_secs(30 * 60))
//!     .wait()
//!     .await?;
//! ```
//!
//! What counts as done, failed or still in progress is decided entirely by
//! the poll function. The waiter only owns timeout and throttle handling.

mod waiter;

pub use waiter::{Progress, WaitConfig, Waiter, DEFAULT_THROTTLE, DEFAULT_TIMEOUT};
