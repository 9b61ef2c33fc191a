//! Kubernetes engine clusters
//!
//! Cluster create/update and delete are long-running: the PUT or DELETE
//! returns immediately and the cluster reconciles in the background.
//!
//! - Create/update is done once the aggregated state is healthy (or
//!   hibernated); an unhealthy cluster is a terminal failure
//! - Delete is done once the cluster lookup reports not found

mod api;
mod types;
mod wait;

pub use api::SkeApi;
pub use types::{
    Cluster, ClusterError, ClusterPayload, ClusterStatus, Kubernetes, STATE_CREATING,
    STATE_DELETING, STATE_HEALTHY, STATE_HIBERNATED, STATE_HIBERNATING, STATE_RECONCILING,
    STATE_UNHEALTHY, STATE_UNSPECIFIED, STATE_WAKINGUP,
};
pub use wait::{
    cluster_deleted_progress, cluster_ready_progress, create_or_update_cluster_wait_handler,
    delete_cluster_wait_handler, CLUSTER_WAIT_TIMEOUT,
};

#[cfg(test)]
mod tests;
