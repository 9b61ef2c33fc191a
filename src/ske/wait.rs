//! Cluster wait handlers

use super::api::cluster_path;
use super::types::{Cluster, STATE_HEALTHY, STATE_HIBERNATED, STATE_UNHEALTHY};
use crate::error::{Error, Result};
use crate::service::{configure_waiter, HasClient};
use crate::wait::{Progress, Waiter};
use std::sync::Arc;
use std::time::Duration;

/// Cluster reconciliation routinely takes tens of minutes
pub const CLUSTER_WAIT_TIMEOUT: Duration = Duration::from_secs(45 * 60);

/// Classify a cluster lookup while waiting for create/update
pub fn cluster_ready_progress(name: &str, lookup: Result<Cluster>) -> Result<Progress<Cluster>> {
    let cluster = lookup?;
    match cluster.aggregated_state() {
        Some(STATE_HEALTHY | STATE_HIBERNATED) => Ok(Progress::Done(cluster)),
        Some(STATE_UNHEALTHY) => {
            let reason = cluster
                .status
                .as_ref()
                .filter(|status| !status.errors.is_empty())
                .map_or_else(
                    || "cluster is unhealthy".to_string(),
                    |status| {
                        status
                            .errors
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join("; ")
                    },
                );
            Err(Error::resource_failed("cluster", name, reason))
        }
        _ => Ok(Progress::Pending),
    }
}

/// Classify a cluster lookup while waiting for deletion
pub fn cluster_deleted_progress(lookup: Result<Cluster>) -> Result<Progress<()>> {
    match lookup {
        Ok(_) => Ok(Progress::Pending),
        Err(e) if e.is_not_found() => Ok(Progress::Done(())),
        Err(e) => Err(e),
    }
}

/// Wait for a created or updated cluster to become healthy
///
/// Each poll is a single GET of the cluster.
pub fn create_or_update_cluster_wait_handler<A>(
    api: A,
    project_id: impl Into<String>,
    name: impl Into<String>,
) -> Waiter<Cluster>
where
    A: HasClient + Send + Sync + 'static,
{
    let project_id: String = project_id.into();
    let name: String = name.into();
    let path = cluster_path(&project_id, &name);
    let api = Arc::new(api);

    let mut waiter = Waiter::new({
        let api = api.clone();
        move || {
            let api = api.clone();
            let path = path.clone();
            let name = name.clone();
            async move {
                let lookup = api.client().check_json::<Cluster>(&path).await;
                cluster_ready_progress(&name, lookup)
            }
        }
    });
    waiter.set_timeout(CLUSTER_WAIT_TIMEOUT);
    configure_waiter(&api, &mut waiter);
    waiter
}

/// Wait for a deleted cluster to disappear
pub fn delete_cluster_wait_handler<A>(
    api: A,
    project_id: impl Into<String>,
    name: impl Into<String>,
) -> Waiter<()>
where
    A: HasClient + Send + Sync + 'static,
{
    let project_id: String = project_id.into();
    let name: String = name.into();
    let path = cluster_path(&project_id, &name);
    let api = Arc::new(api);

    let mut waiter = Waiter::new({
        let api = api.clone();
        move || {
            let api = api.clone();
            let path = path.clone();
            async move { cluster_deleted_progress(api.client().check_json::<Cluster>(&path).await) }
        }
    });
    waiter.set_timeout(CLUSTER_WAIT_TIMEOUT);
    configure_waiter(&api, &mut waiter);
    waiter
}
