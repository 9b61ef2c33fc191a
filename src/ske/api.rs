//! Cluster endpoints

use super::types::{Cluster, ClusterPayload};
use crate::error::Result;
use crate::service::HasClient;
use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

/// Cluster operations
#[async_trait]
pub trait SkeApi {
    /// Fetch a cluster
    async fn get_cluster(&self, project_id: &str, name: &str) -> Result<Cluster>;

    /// Create a cluster or update an existing one; returns before reconciliation
    async fn create_or_update_cluster(
        &self,
        project_id: &str,
        name: &str,
        payload: &ClusterPayload,
    ) -> Result<Cluster>;

    /// Trigger cluster deletion; returns before the cluster is gone
    async fn delete_cluster(&self, project_id: &str, name: &str) -> Result<()>;
}

pub(super) fn cluster_path(project_id: &str, name: &str) -> String {
    format!("/v1/projects/{project_id}/clusters/{name}")
}

#[async_trait]
impl<T> SkeApi for T
where
    T: HasClient + Send + Sync + ?Sized,
{
    async fn get_cluster(&self, project_id: &str, name: &str) -> Result<Cluster> {
        self.client()
            .get_json(&cluster_path(project_id, name))
            .await
    }

    async fn create_or_update_cluster(
        &self,
        project_id: &str,
        name: &str,
        payload: &ClusterPayload,
    ) -> Result<Cluster> {
        debug!("Creating or updating cluster {} in project {}", name, project_id);
        self.client()
            .send_json(Method::PUT, &cluster_path(project_id, name), payload)
            .await
    }

    async fn delete_cluster(&self, project_id: &str, name: &str) -> Result<()> {
        debug!("Deleting cluster {} in project {}", name, project_id);
        self.client()
            .delete(&cluster_path(project_id, name))
            .await
    }
}
