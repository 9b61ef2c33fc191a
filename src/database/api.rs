//! Instance endpoints

use super::types::{CreateInstancePayload, CreateInstanceResponse, Instance, UpdateInstancePayload};
use crate::error::Result;
use crate::service::HasClient;
use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

/// Database instance operations
#[async_trait]
pub trait DatabaseApi {
    /// Fetch an instance
    async fn get_instance(&self, project_id: &str, instance_id: &str) -> Result<Instance>;

    /// Start provisioning an instance; returns the new instance ID
    async fn create_instance(
        &self,
        project_id: &str,
        payload: &CreateInstancePayload,
    ) -> Result<CreateInstanceResponse>;

    /// Start a partial update
    async fn partial_update_instance(
        &self,
        project_id: &str,
        instance_id: &str,
        payload: &UpdateInstancePayload,
    ) -> Result<()>;

    /// Start deprovisioning an instance
    async fn delete_instance(&self, project_id: &str, instance_id: &str) -> Result<()>;
}

fn instances_path(project_id: &str) -> String {
    format!("/v1/projects/{project_id}/instances")
}

pub(super) fn instance_path(project_id: &str, instance_id: &str) -> String {
    format!("/v1/projects/{project_id}/instances/{instance_id}")
}

#[async_trait]
impl<T> DatabaseApi for T
where
    T: HasClient + Send + Sync + ?Sized,
{
    async fn get_instance(&self, project_id: &str, instance_id: &str) -> Result<Instance> {
        self.client()
            .get_json(&instance_path(project_id, instance_id))
            .await
    }

    async fn create_instance(
        &self,
        project_id: &str,
        payload: &CreateInstancePayload,
    ) -> Result<CreateInstanceResponse> {
        debug!(
            "Creating instance {} in project {}",
            payload.instance_name, project_id
        );
        self.client()
            .send_json(Method::POST, &instances_path(project_id), payload)
            .await
    }

    async fn partial_update_instance(
        &self,
        project_id: &str,
        instance_id: &str,
        payload: &UpdateInstancePayload,
    ) -> Result<()> {
        debug!("Updating instance {} in project {}", instance_id, project_id);
        self.client()
            .send(
                Method::PATCH,
                &instance_path(project_id, instance_id),
                payload,
            )
            .await
    }

    async fn delete_instance(&self, project_id: &str, instance_id: &str) -> Result<()> {
        debug!("Deleting instance {} in project {}", instance_id, project_id);
        self.client()
            .delete(&instance_path(project_id, instance_id))
            .await
    }
}
