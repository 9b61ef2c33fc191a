//! Scrape config endpoints

use super::types::{ScrapeConfigList, ScrapeJob, ScrapeJobPayload, ScrapeJobResponse};
use crate::error::Result;
use crate::service::HasClient;
use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

/// Scrape job operations on a monitoring instance
#[async_trait]
pub trait ObservabilityApi {
    /// List the scrape jobs of an instance
    async fn list_scrape_configs(
        &self,
        project_id: &str,
        instance_id: &str,
    ) -> Result<ScrapeConfigList>;

    /// Fetch one scrape job
    async fn get_scrape_config(
        &self,
        project_id: &str,
        instance_id: &str,
        job_name: &str,
    ) -> Result<ScrapeJob>;

    /// Submit a new scrape job; returns before it is active
    async fn create_scrape_config(
        &self,
        project_id: &str,
        instance_id: &str,
        payload: &ScrapeJobPayload,
    ) -> Result<()>;

    /// Remove a scrape job; returns before it is gone
    async fn delete_scrape_config(
        &self,
        project_id: &str,
        instance_id: &str,
        job_name: &str,
    ) -> Result<()>;
}

fn scrape_configs_path(project_id: &str, instance_id: &str) -> String {
    format!("/v1/projects/{project_id}/instances/{instance_id}/scrapeconfigs")
}

pub(super) fn scrape_config_path(project_id: &str, instance_id: &str, job_name: &str) -> String {
    format!(
        "{}/{job_name}",
        scrape_configs_path(project_id, instance_id)
    )
}

#[async_trait]
impl<T> ObservabilityApi for T
where
    T: HasClient + Send + Sync + ?Sized,
{
    async fn list_scrape_configs(
        &self,
        project_id: &str,
        instance_id: &str,
    ) -> Result<ScrapeConfigList> {
        self.client()
            .get_json(&scrape_configs_path(project_id, instance_id))
            .await
    }

    async fn get_scrape_config(
        &self,
        project_id: &str,
        instance_id: &str,
        job_name: &str,
    ) -> Result<ScrapeJob> {
        let response: ScrapeJobResponse = self
            .client()
            .get_json(&scrape_config_path(project_id, instance_id, job_name))
            .await?;
        Ok(response.data)
    }

    async fn create_scrape_config(
        &self,
        project_id: &str,
        instance_id: &str,
        payload: &ScrapeJobPayload,
    ) -> Result<()> {
        debug!(
            "Creating scrape job {} on instance {}",
            payload.job_name, instance_id
        );
        self.client()
            .send(
                Method::POST,
                &scrape_configs_path(project_id, instance_id),
                payload,
            )
            .await
    }

    async fn delete_scrape_config(
        &self,
        project_id: &str,
        instance_id: &str,
        job_name: &str,
    ) -> Result<()> {
        debug!("Deleting scrape job {} on instance {}", job_name, instance_id);
        self.client()
            .delete(&scrape_config_path(project_id, instance_id, job_name))
            .await
    }
}
