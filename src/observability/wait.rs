//! Scrape job wait handlers

use super::api::scrape_config_path;
use super::types::{ScrapeJob, ScrapeJobResponse};
use crate::error::Result;
use crate::service::{configure_waiter, HasClient};
use crate::wait::{Progress, Waiter};
use std::sync::Arc;
use std::time::Duration;

/// Scrape job propagation usually completes within minutes
pub const SCRAPE_CONFIG_WAIT_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Classify a job lookup while waiting for creation
///
/// Not found means the job has not propagated yet.
pub fn job_created_progress(lookup: Result<ScrapeJob>) -> Result<Progress<ScrapeJob>> {
    match lookup {
        Ok(job) => Ok(Progress::Done(job)),
        Err(e) if e.is_not_found() => Ok(Progress::Pending),
        Err(e) => Err(e),
    }
}

/// Classify a job lookup while waiting for deletion
pub fn job_deleted_progress(lookup: Result<ScrapeJob>) -> Result<Progress<()>> {
    match lookup {
        Ok(_) => Ok(Progress::Pending),
        Err(e) if e.is_not_found() => Ok(Progress::Done(())),
        Err(e) => Err(e),
    }
}

fn scrape_config_waiter<A, T>(
    api: A,
    path: String,
    classify: fn(Result<ScrapeJob>) -> Result<Progress<T>>,
) -> Waiter<T>
where
    A: HasClient + Send + Sync + 'static,
    T: Send + 'static,
{
    let api = Arc::new(api);

    let mut waiter = Waiter::new({
        let api = api.clone();
        move || {
            let api = api.clone();
            let path = path.clone();
            async move {
                let lookup = api
                    .client()
                    .check_json::<ScrapeJobResponse>(&path)
                    .await
                    .map(|response| response.data);
                classify(lookup)
            }
        }
    });
    waiter.set_timeout(SCRAPE_CONFIG_WAIT_TIMEOUT);
    configure_waiter(&api, &mut waiter);
    waiter
}

/// Wait for a new scrape job to become active
pub fn create_scrape_config_wait_handler<A>(
    api: A,
    project_id: &str,
    instance_id: &str,
    job_name: &str,
) -> Waiter<ScrapeJob>
where
    A: HasClient + Send + Sync + 'static,
{
    let path = scrape_config_path(project_id, instance_id, job_name);
    scrape_config_waiter(api, path, job_created_progress)
}

/// Wait for a deleted scrape job to disappear
pub fn delete_scrape_config_wait_handler<A>(
    api: A,
    project_id: &str,
    instance_id: &str,
    job_name: &str,
) -> Waiter<()>
where
    A: HasClient + Send + Sync + 'static,
{
    let path = scrape_config_path(project_id, instance_id, job_name);
    scrape_config_waiter(api, path, job_deleted_progress)
}
