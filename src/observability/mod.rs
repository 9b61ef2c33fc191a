//! Observability scrape jobs
//!
//! Scrape job changes are accepted right away but propagate to the
//! monitoring instance asynchronously. Waiting looks the job up by name:
//!
//! - Create is done once the lookup returns the job; not found is pending
//! - Delete is done once the lookup reports not found

mod api;
mod types;
mod wait;

pub use api::ObservabilityApi;
pub use types::{ScrapeConfigList, ScrapeJob, ScrapeJobPayload, ScrapeJobResponse, StaticConfig};
pub use wait::{
    create_scrape_config_wait_handler, delete_scrape_config_wait_handler, job_created_progress,
    job_deleted_progress, SCRAPE_CONFIG_WAIT_TIMEOUT,
};
