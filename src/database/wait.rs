//! Instance wait handlers

use super::api::instance_path;
use super::types::{
    Instance, OPERATION_STATE_FAILED, OPERATION_STATE_SUCCEEDED, OPERATION_TYPE_CREATE,
    OPERATION_TYPE_DELETE, OPERATION_TYPE_UPDATE,
};
use crate::error::{Error, Result};
use crate::service::{configure_waiter, HasClient};
use crate::wait::{Progress, Waiter};
use std::sync::Arc;
use std::time::Duration;

/// Provisioning a database instance can take up to an hour
pub const INSTANCE_WAIT_TIMEOUT: Duration = Duration::from_secs(60 * 60);

type Classify<T> = fn(&str, Result<Instance>) -> Result<Progress<T>>;

/// Classify an instance by the outcome of `operation`
///
/// A last operation of another type is treated as not started yet.
pub fn instance_operation_progress(
    instance_id: &str,
    operation: &str,
    instance: Instance,
) -> Result<Progress<Instance>> {
    let failure = match instance.last_operation.as_ref() {
        Some(last) if last.kind == operation => match last.state.as_str() {
            OPERATION_STATE_SUCCEEDED => None,
            OPERATION_STATE_FAILED => Some(last.reason()),
            _ => return Ok(Progress::Pending),
        },
        _ => return Ok(Progress::Pending),
    };

    match failure {
        None => Ok(Progress::Done(instance)),
        Some(reason) => Err(Error::resource_failed("instance", instance_id, reason)),
    }
}

/// Classify an instance lookup while waiting for deletion
pub fn instance_deleted_progress(instance_id: &str, lookup: Result<Instance>) -> Result<Progress<()>> {
    let instance = match lookup {
        Ok(instance) => instance,
        Err(e) if e.is_not_found() => return Ok(Progress::Done(())),
        Err(e) => return Err(e),
    };

    match instance.last_operation {
        Some(last) if last.kind == OPERATION_TYPE_DELETE && last.state == OPERATION_STATE_FAILED => {
            Err(Error::resource_failed("instance", instance_id, last.reason()))
        }
        _ => Ok(Progress::Pending),
    }
}

fn created_progress(instance_id: &str, lookup: Result<Instance>) -> Result<Progress<Instance>> {
    match lookup {
        Ok(instance) => instance_operation_progress(instance_id, OPERATION_TYPE_CREATE, instance),
        // not visible yet
        Err(e) if e.is_not_found() => Ok(Progress::Pending),
        Err(e) => Err(e),
    }
}

fn updated_progress(instance_id: &str, lookup: Result<Instance>) -> Result<Progress<Instance>> {
    instance_operation_progress(instance_id, OPERATION_TYPE_UPDATE, lookup?)
}

fn instance_waiter<A, T>(
    api: A,
    project_id: String,
    instance_id: String,
    classify: Classify<T>,
) -> Waiter<T>
where
    A: HasClient + Send + Sync + 'static,
    T: Send + 'static,
{
    let path = instance_path(&project_id, &instance_id);
    let api = Arc::new(api);

    let mut waiter = Waiter::new({
        let api = api.clone();
        move || {
            let api = api.clone();
            let path = path.clone();
            let instance_id = instance_id.clone();
            async move {
                let lookup = api.client().check_json::<Instance>(&path).await;
                classify(&instance_id, lookup)
            }
        }
    });
    waiter.set_timeout(INSTANCE_WAIT_TIMEOUT);
    configure_waiter(&api, &mut waiter);
    waiter
}

/// Wait for a new instance to finish provisioning
pub fn create_instance_wait_handler<A>(
    api: A,
    project_id: impl Into<String>,
    instance_id: impl Into<String>,
) -> Waiter<Instance>
where
    A: HasClient + Send + Sync + 'static,
{
    instance_waiter(api, project_id.into(), instance_id.into(), created_progress)
}

/// Wait for an instance update to be applied
pub fn update_instance_wait_handler<A>(
    api: A,
    project_id: impl Into<String>,
    instance_id: impl Into<String>,
) -> Waiter<Instance>
where
    A: HasClient + Send + Sync + 'static,
{
    instance_waiter(api, project_id.into(), instance_id.into(), updated_progress)
}

/// Wait for a deleted instance to disappear
pub fn delete_instance_wait_handler<A>(
    api: A,
    project_id: impl Into<String>,
    instance_id: impl Into<String>,
) -> Waiter<()>
where
    A: HasClient + Send + Sync + 'static,
{
    instance_waiter(
        api,
        project_id.into(),
        instance_id.into(),
        instance_deleted_progress,
    )
}
