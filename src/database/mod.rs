//! Managed database instances
//!
//! Instance provisioning is tracked through `lastOperation`: each mutation
//! records its type and moves its state from "in progress" to "succeeded"
//! or "failed".
//!
//! - A freshly created instance may not be visible yet; not found counts as
//!   still in progress while waiting for creation
//! - Deletion is done once the instance lookup reports not found

mod api;
mod types;
mod wait;

pub use api::DatabaseApi;
pub use types::{
    CreateInstancePayload, CreateInstanceResponse, Instance, LastOperation,
    UpdateInstancePayload, OPERATION_STATE_FAILED, OPERATION_STATE_IN_PROGRESS,
    OPERATION_STATE_SUCCEEDED, OPERATION_TYPE_CREATE, OPERATION_TYPE_DELETE,
    OPERATION_TYPE_UPDATE,
};
pub use wait::{
    create_instance_wait_handler, delete_instance_wait_handler, instance_deleted_progress,
    instance_operation_progress, update_instance_wait_handler, INSTANCE_WAIT_TIMEOUT,
};

#[cfg(test)]
mod tests;
