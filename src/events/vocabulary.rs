//! Event types, actions and reasons emitted by the batch controllers
//!
//! These are opaque strings. Recorders store whatever they are given.

pub const EVENT_TYPE_NORMAL: &str = "Normal";
pub const EVENT_TYPE_WARNING: &str = "Warning";

pub mod action {
    pub const STARTED: &str = "Started";
    pub const SUSPENDED: &str = "Suspended";
    pub const STOPPED: &str = "Stopped";
    pub const CREATED_WORKLOAD: &str = "CreatedWorkload";
    pub const FINALIZING_WORKLOAD: &str = "FinalizingWorkload";
    pub const DELETED_WORKLOAD: &str = "DeletedWorkload";
    pub const UPDATED_WORKLOAD: &str = "UpdatedWorkload";
    pub const WORKLOAD_COMPOSE: &str = "WorkloadCompose";
}

pub mod reason {
    pub const FINISHED_WORKLOAD: &str = "FinishedWorkload";
    pub const ERR_WORKLOAD_COMPOSE: &str = "ErrWorkloadCompose";
}
