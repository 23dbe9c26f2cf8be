//! Log message constants
//!
//! Every `tracing` message emitted by the crate is listed here so tests and
//! log filters can match on them.

/// Scheme registration
pub mod scheme {
    pub const REGISTERED_KIND: &str = "Registered kind";
}

/// Fake store construction
pub mod builder {
    pub const LOADED_SETTINGS: &str = "Loaded testkit settings";
    pub const REGISTERED_INDEX: &str = "Registered index";
    pub const REPLACED_INDEX: &str = "Replaced index registration";
    pub const BUILT_STORE: &str = "Built fake store";
}

/// Fake store writes
pub mod store {
    pub const CREATED_OBJECT: &str = "Created object";
    pub const UPDATED_OBJECT: &str = "Updated object";
    pub const UPDATED_STATUS: &str = "Updated status";
    pub const DELETED_OBJECT: &str = "Deleted object";
}

/// Event recording
pub mod events {
    pub const RECORDED_EVENT: &str = "Recorded event";
}
