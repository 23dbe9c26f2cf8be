use crate::meta::NamespacedName;
use serde::{Deserialize, Serialize};

/// One captured event notification
///
/// `regarding` and `related` hold the empty identity when the subject had
/// none or was not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub regarding: NamespacedName,
    pub related: NamespacedName,
    pub event_type: String,
    pub reason: String,
    pub action: String,
    pub message: String,
}

impl EventRecord {
    pub fn is_warning(&self) -> bool {
        self.event_type == super::vocabulary::EVENT_TYPE_WARNING
    }
}
