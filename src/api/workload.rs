use crate::meta::{Object, ObjectMeta};
use serde::{Deserialize, Serialize};

/// A unit of admission: the queue it waits in and, once admitted, where
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: WorkloadSpec,
    #[serde(default)]
    pub status: WorkloadStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub queue_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admission: Option<Admission>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admission {
    pub cluster_queue: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

/// Condition type set once a workload ran to completion
pub const WORKLOAD_FINISHED: &str = "Finished";

impl Workload {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta::new(namespace, name),
            ..Self::default()
        }
    }

    pub fn with_queue(mut self, queue_name: impl Into<String>) -> Self {
        self.spec.queue_name = queue_name.into();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.spec.priority = Some(priority);
        self
    }

    pub fn admitted_to(mut self, cluster_queue: impl Into<String>) -> Self {
        self.status.admission = Some(Admission {
            cluster_queue: cluster_queue.into(),
        });
        self
    }

    pub fn is_admitted(&self) -> bool {
        self.status.admission.is_some()
    }

    /// Set `condition_type`, replacing any previous condition of that type
    pub fn set_condition(&mut self, condition: Condition) {
        self.status
            .conditions
            .retain(|existing| existing.condition_type != condition.condition_type);
        self.status.conditions.push(condition);
    }

    pub fn is_finished(&self) -> bool {
        self.status
            .conditions
            .iter()
            .any(|c| c.condition_type == WORKLOAD_FINISHED && c.status == "True")
    }
}

impl Object for Workload {
    const KIND: &'static str = "Workload";

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workload_serializes_in_camel_case() {
        let wl = Workload::new("ns", "wl").with_queue("lq").admitted_to("cq");
        let json = serde_json::to_value(&wl).unwrap();

        assert_eq!(json["spec"]["queueName"], "lq");
        assert_eq!(json["status"]["admission"]["clusterQueue"], "cq");
    }

    #[test]
    fn set_condition_replaces_same_type() {
        let mut wl = Workload::new("ns", "wl");
        wl.set_condition(Condition {
            condition_type: WORKLOAD_FINISHED.to_string(),
            status: "False".to_string(),
            reason: String::new(),
            message: String::new(),
        });
        wl.set_condition(Condition {
            condition_type: WORKLOAD_FINISHED.to_string(),
            status: "True".to_string(),
            reason: "Succeeded".to_string(),
            message: String::new(),
        });

        assert_eq!(wl.status.conditions.len(), 1);
        assert!(wl.is_finished());
    }
}
