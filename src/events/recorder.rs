use super::{format::sprintf, Arg, EventRecord, EventRecorder};
use crate::log_messages;
use crate::meta::{resolve_identity, EventSubject};
use parking_lot::Mutex;
use tracing::debug;

/// In-memory recorder that keeps every event in emission order
///
/// Share it with the controller under test through an `Arc` and read the
/// log back with [`recorded_events`](Self::recorded_events). A single lock
/// guards both appends and reads, so the log order is the order in which
/// callers acquired it.
#[derive(Debug, Default)]
pub struct RecordingEventRecorder {
    events: Mutex<Vec<EventRecord>>,
}

impl RecordingEventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the full log
    pub fn recorded_events(&self) -> Vec<EventRecord> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn last(&self) -> Option<EventRecord> {
        self.events.lock().last().cloned()
    }
}

impl EventRecorder for RecordingEventRecorder {
    fn annotated_eventf(
        &self,
        regarding: Option<&dyn EventSubject>,
        related: Option<&dyn EventSubject>,
        event_type: &str,
        reason: &str,
        action: &str,
        template: &str,
        args: &[Arg],
    ) {
        let record = EventRecord {
            regarding: resolve_identity(regarding),
            related: resolve_identity(related),
            event_type: event_type.to_string(),
            reason: reason.to_string(),
            action: action.to_string(),
            message: sprintf(template, args),
        };
        debug!(
            regarding = %record.regarding,
            event_type = %record.event_type,
            reason = %record.reason,
            action = %record.action,
            note = %record.message,
            "{}",
            log_messages::events::RECORDED_EVENT
        );
        self.events.lock().push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Workload;
    use crate::args;
    use crate::events::vocabulary::{action, reason, EVENT_TYPE_NORMAL, EVENT_TYPE_WARNING};
    use crate::meta::NamespacedName;

    struct WorkloadList;

    impl EventSubject for WorkloadList {
        fn object_key(&self) -> Option<NamespacedName> {
            None
        }
    }

    #[test]
    fn records_formatted_event_with_identities() {
        let recorder = RecordingEventRecorder::new();
        let workload = Workload::new("team-a", "job-1");
        let parent = Workload::new("team-a", "parent");

        recorder.annotated_eventf(
            Some(&workload),
            Some(&parent),
            EVENT_TYPE_NORMAL,
            reason::FINISHED_WORKLOAD,
            action::STOPPED,
            "job %s finished",
            args!["job-1"],
        );

        assert_eq!(
            recorder.recorded_events(),
            vec![EventRecord {
                regarding: NamespacedName::new("team-a", "job-1"),
                related: NamespacedName::new("team-a", "parent"),
                event_type: "Normal".to_string(),
                reason: "FinishedWorkload".to_string(),
                action: "Stopped".to_string(),
                message: "job job-1 finished".to_string(),
            }]
        );
    }

    #[test]
    fn eventf_and_object_eventf_share_the_append_path() {
        let recorder = RecordingEventRecorder::new();
        let workload = Workload::new("ns", "wl");

        recorder.eventf(
            Some(&workload),
            Some(&workload),
            EVENT_TYPE_NORMAL,
            "Created",
            action::CREATED_WORKLOAD,
            "created %d",
            args![1],
        );
        recorder.object_eventf(
            Some(&workload),
            EVENT_TYPE_WARNING,
            reason::ERR_WORKLOAD_COMPOSE,
            action::WORKLOAD_COMPOSE,
            "compose failed: %v",
            args!["boom"],
        );

        let events = recorder.recorded_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].related, NamespacedName::new("ns", "wl"));
        assert_eq!(events[0].message, "created 1");
        assert!(events[1].related.is_empty());
        assert!(events[1].is_warning());
        assert_eq!(events[1].message, "compose failed: boom");
    }

    #[test]
    fn event_keeps_message_verbatim() {
        let recorder = RecordingEventRecorder::new();
        recorder.event(None, EVENT_TYPE_NORMAL, "Progress", action::STARTED, "100% done %d");

        let last = recorder.last().unwrap();
        assert_eq!(last.message, "100% done %d");
        assert!(last.regarding.is_empty());
    }

    #[test]
    fn subjects_without_identity_record_empty_identity() {
        let recorder = RecordingEventRecorder::new();
        recorder.annotated_eventf(
            Some(&WorkloadList),
            None,
            EVENT_TYPE_NORMAL,
            "",
            "",
            "listed",
            args![],
        );

        let last = recorder.last().unwrap();
        assert_eq!(last.regarding, NamespacedName::default());
        assert_eq!(last.related, NamespacedName::default());
    }

    #[test]
    fn malformed_templates_still_record() {
        let recorder = RecordingEventRecorder::new();
        recorder.object_eventf(None, EVENT_TYPE_NORMAL, "", "", "missing %s", args![]);
        recorder.object_eventf(None, EVENT_TYPE_NORMAL, "", "", "extra", args![7]);

        let messages: Vec<_> = recorder
            .recorded_events()
            .into_iter()
            .map(|event| event.message)
            .collect();
        assert_eq!(messages, vec!["missing %!s(MISSING)", "extra%!(EXTRA int=7)"]);
    }

    #[test]
    fn new_recorder_is_empty() {
        let recorder = RecordingEventRecorder::new();
        assert!(recorder.is_empty());
        assert_eq!(recorder.len(), 0);
        assert!(recorder.last().is_none());
    }
}
