use super::{format::sprintf, vocabulary::EVENT_TYPE_WARNING, Arg, EventRecorder};
use crate::meta::{resolve_identity, EventSubject};
use tracing::{info, warn};

/// Recorder that emits every event as a `tracing` event
///
/// Warning events are logged at warn level, everything else at info.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventRecorder;

impl EventRecorder for TracingEventRecorder {
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
        let regarding = resolve_identity(regarding);
        let related = resolve_identity(related);
        let message = sprintf(template, args);

        if event_type == EVENT_TYPE_WARNING {
            warn!(%regarding, %related, reason, action, "{message}");
        } else {
            info!(%regarding, %related, event_type, reason, action, "{message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Workload;
    use crate::args;
    use crate::events::vocabulary::{action, reason, EVENT_TYPE_NORMAL};
    use parking_lot::Mutex;
    use std::io;
    use std::sync::Arc;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

    impl CapturedOutput {
        fn lines(&self) -> Vec<String> {
            String::from_utf8_lossy(&self.0.lock())
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    impl io::Write for CapturedOutput {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedOutput {
        type Writer = CapturedOutput;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture(emit: impl FnOnce()) -> Vec<String> {
        let output = CapturedOutput::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(output.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, emit);
        output.lines()
    }

    #[test]
    fn normal_events_are_logged_at_info_with_identities() {
        let workload = Workload::new("ns", "wl");
        let lines = capture(|| {
            TracingEventRecorder.object_eventf(
                Some(&workload),
                EVENT_TYPE_NORMAL,
                reason::FINISHED_WORKLOAD,
                action::STOPPED,
                "job %s finished",
                args!["wl"],
            );
        });

        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!(line.contains("INFO"), "{line}");
        assert!(line.contains("job wl finished"), "{line}");
        assert!(line.contains("regarding=ns/wl"), "{line}");
        assert!(line.contains("FinishedWorkload"), "{line}");
        assert!(line.contains("Stopped"), "{line}");
    }

    #[test]
    fn warning_events_are_logged_at_warn() {
        let lines = capture(|| {
            let recorder: Box<dyn EventRecorder> = Box::new(TracingEventRecorder);
            recorder.event(
                None,
                EVENT_TYPE_WARNING,
                reason::ERR_WORKLOAD_COMPOSE,
                action::WORKLOAD_COMPOSE,
                "compose failed",
            );
        });

        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!(line.contains("WARN"), "{line}");
        assert!(!line.contains("INFO"), "{line}");
        assert!(line.contains("compose failed"), "{line}");
        assert!(line.contains("ErrWorkloadCompose"), "{line}");
        assert!(line.contains("regarding=/"), "{line}");
    }
}
