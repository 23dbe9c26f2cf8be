//! Event notifications emitted by controllers
//!
//! Controllers talk to an [`EventRecorder`]. Tests hand them a
//! [`RecordingEventRecorder`] and assert on the captured log afterwards;
//! [`TracingEventRecorder`] forwards the same calls to `tracing`.

pub mod format;
mod record;
mod recorder;
mod tracing_recorder;
pub mod vocabulary;

pub use format::{sprintf, Arg};
pub use record::EventRecord;
pub use recorder::RecordingEventRecorder;
pub use tracing_recorder::TracingEventRecorder;

use crate::meta::EventSubject;

/// Sink for event notifications
///
/// Subjects are optional; a missing subject or one without an identity is
/// recorded with the empty identity. Messages are printf templates rendered
/// with [`sprintf`], so malformed templates degrade rather than fail.
pub trait EventRecorder: Send + Sync {
    /// Record an event about `regarding`, optionally linked to `related`
    #[allow(clippy::too_many_arguments)]
    fn annotated_eventf(
        &self,
        regarding: Option<&dyn EventSubject>,
        related: Option<&dyn EventSubject>,
        event_type: &str,
        reason: &str,
        action: &str,
        template: &str,
        args: &[Arg],
    );

    #[allow(clippy::too_many_arguments)]
    fn eventf(
        &self,
        regarding: Option<&dyn EventSubject>,
        related: Option<&dyn EventSubject>,
        event_type: &str,
        reason: &str,
        action: &str,
        template: &str,
        args: &[Arg],
    ) {
        self.annotated_eventf(regarding, related, event_type, reason, action, template, args);
    }

    /// Record an event with no related object
    fn object_eventf(
        &self,
        regarding: Option<&dyn EventSubject>,
        event_type: &str,
        reason: &str,
        action: &str,
        template: &str,
        args: &[Arg],
    ) {
        self.annotated_eventf(regarding, None, event_type, reason, action, template, args);
    }

    /// Record a preformatted message verbatim
    fn event(
        &self,
        regarding: Option<&dyn EventSubject>,
        event_type: &str,
        reason: &str,
        action: &str,
        message: &str,
    ) {
        self.annotated_eventf(
            regarding,
            None,
            event_type,
            reason,
            action,
            "%s",
            &[Arg::from(message)],
        );
    }
}
