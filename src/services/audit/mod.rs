//! Centralised service-level audit logger.
//!
//! Every privileged operation ends with exactly one call to [`AuditService::audit`],
//! after the action itself has completed.

pub mod event;
pub mod sink;

use std::sync::Arc;

pub use event::{AuditAction, AuditEvent, AuditEventError};
pub use sink::{AuditSink, StdoutSink, TracingSink};

use crate::config::AuditSinkKind;
use crate::services::correlation::{self, CorrelationId};

#[derive(Clone)]
pub struct AuditService {
    sink: Arc<dyn AuditSink>,
}

impl std::fmt::Debug for AuditService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditService")
            .field("sink", &self.sink.name())
            .finish()
    }
}

impl AuditService {
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    pub fn from_kind(kind: AuditSinkKind) -> Self {
        match kind {
            AuditSinkKind::Tracing => Self::new(Arc::new(TracingSink)),
            AuditSinkKind::Stdout => Self::new(Arc::new(StdoutSink)),
        }
    }

    /// Record one audit event, stamped now and tagged with the active correlation id.
    ///
    /// Errors only on a contract violation by the caller (blank service or action).
    /// A failing sink is logged and otherwise ignored.
    pub fn audit(
        &self,
        calling_service: &str,
        endpoint: &str,
        action: &str,
        resource_id: &str,
    ) -> Result<(), AuditEventError> {
        let correlation_id = correlation::current().map(CorrelationId::into_string);

        let event = AuditEvent::new(
            calling_service,
            endpoint,
            action,
            resource_id,
            None,
            correlation_id,
        )?;

        self.emit(&event);
        Ok(())
    }

    pub fn emit(&self, event: &AuditEvent) {
        let line = match event.to_log_line() {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    action = event.action(),
                    "failed to serialize audit event"
                );
                return;
            }
        };

        if let Err(err) = self.sink.write(&line) {
            tracing::warn!(
                error = %err,
                sink = self.sink.name(),
                action = event.action(),
                "audit sink write failed"
            );
        }
    }
}
