//! Per-request correlation identifier.
//!
//! Responsibility:
//! - Resolve the correlation id for an inbound request (adopt the caller's, or mint one).
//! - Keep it in task-local storage for exactly as long as the request future runs.
//!
//! Notes:
//! - There is no explicit `end()`. The value is bound by `scope` and is gone
//!   as soon as the scoped future completes, returns an error, panics, or is dropped
//!   (timeout / client disconnect).
//! - Storage is `tokio::task_local!`, never a process-wide variable: two requests running
//!   on the same worker thread cannot observe each other's id.

use std::fmt;
use std::future::Future;

use uuid::Uuid;

tokio::task_local! {
    static CURRENT: CorrelationId;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Adopt `inbound` verbatim when it is present and non-blank, otherwise generate a new id.
    pub fn resolve(inbound: Option<&str>) -> Self {
        match inbound {
            Some(value) if !value.trim().is_empty() => Self(value.to_string()),
            _ => Self::generate(),
        }
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Run `fut` with `id` as the active correlation id.
pub async fn scope<F>(id: CorrelationId, fut: F) -> F::Output
where
    F: Future,
{
    CURRENT.scope(id, fut).await
}

/// Synchronous counterpart of [`scope`].
#[cfg(test)]
pub fn sync_scope<R>(id: CorrelationId, f: impl FnOnce() -> R) -> R {
    CURRENT.sync_scope(id, f)
}

/// The correlation id of the request being handled on this task, if any.
pub fn current() -> Option<CorrelationId> {
    CURRENT.try_with(Clone::clone).ok()
}
