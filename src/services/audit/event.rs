//! Service-level audit event.
//!
//! Captures the calling service identity, the action performed, the target resource,
//! and correlation metadata. Immutable once built.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Marker that prefixes every audit line so log pipelines can pick them out.
pub const AUDIT_MARKER: &str = "SERVICE_AUDIT";

/// Privileged actions exposed by this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    ForceCloseScan,
    SuspendUser,
    GetRequestDetails,
    ReplayRequest,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ForceCloseScan => "FORCE_CLOSE_SCAN",
            Self::SuspendUser => "SUSPEND_USER",
            Self::GetRequestDetails => "GET_REQUEST_DETAILS",
            Self::ReplayRequest => "REPLAY_REQUEST",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuditEventError {
    #[error("callingService must not be blank")]
    BlankCallingService,
    #[error("action must not be blank")]
    BlankAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    calling_service: String,
    endpoint: String,
    action: String,
    resource_id: String,
    timestamp: DateTime<Utc>,
    correlation_id: Option<String>,
}

// Wire shape of one audit line. Field order and key names are consumed downstream.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuditRecord<'a> {
    service: &'a str,
    action: &'a str,
    resource_id: &'a str,
    endpoint: &'a str,
    correlation_id: Option<&'a str>,
    timestamp: DateTime<Utc>,
}

impl AuditEvent {
    /// Validated constructor. `timestamp` defaults to now.
    pub fn new(
        calling_service: impl Into<String>,
        endpoint: impl Into<String>,
        action: impl Into<String>,
        resource_id: impl Into<String>,
        timestamp: Option<DateTime<Utc>>,
        correlation_id: Option<String>,
    ) -> Result<Self, AuditEventError> {
        let calling_service = calling_service.into();
        if calling_service.trim().is_empty() {
            return Err(AuditEventError::BlankCallingService);
        }
        let action = action.into();
        if action.trim().is_empty() {
            return Err(AuditEventError::BlankAction);
        }

        Ok(Self {
            calling_service,
            endpoint: endpoint.into(),
            action,
            resource_id: resource_id.into(),
            timestamp: timestamp.unwrap_or_else(Utc::now),
            correlation_id,
        })
    }

    pub fn calling_service(&self) -> &str {
        &self.calling_service
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    /// `SERVICE_AUDIT {"service":..,"action":..,"resourceId":..,"endpoint":..,"correlationId":..,"timestamp":..}`
    pub fn to_log_line(&self) -> Result<String, serde_json::Error> {
        let record = AuditRecord {
            service: self.calling_service(),
            action: self.action(),
            resource_id: self.resource_id(),
            endpoint: self.endpoint(),
            correlation_id: self.correlation_id(),
            timestamp: self.timestamp(),
        };
        Ok(format!("{AUDIT_MARKER} {}", serde_json::to_string(&record)?))
    }
}
