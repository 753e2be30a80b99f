//! Where audit lines go.
//!
//! The sink itself is external (log shipping, SIEM, ...). This crate only hands it one
//! line per event and never retries.

use std::io::Write;

#[derive(Debug, thiserror::Error)]
pub enum AuditSinkError {
    #[error("audit sink i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub trait AuditSink: Send + Sync {
    fn name(&self) -> &'static str;

    fn write(&self, line: &str) -> Result<(), AuditSinkError>;
}

/// Writes audit lines through `tracing` (target `service_audit`), so they share the
/// subscriber, filtering, and request span (`correlation_id`) of every other log line.
#[derive(Debug, Default)]
pub struct TracingSink;

impl AuditSink for TracingSink {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn write(&self, line: &str) -> Result<(), AuditSinkError> {
        tracing::info!(target: "service_audit", "{line}");
        Ok(())
    }
}

/// Writes audit lines straight to stdout, one per line.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl AuditSink for StdoutSink {
    fn name(&self) -> &'static str {
        "stdout"
    }

    fn write(&self, line: &str) -> Result<(), AuditSinkError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}")?;
        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use super::{AuditSink, AuditSinkError};

    /// Keeps every line in memory.
    #[derive(Debug, Default, Clone)]
    pub struct RecordingSink {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingSink {
        pub fn lines(&self) -> Vec<String> {
            self.lines.lock().expect("sink poisoned").clone()
        }
    }

    impl AuditSink for RecordingSink {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn write(&self, line: &str) -> Result<(), AuditSinkError> {
            self.lines.lock().expect("sink poisoned").push(line.to_string());
            Ok(())
        }
    }

    /// Always fails, to exercise the degraded-sink path.
    #[derive(Debug, Default)]
    pub struct FailingSink;

    impl AuditSink for FailingSink {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn write(&self, _line: &str) -> Result<(), AuditSinkError> {
            Err(std::io::Error::other("disk full").into())
        }
    }
}
