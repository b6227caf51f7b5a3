// crates/design-resolver-core/src/runtime/audit.rs
// ============================================================================
// Module: Design Resolver Audit Sinks
// Description: JSON-lines sinks for per-node resolution audit events.
// Purpose: Route resolution records to stderr, a file, or nowhere.
// Dependencies: crate::interfaces, serde_json
// ============================================================================

//! ## Overview
//! Each sink serializes [`ResolutionAuditEvent`] as one JSON object per line.
//! Serialization and write failures are dropped; auditing never affects the
//! resolution result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use crate::interfaces::ResolutionAuditEvent;
use crate::interfaces::ResolutionAuditSink;

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAuditSink;

impl ResolutionAuditSink for NoopAuditSink {
    fn record(&self, _event: &ResolutionAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrAuditSink;

impl ResolutionAuditSink for StderrAuditSink {
    fn record(&self, event: &ResolutionAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
#[derive(Debug)]
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl ResolutionAuditSink for FileAuditSink {
    fn record(&self, event: &ResolutionAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the current time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_millis())
}
