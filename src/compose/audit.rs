//! Construction audit utilities.
//!
//! Lightweight instrumentation hooks so callers can observe what a
//! `Composer` builds. Records capture a stage identifier plus structured
//! metadata so downstream code can log, buffer, or visualize construction
//! without contorting the constructors themselves.

use std::time::SystemTime;

use serde_json::Value;

/// Distinct checkpoints emitted by `Composer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeAuditStage {
    /// A constructor returned a new container.
    ContainerComposed,
    /// A constructor filled a caller-supplied container instead of
    /// creating one.
    ContainerReused,
    /// The single-value margin entry point was absent and per-edge
    /// margins were applied instead.
    MarginFallback,
    /// Validation rejected the requested construction.
    ComposeRejected,
    /// A declarative plan was assembled into a container tree.
    PlanAssembled,
}

/// Structured audit entry.
#[derive(Debug, Clone)]
pub struct ComposeAuditEvent {
    pub timestamp: SystemTime,
    pub stage: ComposeAuditStage,
    pub details: Vec<(String, Value)>,
}

impl ComposeAuditEvent {
    fn new(stage: ComposeAuditStage) -> Self {
        Self {
            timestamp: SystemTime::now(),
            stage,
            details: Vec::new(),
        }
    }
}

/// Builder helper to append fields ergonomically.
pub struct ComposeAuditEventBuilder {
    event: ComposeAuditEvent,
}

impl ComposeAuditEventBuilder {
    pub fn new(stage: ComposeAuditStage) -> Self {
        Self {
            event: ComposeAuditEvent::new(stage),
        }
    }

    pub fn detail(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.event.details.push((key.into(), value));
        self
    }

    pub fn finish(self) -> ComposeAuditEvent {
        self.event
    }
}

/// Trait implemented by any audit sink.
pub trait ComposeAudit: Send + Sync {
    fn record(&self, event: ComposeAuditEvent);
}

/// Default no-op implementation used when auditing is disabled.
#[derive(Debug, Default)]
pub struct NullComposeAudit;

impl ComposeAudit for NullComposeAudit {
    fn record(&self, _event: ComposeAuditEvent) {}
}
