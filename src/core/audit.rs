//! Audit sinks for parking activity.
//!
//! The facility reports every park, unpark, and rejection to an attached sink
//! after all of its own locks are released.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::SpotId;
use crate::sync::Mutex;
use crate::util::clock::now_ms;

/// What happened to a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Vehicle took a spot.
    Park,
    /// Vehicle left a spot.
    Unpark,
    /// Request was refused.
    Reject,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Park => write!(f, "park"),
            Self::Unpark => write!(f, "unpark"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Audit event structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Event identifier (UUID v4).
    pub event_id: String,
    /// Action taken.
    pub action: AuditAction,
    /// Plate of the vehicle involved.
    pub license_plate: String,
    /// Spot involved, when one was.
    pub spot: Option<SpotId>,
    /// Timestamp in milliseconds since the Unix epoch.
    pub created_at_ms: u128,
    /// Additional context, such as a rejection reason.
    pub detail: Option<String>,
}

/// Audit sink abstraction. Sinks are shared across threads.
pub trait AuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: AuditEvent);
}

/// In-memory audit sink for testing and dev.
///
/// Clones share one bounded buffer; the oldest event is dropped on overflow.
#[derive(Clone)]
pub struct InMemoryAuditSink {
    events: Arc<Mutex<VecDeque<AuditEvent>>>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Arc::new(Mutex::new(VecDeque::with_capacity(max_events.min(1024)))),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events, oldest first.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().iter().cloned().collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&self, event: AuditEvent) {
        if self.max_events == 0 {
            return;
        }
        let mut events = self.events.lock();
        if events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(event);
    }
}

/// Sink that emits each event as JSON on the `parking_facility::audit` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: AuditEvent) {
        match serde_json::to_string(&event) {
            Ok(json) => tracing::info!(target: "parking_facility::audit", "{}", json),
            Err(e) => tracing::error!("failed to encode audit event {}: {}", event.event_id, e),
        }
    }
}

/// Helper to build an audit event from context.
pub fn build_audit_event(
    action: AuditAction,
    license_plate: impl Into<String>,
    spot: Option<SpotId>,
    detail: Option<String>,
) -> AuditEvent {
    AuditEvent {
        event_id: Uuid::new_v4().to_string(),
        action,
        license_plate: license_plate.into(),
        spot,
        created_at_ms: now_ms(),
        detail,
    }
}
