//! Tests for audit sink

use parking_facility::core::{build_audit_event, AuditAction, AuditSink, InMemoryAuditSink};

#[test]
fn test_in_memory_audit_sink() {
    let sink = InMemoryAuditSink::new(10);

    let event = build_audit_event(
        AuditAction::Park,
        "ABC123",
        None,
        Some("payload".to_string()),
    );

    sink.record(event.clone());
    assert_eq!(sink.events().len(), 1);

    let events = sink.events();
    assert_eq!(events[0], event);
    assert_eq!(events[0].license_plate, "ABC123");
    assert_eq!(events[0].action, AuditAction::Park);
}

#[test]
fn test_audit_sink_overflow() {
    let sink = InMemoryAuditSink::new(2);

    sink.record(build_audit_event(AuditAction::Park, "P1", None, None));
    sink.record(build_audit_event(AuditAction::Park, "P2", None, None));
    sink.record(build_audit_event(AuditAction::Park, "P3", None, None));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].license_plate, "P2"); // First one popped
    assert_eq!(events[1].license_plate, "P3");
}

#[test]
fn test_build_audit_event() {
    let event = build_audit_event(
        AuditAction::Reject,
        "TRUCK555",
        None,
        Some("facility full for truck vehicles".to_string()),
    );

    assert_eq!(event.action, AuditAction::Reject);
    assert_eq!(event.license_plate, "TRUCK555");
    assert_eq!(event.spot, None);
    assert_eq!(event.detail.as_deref(), Some("facility full for truck vehicles"));
    assert!(!event.event_id.is_empty());
    assert!(event.created_at_ms > 0);
}

#[test]
fn test_audit_action_display() {
    assert_eq!(AuditAction::Park.to_string(), "park");
    assert_eq!(AuditAction::Unpark.to_string(), "unpark");
    assert_eq!(AuditAction::Reject.to_string(), "reject");
}
