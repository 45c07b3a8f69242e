//! Tests for builder modules

use std::sync::Arc;

use parking_facility::builders::FacilityBuilder;
use parking_facility::config::{FacilityLayout, LevelLayout};
use parking_facility::core::{FacilityCell, FacilityError, InMemoryAuditSink, Vehicle};

#[test]
fn test_facility_builder_levels() {
    let builder = FacilityBuilder::new()
        .level(LevelLayout::new(1, 2, 3))
        .uniform_level(9);

    assert_eq!(builder.levels().len(), 2);
    assert_eq!(builder.levels()[1], LevelLayout::new(3, 3, 3));
}

#[test]
fn test_facility_builder_registry_flag() {
    let layout = FacilityBuilder::new()
        .uniform_levels(1, 3)
        .enforce_unique_occupants(false)
        .build_layout()
        .unwrap();
    assert!(!layout.enforce_unique_occupants);
}

#[test]
fn test_facility_builder_bootstrap_in_cell() {
    let cell = FacilityCell::new();
    let sink = InMemoryAuditSink::new(8);
    let lot = FacilityBuilder::new()
        .uniform_levels(2, 6)
        .with_audit(Arc::new(sink.clone()))
        .bootstrap_in(&cell)
        .unwrap();

    assert_eq!(lot.layout(), &FacilityLayout::uniform(2, 6));
    lot.allocate(&Vehicle::car("ABC123")).unwrap();
    assert_eq!(sink.events().len(), 1);
}

#[test]
fn test_facility_builder_conflicts_with_existing_cell() {
    let cell = FacilityCell::new();
    cell.bootstrap(FacilityLayout::uniform(2, 6)).unwrap();

    let result = FacilityBuilder::new().uniform_levels(1, 6).bootstrap_in(&cell);
    assert_eq!(result.err(), Some(FacilityError::DoubleConstruction));
}

#[test]
fn test_facility_builder_rejects_oversized_levels() {
    let cell = FacilityCell::new();
    let result = FacilityBuilder::new()
        .level(LevelLayout::new(usize::MAX, 1, 0))
        .bootstrap_in(&cell);

    let err = result.err().expect("overflowing layout is rejected");
    assert_eq!(
        err,
        FacilityError::InvalidLayout("level 0 spot count overflows".into())
    );
    assert!(cell.get().is_none());
    assert_eq!(cell.constructions(), 0);
}
