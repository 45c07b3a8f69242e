//! Tests for utility functions

use parking_facility::core::{SpotId, Vehicle, VehicleType};
use parking_facility::util::{init_tracing, now_ms};

#[test]
fn test_vehicle_type_ordering() {
    assert!(VehicleType::Truck > VehicleType::Car);
    assert!(VehicleType::Car > VehicleType::Motorcycle);
    assert_eq!(VehicleType::ALL.len(), 3);
}

#[test]
fn test_vehicle() {
    let vehicle = Vehicle::new("ABC123", VehicleType::Car);
    assert_eq!(vehicle, Vehicle::car("ABC123"));
    assert_eq!(vehicle.license_plate, "ABC123");
}

#[test]
fn test_spot_id_display() {
    let id = SpotId {
        level: 0,
        index: 5,
        vehicle_type: VehicleType::Truck,
    };
    assert_eq!(id.to_string(), "0-T-5");
}

#[test]
fn test_now_ms() {
    assert!(now_ms() > 1_600_000_000_000);
}

#[test]
fn test_init_tracing() {
    init_tracing();
    init_tracing();
}
