//! Tests for error types

use parking_facility::core::{FacilityError, SpotId, VehicleType};

fn spot() -> SpotId {
    SpotId {
        level: 1,
        index: 3,
        vehicle_type: VehicleType::Car,
    }
}

#[test]
fn test_class_mismatch_error() {
    let err = FacilityError::ClassMismatch(VehicleType::Motorcycle);
    assert_eq!(format!("{}", err), "no spots accept motorcycle vehicles");
}

#[test]
fn test_facility_full_error() {
    let err = FacilityError::FacilityFull(VehicleType::Car);
    assert_eq!(format!("{}", err), "facility full for car vehicles");
}

#[test]
fn test_occupant_not_found_error() {
    let err = FacilityError::OccupantNotFound("ABC123".to_string());
    assert_eq!(format!("{}", err), "vehicle ABC123 not found");
}

#[test]
fn test_double_construction_error() {
    let err = FacilityError::DoubleConstruction;
    assert_eq!(
        format!("{}", err),
        "facility already constructed with a different layout"
    );
}

#[test]
fn test_spot_errors_render_spot_ids() {
    assert_eq!(
        FacilityError::SpotOccupied(spot()).to_string(),
        "spot 1-C-3 is already occupied"
    );
    assert_eq!(FacilityError::SpotEmpty(spot()).to_string(), "spot 1-C-3 is empty");
    assert_eq!(
        FacilityError::InvalidSpot { level: 1, index: 40 }.to_string(),
        "invalid spot 40 on level 1"
    );
}

#[test]
fn test_errors_convert_to_anyhow() {
    let result: parking_facility::core::AppResult<()> =
        Err(FacilityError::AlreadyParked("XYZ789".into()).into());
    let err = result.unwrap_err();
    assert_eq!(
        err.downcast_ref::<FacilityError>(),
        Some(&FacilityError::AlreadyParked("XYZ789".into()))
    );
}
