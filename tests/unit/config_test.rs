//! Tests for configuration validation

use std::collections::HashMap;

use parking_facility::config::layout::{LAYOUT_PATH_ENV, LEVELS_ENV, SPOTS_PER_LEVEL_ENV};
use parking_facility::config::{FacilityLayout, LevelLayout};
use parking_facility::core::VehicleType;

#[test]
fn test_layout_validation() {
    let valid = FacilityLayout::new(vec![LevelLayout::new(2, 2, 2), LevelLayout::new(0, 5, 0)]);
    assert!(valid.validate().is_ok());
    assert_eq!(valid.total(), 11);
    assert_eq!(valid.capacity(VehicleType::Car), 7);
}

#[test]
fn test_layout_without_levels() {
    let invalid = FacilityLayout::new(Vec::new());
    assert!(invalid.validate().is_err());
}

#[test]
fn test_layout_with_empty_level() {
    let invalid = FacilityLayout::new(vec![LevelLayout::even_split(6), LevelLayout::new(0, 0, 0)]);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_uniform_layout() {
    let layout = FacilityLayout::uniform(2, 6);
    assert_eq!(layout.levels, vec![LevelLayout::new(2, 2, 2); 2]);
    assert!(layout.enforce_unique_occupants);
}

#[test]
fn test_layout_from_json() {
    let json = r#"{
        "levels": [
            { "motorcycle": 2, "car": 2, "truck": 2 },
            { "car": 10 }
        ],
        "enforce_unique_occupants": false
    }"#;

    let layout = FacilityLayout::from_json_str(json).unwrap();
    assert_eq!(layout.levels[1], LevelLayout::new(0, 10, 0));
    assert!(!layout.enforce_unique_occupants);
}

#[test]
fn test_layout_from_json_rejects_invalid() {
    assert!(FacilityLayout::from_json_str("{}").is_err());
    assert!(FacilityLayout::from_json_str(r#"{"levels": []}"#).is_err());
    assert!(FacilityLayout::from_json_str(r#"{"levels": [{"car": -1}]}"#).is_err());
}

#[test]
fn test_layout_json_round_trip() {
    let layout = FacilityLayout::uniform(3, 7).with_unique_occupants(false);
    let json = serde_json::to_string(&layout).unwrap();
    assert_eq!(FacilityLayout::from_json_str(&json).unwrap(), layout);
}

#[test]
fn test_layout_from_file_variable() {
    let path = std::env::temp_dir().join(format!(
        "parking-facility-layout-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, r#"{"levels":[{"motorcycle":1,"car":1,"truck":1}]}"#).unwrap();

    let vars = HashMap::from([
        (LAYOUT_PATH_ENV, path.display().to_string()),
        // The file takes precedence over the uniform variables.
        (LEVELS_ENV, "9".to_string()),
        (SPOTS_PER_LEVEL_ENV, "9".to_string()),
    ]);
    let layout = FacilityLayout::from_vars(|key| vars.get(key).cloned()).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(layout, FacilityLayout::new(vec![LevelLayout::new(1, 1, 1)]));
}

#[test]
fn test_layout_from_variables_with_zero_spots() {
    let err = FacilityLayout::from_vars(|key| {
        (key == SPOTS_PER_LEVEL_ENV).then(|| "0".to_string())
    })
    .unwrap_err();
    assert!(err.to_string().contains("level 0 has no spots"));
}
