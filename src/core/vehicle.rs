//! Vehicle classification and occupant records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Compatibility class shared by vehicles and the spots that accept them.
///
/// Declaration order is layout order: a level lays out its motorcycle spots
/// first, then cars, then trucks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    /// Motorcycles and other two-wheelers.
    Motorcycle,
    /// Passenger cars.
    Car,
    /// Trucks and oversized vehicles.
    Truck,
}

impl VehicleType {
    /// Every class, in layout order.
    pub const ALL: [Self; 3] = [Self::Motorcycle, Self::Car, Self::Truck];

    /// Position of this class in layout order.
    pub const fn ordinal(self) -> usize {
        match self {
            Self::Motorcycle => 0,
            Self::Car => 1,
            Self::Truck => 2,
        }
    }

    /// Single-letter code used in spot identifiers.
    pub const fn code(self) -> char {
        match self {
            Self::Motorcycle => 'M',
            Self::Car => 'C',
            Self::Truck => 'T',
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Motorcycle => write!(f, "motorcycle"),
            Self::Car => write!(f, "car"),
            Self::Truck => write!(f, "truck"),
        }
    }
}

/// A vehicle presented to the facility.
///
/// The license plate is the vehicle's identity for as long as it is parked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vehicle {
    /// License plate.
    pub license_plate: String,
    /// Compatibility class.
    pub vehicle_type: VehicleType,
}

impl Vehicle {
    /// Create a vehicle of the given class.
    pub fn new(license_plate: impl Into<String>, vehicle_type: VehicleType) -> Self {
        Self {
            license_plate: license_plate.into(),
            vehicle_type,
        }
    }

    /// Create a motorcycle.
    pub fn motorcycle(license_plate: impl Into<String>) -> Self {
        Self::new(license_plate, VehicleType::Motorcycle)
    }

    /// Create a car.
    pub fn car(license_plate: impl Into<String>) -> Self {
        Self::new(license_plate, VehicleType::Car)
    }

    /// Create a truck.
    pub fn truck(license_plate: impl Into<String>) -> Self {
        Self::new(license_plate, VehicleType::Truck)
    }
}
