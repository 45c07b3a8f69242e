//! A single parking spot guarded by its own lock.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::core::{Vehicle, VehicleType};
use crate::sync::Mutex;

/// Identifies a spot within the facility.
///
/// Renders as `{level}-{class code}-{index}`, e.g. `0-C-2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpotId {
    /// Level the spot belongs to.
    pub level: usize,
    /// Position within the level, in construction order.
    pub index: usize,
    /// Class of vehicle the spot accepts.
    pub vehicle_type: VehicleType,
}

impl fmt::Display for SpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.level, self.vehicle_type.code(), self.index)
    }
}

/// Point-in-time view of one spot, for display and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotSnapshot {
    /// Spot identity.
    pub id: SpotId,
    /// Whether a vehicle held the spot when the snapshot was taken.
    pub occupied: bool,
    /// Plate of that vehicle, if any.
    pub license_plate: Option<String>,
}

/// One allocatable spot.
///
/// `occupant` is only mutated under its lock. `occupied` mirrors
/// `occupant.is_some()` and is written under the same lock, so lock-free
/// readers may see a stale value but never one that was not true at some point.
pub(crate) struct ParkingSpot {
    id: SpotId,
    occupied: AtomicBool,
    occupant: Mutex<Option<Vehicle>>,
}

impl ParkingSpot {
    pub(crate) fn new(id: SpotId) -> Self {
        Self {
            id,
            occupied: AtomicBool::new(false),
            occupant: Mutex::new(None),
        }
    }

    pub(crate) const fn id(&self) -> SpotId {
        self.id
    }

    pub(crate) const fn vehicle_type(&self) -> VehicleType {
        self.id.vehicle_type
    }

    /// Lock-free availability read. Not a reservation.
    pub(crate) fn is_available(&self) -> bool {
        !self.occupied.load(Ordering::Acquire)
    }

    /// Park `vehicle` here if the spot is empty and the classes match.
    pub(crate) fn try_acquire(&self, vehicle: &Vehicle) -> bool {
        // The class is immutable, so the mismatch check needs no lock.
        if vehicle.vehicle_type != self.id.vehicle_type {
            return false;
        }
        let mut occupant = self.occupant.lock();
        if occupant.is_some() {
            return false;
        }
        *occupant = Some(vehicle.clone());
        self.occupied.store(true, Ordering::Release);
        true
    }

    /// Remove and return whichever vehicle holds the spot.
    pub(crate) fn try_release(&self) -> Option<Vehicle> {
        let mut occupant = self.occupant.lock();
        let vehicle = occupant.take()?;
        self.occupied.store(false, Ordering::Release);
        Some(vehicle)
    }

    /// Remove the occupant only if it carries `license_plate`.
    pub(crate) fn try_release_plate(&self, license_plate: &str) -> Option<Vehicle> {
        if self.is_available() {
            return None;
        }
        let mut occupant = self.occupant.lock();
        if occupant
            .as_ref()
            .is_some_and(|vehicle| vehicle.license_plate == license_plate)
        {
            self.occupied.store(false, Ordering::Release);
            return occupant.take();
        }
        None
    }

    /// Whether the spot currently holds `license_plate`.
    pub(crate) fn holds(&self, license_plate: &str) -> bool {
        !self.is_available()
            && self
                .occupant
                .lock()
                .as_ref()
                .is_some_and(|vehicle| vehicle.license_plate == license_plate)
    }

    pub(crate) fn snapshot(&self) -> SpotSnapshot {
        let license_plate = self
            .occupant
            .lock()
            .as_ref()
            .map(|vehicle| vehicle.license_plate.clone());
        SpotSnapshot {
            id: self.id,
            occupied: license_plate.is_some(),
            license_plate,
        }
    }
}
