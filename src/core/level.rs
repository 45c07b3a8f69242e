//! Parking levels: fixed runs of spots, partitioned by vehicle class.
//!
//! # Locking
//!
//! Each spot's own lock is the only thing that keeps occupancy correct: a
//! check-and-set on one spot is indivisible no matter who calls it. The
//! level-wide `search` lock is an optimization layered on top. It serializes
//! whole scans so two parkers do not both pick the same apparently free spot
//! and then fight over it, but removing it would not break any invariant.
//!
//! Lock order is always `search` then a spot lock, and a spot lock is never
//! held while `search` is taken.

use std::ops::Range;

use crate::config::LevelLayout;
use crate::core::spot::ParkingSpot;
use crate::core::{FacilityError, SpotId, SpotSnapshot, Vehicle, VehicleType};
use crate::sync::Mutex;

/// One level of the facility.
pub struct Level {
    id: usize,
    spots: Vec<ParkingSpot>,
    /// Spot index range per class, indexed by [`VehicleType::ordinal`].
    ranges: [Range<usize>; 3],
    search: Mutex<()>,
}

impl Level {
    pub(crate) fn new(id: usize, layout: &LevelLayout) -> Self {
        let mut spots = Vec::with_capacity(layout.total());
        let mut ranges: [Range<usize>; 3] = Default::default();
        for vehicle_type in VehicleType::ALL {
            let start = spots.len();
            for _ in 0..layout.count(vehicle_type) {
                spots.push(ParkingSpot::new(SpotId {
                    level: id,
                    index: spots.len(),
                    vehicle_type,
                }));
            }
            ranges[vehicle_type.ordinal()] = start..spots.len();
        }
        tracing::debug!(
            "level {} built: {} motorcycle, {} car, {} truck spots",
            id,
            layout.motorcycle,
            layout.car,
            layout.truck
        );
        Self {
            id,
            spots,
            ranges,
            search: Mutex::new(()),
        }
    }

    /// Level number, starting at zero.
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Spots on this level.
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    /// Whether the level has no spots at all.
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Spots of the given class on this level.
    pub fn capacity(&self, vehicle_type: VehicleType) -> usize {
        self.ranges[vehicle_type.ordinal()].len()
    }

    /// Free spots of the given class. May be stale as soon as it returns.
    pub fn available(&self, vehicle_type: VehicleType) -> usize {
        self.spots_of(vehicle_type)
            .iter()
            .filter(|spot| spot.is_available())
            .count()
    }

    /// Lazily produced view of every spot, in construction order.
    pub fn snapshot(&self) -> impl Iterator<Item = SpotSnapshot> + '_ {
        self.spots.iter().map(ParkingSpot::snapshot)
    }

    fn spots_of(&self, vehicle_type: VehicleType) -> &[ParkingSpot] {
        &self.spots[self.ranges[vehicle_type.ordinal()].clone()]
    }

    /// First-fit search of the vehicle's class range.
    pub(crate) fn allocate(&self, vehicle: &Vehicle) -> Option<SpotId> {
        let candidates = self.spots_of(vehicle.vehicle_type);
        if candidates.is_empty() {
            return None;
        }
        let _search = self.search.lock();
        for spot in candidates {
            if spot.is_available() && spot.try_acquire(vehicle) {
                return Some(spot.id());
            }
        }
        tracing::debug!(
            "level {}: no free {} spot for {}",
            self.id,
            vehicle.vehicle_type,
            vehicle.license_plate
        );
        None
    }

    /// Free the spot holding `license_plate`, whatever its class.
    pub(crate) fn release(&self, license_plate: &str) -> Option<(SpotId, Vehicle)> {
        let _search = self.search.lock();
        self.spots.iter().find_map(|spot| {
            spot.try_release_plate(license_plate)
                .map(|vehicle| (spot.id(), vehicle))
        })
    }

    /// Spot currently holding `license_plate`, if any.
    pub(crate) fn locate(&self, license_plate: &str) -> Option<SpotId> {
        self.spots
            .iter()
            .find(|spot| spot.holds(license_plate))
            .map(ParkingSpot::id)
    }

    /// Park in one specific spot. Only the spot lock is taken.
    pub(crate) fn park_at(&self, index: usize, vehicle: &Vehicle) -> Result<SpotId, FacilityError> {
        let spot = self.spot(index)?;
        if spot.vehicle_type() != vehicle.vehicle_type {
            return Err(FacilityError::SpotClassMismatch {
                spot: spot.id(),
                expected: spot.vehicle_type(),
                actual: vehicle.vehicle_type,
            });
        }
        if spot.try_acquire(vehicle) {
            Ok(spot.id())
        } else {
            Err(FacilityError::SpotOccupied(spot.id()))
        }
    }

    /// Empty one specific spot.
    pub(crate) fn unpark_at(&self, index: usize) -> Result<(SpotId, Vehicle), FacilityError> {
        let spot = self.spot(index)?;
        spot.try_release()
            .map(|vehicle| (spot.id(), vehicle))
            .ok_or(FacilityError::SpotEmpty(spot.id()))
    }

    fn spot(&self, index: usize) -> Result<&ParkingSpot, FacilityError> {
        self.spots.get(index).ok_or(FacilityError::InvalidSpot {
            level: self.id,
            index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level() -> Level {
        Level::new(0, &LevelLayout::new(2, 2, 2))
    }

    #[test]
    fn test_ranges_follow_layout_order() {
        let level = Level::new(3, &LevelLayout::new(1, 2, 3));
        let ids: Vec<String> = level.snapshot().map(|s| s.id.to_string()).collect();
        assert_eq!(ids, ["3-M-0", "3-C-1", "3-C-2", "3-T-3", "3-T-4", "3-T-5"]);
        assert_eq!(level.len(), 6);
        assert_eq!(level.capacity(VehicleType::Truck), 3);
    }

    #[test]
    fn test_first_fit_in_construction_order() {
        let level = level();
        assert_eq!(level.allocate(&Vehicle::car("C1")).map(|s| s.index), Some(2));
        assert_eq!(level.allocate(&Vehicle::car("C2")).map(|s| s.index), Some(3));
        assert_eq!(level.allocate(&Vehicle::car("C3")), None);
        assert_eq!(level.available(VehicleType::Car), 0);
        assert_eq!(level.available(VehicleType::Truck), 2);
    }

    #[test]
    fn test_allocate_without_matching_class() {
        let level = Level::new(0, &LevelLayout::new(0, 3, 0));
        assert_eq!(level.allocate(&Vehicle::motorcycle("MOTO999")), None);
        assert_eq!(level.available(VehicleType::Car), 3);
    }

    #[test]
    fn test_release_scans_every_class() {
        let level = level();
        level.allocate(&Vehicle::truck("TRUCK555"));
        level.allocate(&Vehicle::motorcycle("MOTO999"));

        let (spot, vehicle) = level.release("TRUCK555").expect("truck parked");
        assert_eq!(spot.to_string(), "0-T-4");
        assert_eq!(vehicle.vehicle_type, VehicleType::Truck);
        assert!(level.release("TRUCK555").is_none());
        assert_eq!(level.locate("MOTO999").map(|s| s.index), Some(0));
    }

    #[test]
    fn test_park_at_errors() {
        let level = level();
        assert_eq!(
            level.park_at(9, &Vehicle::car("C1")),
            Err(FacilityError::InvalidSpot { level: 0, index: 9 })
        );
        assert!(matches!(
            level.park_at(0, &Vehicle::car("C1")),
            Err(FacilityError::SpotClassMismatch { expected: VehicleType::Motorcycle, .. })
        ));
        assert!(level.park_at(3, &Vehicle::car("C1")).is_ok());
        assert!(matches!(
            level.park_at(3, &Vehicle::car("C2")),
            Err(FacilityError::SpotOccupied(_))
        ));
    }

    #[test]
    fn test_unpark_at() {
        let level = level();
        assert!(matches!(level.unpark_at(1), Err(FacilityError::SpotEmpty(_))));
        level.park_at(1, &Vehicle::motorcycle("MOTO999")).unwrap();
        let (spot, vehicle) = level.unpark_at(1).unwrap();
        assert_eq!(spot.index, 1);
        assert_eq!(vehicle.license_plate, "MOTO999");
    }

    #[test]
    fn test_snapshot_reports_plates() {
        let level = level();
        level.allocate(&Vehicle::car("ABC123"));
        let occupied: Vec<SpotSnapshot> = level.snapshot().filter(|s| s.occupied).collect();
        assert_eq!(occupied.len(), 1);
        assert_eq!(occupied[0].license_plate.as_deref(), Some("ABC123"));
        assert_eq!(occupied[0].id.vehicle_type, VehicleType::Car);
    }
}
