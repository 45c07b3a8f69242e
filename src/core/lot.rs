//! The facility-wide allocator.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::config::FacilityLayout;
use crate::core::audit::{build_audit_event, AuditAction, AuditSink};
use crate::core::{FacilityError, Level, SpotId, SpotSnapshot, Vehicle, VehicleType};
use crate::sync::OnceCell;

/// Capacity and availability of one vehicle class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassStats {
    /// Vehicle class.
    pub vehicle_type: VehicleType,
    /// Spots of this class across all levels.
    pub capacity: usize,
    /// Spots of this class free at the time of the read.
    pub available: usize,
}

/// Statistics about facility utilization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityStats {
    /// Number of levels.
    pub levels: usize,
    /// Spots across all levels.
    pub capacity: usize,
    /// Spots occupied at the time of the read.
    pub occupied: usize,
    /// Per-class breakdown, in layout order.
    pub classes: Vec<ClassStats>,
    /// Successful parks since construction.
    pub parked_total: u64,
    /// Successful unparks since construction.
    pub released_total: u64,
    /// Refused requests since construction.
    pub rejected_total: u64,
}

/// Registry entry for one plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Claim {
    /// A park holding this ticket is still searching for a spot.
    Reserved(u64),
    /// The plate occupies this spot.
    Parked(SpotId),
}

#[derive(Debug, Default)]
struct FacilityCounters {
    parked: AtomicU64,
    released: AtomicU64,
    rejected: AtomicU64,
}

/// The parking facility: a fixed, ordered set of levels.
///
/// Parking fans out across levels in order and stops at the first level with
/// a free spot of the right class. Unparking fans out the same way, looking
/// for the plate. Neither waits: a request that finds nothing fails at once.
///
/// The process-wide instance comes from [`ParkingLot::get_instance`] or
/// [`ParkingLot::bootstrap`]; see [`FacilityCell`](crate::core::FacilityCell).
pub struct ParkingLot {
    levels: Vec<Level>,
    layout: FacilityLayout,
    /// Parked plates, and plates whose park is still in flight.
    registry: Option<DashMap<String, Claim>>,
    /// Source of reservation tickets.
    tickets: AtomicU64,
    audit: OnceCell<Arc<dyn AuditSink>>,
    counters: FacilityCounters,
}

impl ParkingLot {
    /// Build a facility from an already validated layout.
    pub(crate) fn new(layout: FacilityLayout) -> Self {
        let levels: Vec<Level> = layout
            .levels
            .iter()
            .enumerate()
            .map(|(id, level)| Level::new(id, level))
            .collect();
        let registry = layout.enforce_unique_occupants.then(DashMap::new);
        tracing::info!(
            "parking facility ready: {} levels, {} spots, unique occupants {}",
            levels.len(),
            layout.total(),
            if registry.is_some() { "enforced" } else { "not enforced" }
        );
        Self {
            levels,
            layout,
            registry,
            tickets: AtomicU64::new(0),
            audit: OnceCell::new(),
            counters: FacilityCounters::default(),
        }
    }

    /// Layout the facility was built from.
    pub const fn layout(&self) -> &FacilityLayout {
        &self.layout
    }

    /// Levels in search order.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Attach an audit sink. Only the first sink attached is kept.
    pub fn attach_audit(&self, sink: Arc<dyn AuditSink>) -> bool {
        let attached = self.audit.set(sink).is_ok();
        if !attached {
            tracing::warn!("audit sink already attached; ignoring replacement");
        }
        attached
    }

    /// Spots of the given class across all levels.
    pub fn capacity(&self, vehicle_type: VehicleType) -> usize {
        self.levels.iter().map(|level| level.capacity(vehicle_type)).sum()
    }

    /// Free spots of the given class. May be stale as soon as it returns.
    pub fn available(&self, vehicle_type: VehicleType) -> usize {
        self.levels.iter().map(|level| level.available(vehicle_type)).sum()
    }

    /// Park a vehicle in the first free spot of its class.
    pub fn allocate(&self, vehicle: &Vehicle) -> Result<SpotId, FacilityError> {
        let vehicle_type = vehicle.vehicle_type;
        if self.capacity(vehicle_type) == 0 {
            return Err(self.reject(vehicle, FacilityError::ClassMismatch(vehicle_type)));
        }
        let ticket = match self.reserve_plate(&vehicle.license_plate) {
            Ok(ticket) => ticket,
            Err(e) => return Err(self.reject(vehicle, e)),
        };

        for level in &self.levels {
            if let Some(spot) = level.allocate(vehicle) {
                self.confirm_plate(&vehicle.license_plate, ticket, spot);
                self.on_parked(vehicle, spot);
                return Ok(spot);
            }
        }

        self.abandon_plate(&vehicle.license_plate, ticket);
        Err(self.reject(vehicle, FacilityError::FacilityFull(vehicle_type)))
    }

    /// Unpark a vehicle by plate, returning the spot it left.
    pub fn release(&self, license_plate: &str) -> Result<SpotId, FacilityError> {
        for level in &self.levels {
            if let Some((spot, vehicle)) = level.release(license_plate) {
                self.forget_plate(license_plate);
                self.on_released(&vehicle, spot);
                return Ok(spot);
            }
        }
        tracing::warn!("vehicle {} not found in the facility", license_plate);
        self.counters.rejected.fetch_add(1, Ordering::Relaxed);
        self.record(AuditAction::Reject, license_plate, None, Some("not found".into()));
        Err(FacilityError::OccupantNotFound(license_plate.to_owned()))
    }

    /// Park a vehicle in one specific spot.
    pub fn park_at(
        &self,
        level: usize,
        index: usize,
        vehicle: &Vehicle,
    ) -> Result<SpotId, FacilityError> {
        let target = match self.level(level) {
            Ok(target) => target,
            Err(e) => return Err(self.reject(vehicle, e)),
        };
        let ticket = match self.reserve_plate(&vehicle.license_plate) {
            Ok(ticket) => ticket,
            Err(e) => return Err(self.reject(vehicle, e)),
        };
        match target.park_at(index, vehicle) {
            Ok(spot) => {
                self.confirm_plate(&vehicle.license_plate, ticket, spot);
                self.on_parked(vehicle, spot);
                Ok(spot)
            }
            Err(e) => {
                self.abandon_plate(&vehicle.license_plate, ticket);
                Err(self.reject(vehicle, e))
            }
        }
    }

    /// Empty one specific spot, returning the vehicle that held it.
    pub fn unpark_at(&self, level: usize, index: usize) -> Result<Vehicle, FacilityError> {
        let (spot, vehicle) = self.level(level)?.unpark_at(index)?;
        self.forget_plate(&vehicle.license_plate);
        self.on_released(&vehicle, spot);
        Ok(vehicle)
    }

    /// Spot currently holding `license_plate`, if any.
    pub fn locate(&self, license_plate: &str) -> Option<SpotId> {
        match &self.registry {
            Some(registry) => registry.get(license_plate).and_then(|claim| match *claim {
                Claim::Parked(spot) => Some(spot),
                Claim::Reserved(_) => None,
            }),
            None => self.levels.iter().find_map(|level| level.locate(license_plate)),
        }
    }

    /// Lazily produced view of every spot, level by level.
    pub fn snapshot(&self) -> impl Iterator<Item = SpotSnapshot> + '_ {
        self.levels.iter().flat_map(|level| level.snapshot())
    }

    /// Utilization statistics. Counts are read without a global lock.
    pub fn stats(&self) -> FacilityStats {
        let classes: Vec<ClassStats> = VehicleType::ALL
            .iter()
            .map(|&vehicle_type| ClassStats {
                vehicle_type,
                capacity: self.capacity(vehicle_type),
                available: self.available(vehicle_type),
            })
            .collect();
        let capacity = classes.iter().map(|c| c.capacity).sum();
        let available: usize = classes.iter().map(|c| c.available).sum();
        FacilityStats {
            levels: self.levels.len(),
            capacity,
            occupied: capacity - available,
            classes,
            parked_total: self.counters.parked.load(Ordering::Relaxed),
            released_total: self.counters.released.load(Ordering::Relaxed),
            rejected_total: self.counters.rejected.load(Ordering::Relaxed),
        }
    }

    fn level(&self, level: usize) -> Result<&Level, FacilityError> {
        self.levels.get(level).ok_or(FacilityError::InvalidLevel(level))
    }

    /// Claim the plate before searching and return the claim's ticket.
    /// The shard lock is dropped on return.
    fn reserve_plate(&self, license_plate: &str) -> Result<u64, FacilityError> {
        let ticket = self.tickets.fetch_add(1, Ordering::Relaxed);
        let Some(registry) = &self.registry else {
            return Ok(ticket);
        };
        match registry.entry(license_plate.to_owned()) {
            Entry::Occupied(_) => Err(FacilityError::AlreadyParked(license_plate.to_owned())),
            Entry::Vacant(slot) => {
                slot.insert(Claim::Reserved(ticket));
                Ok(ticket)
            }
        }
    }

    /// Record the spot if the plate still carries this park's ticket.
    ///
    /// An unpark may have dropped the claim in the meantime, and a later park
    /// of the same plate may have replaced it; either way the entry is left alone.
    fn confirm_plate(&self, license_plate: &str, ticket: u64, spot: SpotId) {
        if let Some(registry) = &self.registry {
            if let Some(mut claim) = registry.get_mut(license_plate) {
                if *claim == Claim::Reserved(ticket) {
                    *claim = Claim::Parked(spot);
                }
            }
        }
    }

    /// Drop a failed park's claim, only if it is still that park's.
    fn abandon_plate(&self, license_plate: &str, ticket: u64) {
        if let Some(registry) = &self.registry {
            registry.remove_if(license_plate, |_, claim| *claim == Claim::Reserved(ticket));
        }
    }

    /// Drop the plate once its vehicle has left. While this entry exists no
    /// other park of the plate can reserve, so there is no newer claim to spare.
    fn forget_plate(&self, license_plate: &str) {
        if let Some(registry) = &self.registry {
            registry.remove(license_plate);
        }
    }

    fn on_parked(&self, vehicle: &Vehicle, spot: SpotId) {
        self.counters.parked.fetch_add(1, Ordering::Relaxed);
        tracing::info!("vehicle {} parked at spot {}", vehicle.license_plate, spot);
        self.record(AuditAction::Park, &vehicle.license_plate, Some(spot), None);
    }

    fn on_released(&self, vehicle: &Vehicle, spot: SpotId) {
        self.counters.released.fetch_add(1, Ordering::Relaxed);
        tracing::info!("vehicle {} left spot {}", vehicle.license_plate, spot);
        self.record(AuditAction::Unpark, &vehicle.license_plate, Some(spot), None);
    }

    fn reject(&self, vehicle: &Vehicle, error: FacilityError) -> FacilityError {
        self.counters.rejected.fetch_add(1, Ordering::Relaxed);
        tracing::warn!("vehicle {} rejected: {}", vehicle.license_plate, error);
        self.record(
            AuditAction::Reject,
            &vehicle.license_plate,
            None,
            Some(error.to_string()),
        );
        error
    }

    fn record(
        &self,
        action: AuditAction,
        license_plate: &str,
        spot: Option<SpotId>,
        detail: Option<String>,
    ) {
        if let Some(sink) = self.audit.get() {
            sink.record(build_audit_event(action, license_plate, spot, detail));
        }
    }
}
