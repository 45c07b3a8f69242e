//! # Parking Facility
//!
//! A concurrent, type-partitioned spot allocator for multi-level parking
//! facilities.
//!
//! A facility holds a fixed inventory of spots. Every spot accepts exactly one
//! class of vehicle (motorcycle, car, or truck), and spots are grouped into
//! levels whose per-class split is fixed at construction. Many threads may
//! park and unpark at once; the allocator guarantees that no spot is ever
//! handed to two vehicles and that no assignment is silently lost.
//!
//! ## Key Features
//!
//! - **Layered Locking**: Each spot guards its own occupant; each level
//!   serializes only its search phase. There is no facility-wide lock.
//! - **First-Fit Placement**: Levels are tried in order, and spots within a
//!   level in construction order, so placements are reproducible.
//! - **Non-Blocking**: A request that finds no free spot fails at once with
//!   [`core::FacilityError::FacilityFull`]; nothing queues or waits.
//! - **One Facility Per Process**: [`core::ParkingLot::get_instance`] builds
//!   the facility exactly once, even under concurrent first access.
//! - **Unique Occupants**: A plate holds at most one spot unless the layout
//!   opts out.
//! - **Audit Trail**: Optional sinks receive every park, unpark, and rejection.
//!
//! ## Usage
//!
//! ```
//! use parking_facility::config::FacilityLayout;
//! use parking_facility::core::{FacilityCell, FacilityError, Vehicle, VehicleType};
//!
//! // Two levels of six spots, split two motorcycle / two car / two truck.
//! let cell = FacilityCell::new();
//! let lot = cell.bootstrap(FacilityLayout::uniform(2, 6))?;
//!
//! let spot = lot.allocate(&Vehicle::car("ABC123"))?;
//! assert_eq!(spot.to_string(), "0-C-2");
//! assert_eq!(lot.available(VehicleType::Car), 3);
//!
//! assert_eq!(lot.release("ABC123")?, spot);
//! assert_eq!(
//!     lot.release("ABC123"),
//!     Err(FacilityError::OccupantNotFound("ABC123".into()))
//! );
//! # Ok::<(), FacilityError>(())
//! ```
//!
//! Applications normally use the process-wide facility instead of a local
//! cell: call [`core::ParkingLot::bootstrap`] once at startup (for example with
//! [`config::FacilityLayout::from_env`]) and [`core::ParkingLot::get_instance`]
//! everywhere else.
//!
//! For complete examples, see:
//! - `tests/facility_algorithm_test.rs` - placement and error scenarios
//! - `tests/concurrency_test.rs` - stress tests of the invariants

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core allocation: spots, levels, the facility, and its bootstrap.
pub mod core;
/// Configuration models for facility layouts.
pub mod config;
/// Builders to construct facilities from layouts.
pub mod builders;
/// Synchronization primitives used by the facility.
pub mod sync;
/// Shared utilities.
pub mod util;
