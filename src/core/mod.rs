//! Core allocation: spots, levels, the facility, and its one-time bootstrap.

pub mod audit;
pub mod bootstrap;
pub mod error;
pub mod level;
pub mod lot;
mod spot;
pub mod vehicle;

pub use audit::{
    build_audit_event, AuditAction, AuditEvent, AuditSink, InMemoryAuditSink, TracingAuditSink,
};
pub use bootstrap::FacilityCell;
pub use error::{AppResult, FacilityError};
pub use level::Level;
pub use lot::{ClassStats, FacilityStats, ParkingLot};
pub use spot::{SpotId, SpotSnapshot};
pub use vehicle::{Vehicle, VehicleType};
