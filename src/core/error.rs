//! Error types for facility operations.

use thiserror::Error;

use crate::core::{SpotId, VehicleType};

/// Errors produced by the facility.
///
/// Every variant is an ordinary negative result: none of them leaves a spot
/// half-occupied, and none is retried by the facility itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FacilityError {
    /// No spot anywhere in the facility accepts this class.
    #[error("no spots accept {0} vehicles")]
    ClassMismatch(VehicleType),
    /// Every spot of this class is taken. The caller may retry later.
    #[error("facility full for {0} vehicles")]
    FacilityFull(VehicleType),
    /// Release requested for a plate that is not parked.
    #[error("vehicle {0} not found")]
    OccupantNotFound(String),
    /// Bootstrap requested with a layout that differs from the live facility.
    #[error("facility already constructed with a different layout")]
    DoubleConstruction,
    /// The plate already holds a spot.
    #[error("vehicle {0} is already parked")]
    AlreadyParked(String),
    /// Layout failed validation.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
    /// Level number out of range.
    #[error("invalid level {0}")]
    InvalidLevel(usize),
    /// Spot index out of range for its level.
    #[error("invalid spot {index} on level {level}")]
    InvalidSpot {
        /// Level that was addressed.
        level: usize,
        /// Spot index that was addressed.
        index: usize,
    },
    /// A specific spot was requested for a vehicle of another class.
    #[error("spot {spot} accepts {expected} vehicles, not {actual}")]
    SpotClassMismatch {
        /// Spot that was addressed.
        spot: SpotId,
        /// Class the spot accepts.
        expected: VehicleType,
        /// Class of the vehicle presented.
        actual: VehicleType,
    },
    /// A specific spot was requested but is taken.
    #[error("spot {0} is already occupied")]
    SpotOccupied(SpotId),
    /// A specific spot was emptied but held nothing.
    #[error("spot {0} is empty")]
    SpotEmpty(SpotId),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
