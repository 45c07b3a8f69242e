//! Fluent construction of facility layouts and bootstrapping.

use std::sync::Arc;

use crate::config::{FacilityLayout, LevelLayout};
use crate::core::{AuditSink, FacilityCell, FacilityError, ParkingLot};

/// Builds a [`FacilityLayout`] level by level and bootstraps a facility from it.
///
/// ```
/// use parking_facility::builders::FacilityBuilder;
/// use parking_facility::core::{FacilityCell, Vehicle};
///
/// let cell = FacilityCell::new();
/// let lot = FacilityBuilder::new()
///     .uniform_levels(2, 6)
///     .bootstrap_in(&cell)?;
/// assert_eq!(lot.allocate(&Vehicle::motorcycle("MOTO999"))?.to_string(), "0-M-0");
/// # Ok::<(), parking_facility::core::FacilityError>(())
/// ```
#[derive(Default)]
pub struct FacilityBuilder {
    levels: Vec<LevelLayout>,
    enforce_unique_occupants: Option<bool>,
    audit: Option<Arc<dyn AuditSink>>,
}

impl FacilityBuilder {
    /// Start with no levels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing layout.
    pub fn from_layout(layout: FacilityLayout) -> Self {
        Self {
            levels: layout.levels,
            enforce_unique_occupants: Some(layout.enforce_unique_occupants),
            audit: None,
        }
    }

    /// Append a level with explicit per-class counts.
    #[must_use]
    pub fn level(mut self, level: LevelLayout) -> Self {
        self.levels.push(level);
        self
    }

    /// Append a level of `spots` split evenly across classes.
    #[must_use]
    pub fn uniform_level(self, spots: usize) -> Self {
        self.level(LevelLayout::even_split(spots))
    }

    /// Append `count` levels of `spots_per_level` each.
    #[must_use]
    pub fn uniform_levels(mut self, count: usize, spots_per_level: usize) -> Self {
        self.levels
            .extend(std::iter::repeat_n(LevelLayout::even_split(spots_per_level), count));
        self
    }

    /// Switch the occupant registry on or off (on by default).
    #[must_use]
    pub fn enforce_unique_occupants(mut self, enforce: bool) -> Self {
        self.enforce_unique_occupants = Some(enforce);
        self
    }

    /// Attach an audit sink once the facility is built.
    #[must_use]
    pub fn with_audit(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(sink);
        self
    }

    /// Levels added so far.
    pub fn levels(&self) -> &[LevelLayout] {
        &self.levels
    }

    /// The validated layout.
    pub fn build_layout(&self) -> Result<FacilityLayout, FacilityError> {
        let layout = FacilityLayout::new(self.levels.clone())
            .with_unique_occupants(self.enforce_unique_occupants.unwrap_or(true));
        layout.validate().map_err(FacilityError::InvalidLayout)?;
        Ok(layout)
    }

    /// Bootstrap the facility held by `cell`.
    pub fn bootstrap_in(self, cell: &FacilityCell) -> Result<&ParkingLot, FacilityError> {
        let lot = cell.bootstrap(self.build_layout()?)?;
        if let Some(sink) = self.audit {
            lot.attach_audit(sink);
        }
        Ok(lot)
    }

    /// Bootstrap the process-wide facility.
    pub fn bootstrap(self) -> Result<&'static ParkingLot, FacilityError> {
        let lot = ParkingLot::bootstrap(self.build_layout()?)?;
        if let Some(sink) = self.audit {
            lot.attach_audit(sink);
        }
        Ok(lot)
    }
}
