//! One-time construction of the facility.
//!
//! [`FacilityCell`] builds a [`ParkingLot`] at most once, even when many
//! threads race on first access: an unlocked fast-path check, then the
//! construction guard, then a second check before building. The process-wide
//! facility lives in a `static` cell behind [`ParkingLot::get_instance`] and
//! [`ParkingLot::bootstrap`].
//!
//! ```
//! use parking_facility::config::FacilityLayout;
//! use parking_facility::core::{FacilityCell, FacilityError};
//!
//! let cell = FacilityCell::new();
//! let lot = cell.bootstrap(FacilityLayout::uniform(2, 6))?;
//! assert!(std::ptr::eq(lot, cell.bootstrap(FacilityLayout::uniform(2, 6))?));
//! assert_eq!(
//!     cell.bootstrap(FacilityLayout::uniform(3, 6)).err(),
//!     Some(FacilityError::DoubleConstruction)
//! );
//! assert_eq!(cell.constructions(), 1);
//! # Ok::<(), FacilityError>(())
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::FacilityLayout;
use crate::core::{FacilityError, ParkingLot};
use crate::sync::{const_mutex, Mutex, OnceCell};

static FACILITY: FacilityCell = FacilityCell::new();

/// A slot holding at most one facility for its whole lifetime.
pub struct FacilityCell {
    instance: OnceCell<ParkingLot>,
    guard: Mutex<()>,
    constructions: AtomicUsize,
}

impl Default for FacilityCell {
    fn default() -> Self {
        Self::new()
    }
}

impl FacilityCell {
    /// Create an empty cell.
    pub const fn new() -> Self {
        Self {
            instance: OnceCell::new(),
            guard: const_mutex(()),
            constructions: AtomicUsize::new(0),
        }
    }

    /// The facility, if it has been built.
    pub fn get(&self) -> Option<&ParkingLot> {
        self.instance.get()
    }

    /// How many times this cell has built a facility. Never more than one.
    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::Acquire)
    }

    /// The facility, building it from the default layout on first access.
    pub fn get_or_default(&self) -> &ParkingLot {
        self.get_or_build(FacilityLayout::default)
    }

    /// Build the facility from `layout`, or return the existing one.
    ///
    /// Repeating the call with an equal layout is a no-op. A different layout
    /// fails with [`FacilityError::DoubleConstruction`], since a live
    /// facility's layout never changes.
    pub fn bootstrap(&self, layout: FacilityLayout) -> Result<&ParkingLot, FacilityError> {
        layout.validate().map_err(FacilityError::InvalidLayout)?;
        let lot = self.get_or_build(|| layout.clone());
        if lot.layout() == &layout {
            Ok(lot)
        } else {
            tracing::error!("facility already built with a different layout");
            Err(FacilityError::DoubleConstruction)
        }
    }

    fn get_or_build<F>(&self, layout: F) -> &ParkingLot
    where
        F: FnOnce() -> FacilityLayout,
    {
        if let Some(lot) = self.instance.get() {
            return lot;
        }
        let _guard = self.guard.lock();
        if let Some(lot) = self.instance.get() {
            return lot;
        }
        let lot = ParkingLot::new(layout());
        self.constructions.fetch_add(1, Ordering::AcqRel);
        self.instance.get_or_init(|| lot)
    }
}

impl ParkingLot {
    /// The process-wide facility, built from the default layout if nothing
    /// has bootstrapped it yet.
    pub fn get_instance() -> &'static Self {
        FACILITY.get_or_default()
    }

    /// Build the process-wide facility from `layout`, or return it if it
    /// already exists with the same layout.
    pub fn bootstrap(layout: FacilityLayout) -> Result<&'static Self, FacilityError> {
        FACILITY.bootstrap(layout)
    }

    /// The process-wide facility, if it has been built.
    pub fn try_instance() -> Option<&'static Self> {
        FACILITY.get()
    }

    /// How many times the process-wide facility has been built.
    pub fn construction_count() -> usize {
        FACILITY.constructions()
    }
}
