//! Facility layout descriptors: how many levels, and how each level's spots
//! are split across vehicle classes.

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

use crate::core::{AppResult, VehicleType};

/// Path to a JSON layout file.
pub const LAYOUT_PATH_ENV: &str = "PARKING_FACILITY_LAYOUT";
/// Number of levels for a uniform layout.
pub const LEVELS_ENV: &str = "PARKING_FACILITY_LEVELS";
/// Spots per level for a uniform layout.
pub const SPOTS_PER_LEVEL_ENV: &str = "PARKING_FACILITY_SPOTS_PER_LEVEL";

/// Levels in the default layout.
pub const DEFAULT_LEVELS: usize = 1;
/// Spots per level in the default layout.
pub const DEFAULT_SPOTS_PER_LEVEL: usize = 10;

/// Most levels a facility may have.
pub const MAX_LEVELS: usize = 1024;
/// Most spots a single level may have.
pub const MAX_SPOTS_PER_LEVEL: usize = 65_536;

/// Per-class spot counts for one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Motorcycle spots, laid out first.
    #[serde(default)]
    pub motorcycle: usize,
    /// Car spots, laid out second.
    #[serde(default)]
    pub car: usize,
    /// Truck spots, laid out last.
    #[serde(default)]
    pub truck: usize,
}

impl LevelLayout {
    /// Explicit per-class counts.
    pub const fn new(motorcycle: usize, car: usize, truck: usize) -> Self {
        Self {
            motorcycle,
            car,
            truck,
        }
    }

    /// Split `total` spots into equal thirds; the remainder goes to trucks.
    pub const fn even_split(total: usize) -> Self {
        let third = total / 3;
        Self::new(third, third, total - 2 * third)
    }

    /// Spots of the given class.
    pub const fn count(&self, vehicle_type: VehicleType) -> usize {
        match vehicle_type {
            VehicleType::Motorcycle => self.motorcycle,
            VehicleType::Car => self.car,
            VehicleType::Truck => self.truck,
        }
    }

    /// Spots across all classes, saturating at `usize::MAX`.
    pub const fn total(&self) -> usize {
        self.motorcycle.saturating_add(self.car).saturating_add(self.truck)
    }

    /// Spots across all classes, or `None` on overflow.
    pub fn checked_total(&self) -> Option<usize> {
        self.motorcycle.checked_add(self.car)?.checked_add(self.truck)
    }
}

const fn default_enforce_unique_occupants() -> bool {
    true
}

/// Layout of the whole facility, fixed for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityLayout {
    /// Levels in search order.
    pub levels: Vec<LevelLayout>,
    /// Reject parking a plate that is already parked somewhere.
    ///
    /// When disabled, keeping one outstanding assignment per plate is the
    /// caller's responsibility.
    #[serde(default = "default_enforce_unique_occupants")]
    pub enforce_unique_occupants: bool,
}

impl Default for FacilityLayout {
    fn default() -> Self {
        Self::uniform(DEFAULT_LEVELS, DEFAULT_SPOTS_PER_LEVEL)
    }
}

impl FacilityLayout {
    /// Layout from explicit levels, with unique occupants enforced.
    pub fn new(levels: Vec<LevelLayout>) -> Self {
        Self {
            levels,
            enforce_unique_occupants: true,
        }
    }

    /// `levels` identical levels, each split evenly across classes.
    pub fn uniform(levels: usize, spots_per_level: usize) -> Self {
        Self::new(vec![LevelLayout::even_split(spots_per_level); levels])
    }

    /// Same layout with the occupant registry switched on or off.
    #[must_use]
    pub fn with_unique_occupants(mut self, enforce: bool) -> Self {
        self.enforce_unique_occupants = enforce;
        self
    }

    /// Spots of the given class across all levels.
    pub fn capacity(&self, vehicle_type: VehicleType) -> usize {
        self.levels
            .iter()
            .fold(0, |acc: usize, level| acc.saturating_add(level.count(vehicle_type)))
    }

    /// Spots across all levels and classes.
    pub fn total(&self) -> usize {
        self.levels
            .iter()
            .fold(0, |acc: usize, level| acc.saturating_add(level.total()))
    }

    /// Validate layout values.
    pub fn validate(&self) -> Result<(), String> {
        if self.levels.is_empty() {
            return Err("at least one level must be defined".into());
        }
        if self.levels.len() > MAX_LEVELS {
            return Err(format!(
                "{} levels exceed the limit of {MAX_LEVELS}",
                self.levels.len()
            ));
        }
        for (id, level) in self.levels.iter().enumerate() {
            let total = level
                .checked_total()
                .ok_or_else(|| format!("level {id} spot count overflows"))?;
            if total == 0 {
                return Err(format!("level {id} has no spots"));
            }
            if total > MAX_SPOTS_PER_LEVEL {
                return Err(format!(
                    "level {id} has {total} spots, above the limit of {MAX_SPOTS_PER_LEVEL}"
                ));
            }
        }
        Ok(())
    }

    /// Parse a layout from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let layout: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Load a layout from the process environment, reading `.env` first.
    ///
    /// `PARKING_FACILITY_LAYOUT` names a JSON layout file and takes precedence;
    /// otherwise `PARKING_FACILITY_LEVELS` and `PARKING_FACILITY_SPOTS_PER_LEVEL`
    /// describe a uniform layout, each defaulting to the values of
    /// [`FacilityLayout::default`].
    pub fn from_env() -> AppResult<Self> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("no .env file loaded: {}", e);
        }
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load a layout using `lookup` to resolve environment variables.
    pub fn from_vars<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(LAYOUT_PATH_ENV) {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read layout file `{path}`"))?;
            return Self::from_json_str(&raw)
                .map_err(|e| anyhow!("layout file `{path}` invalid: {e}"));
        }

        let levels = parse_count(&lookup, LEVELS_ENV)?.unwrap_or(DEFAULT_LEVELS);
        let spots = parse_count(&lookup, SPOTS_PER_LEVEL_ENV)?.unwrap_or(DEFAULT_SPOTS_PER_LEVEL);
        // Checked before the level list is allocated.
        if levels > MAX_LEVELS {
            return Err(anyhow!("{LEVELS_ENV} is {levels}, above the limit of {MAX_LEVELS}"));
        }
        let layout = Self::uniform(levels, spots);
        layout
            .validate()
            .map_err(|e| anyhow!("layout from environment invalid: {e}"))?;
        Ok(layout)
    }
}

fn parse_count<F>(lookup: &F, key: &str) -> AppResult<Option<usize>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<usize>()
                .with_context(|| format!("{key} must be a non-negative integer, got `{raw}`"))
        })
        .transpose()
}
