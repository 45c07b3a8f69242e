//! Configuration models for facility layouts.

pub mod layout;

pub use layout::{FacilityLayout, LevelLayout};
