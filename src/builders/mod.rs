//! Builders to construct facilities from layouts.

pub mod facility_builder;

pub use facility_builder::FacilityBuilder;
