//! # Reference Data
//!
//! Fixed coefficients used by the calculator and the anomaly detector.
//! These are compile-time constants and are not configurable at runtime.

use crate::carbon::buffers::BufferSet;

/// Tonnes of CO2 sequestered per hectare per year.
pub const MANGROVE_FACTOR: f64 = 10.15;
pub const SEAGRASS_FACTOR: f64 = 8.7;
pub const SALT_MARSH_FACTOR: f64 = 6.8;
pub const KELP_FOREST_FACTOR: f64 = 12.3;

pub const DEFAULT_UNCERTAINTY_BUFFER: f64 = 10.0;
pub const DEFAULT_MORTALITY_BUFFER: f64 = 15.0;
pub const DEFAULT_VERIFICATION_BUFFER: f64 = 5.0;

pub const DEFAULT_BUFFERS: BufferSet = BufferSet {
    uncertainty: DEFAULT_UNCERTAINTY_BUFFER,
    mortality: DEFAULT_MORTALITY_BUFFER,
    verification: DEFAULT_VERIFICATION_BUFFER,
};

pub const DEFAULT_HORIZON_YEARS: u32 = 20;

pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Cars taken off the road for a year, per tonne of CO2 absorbed per year.
pub const CARS_REMOVED_PER_TON: f64 = 0.45;
/// Homes powered for a year, per tonne of CO2 absorbed per year.
pub const HOMES_POWERED_PER_TON: f64 = 0.12;
/// Trees planted, per tonne of cumulative CO2 absorbed.
pub const TREES_PLANTED_PER_TON: f64 = 16.0;

/// Slack over the nominal rate before an estimate counts as implausible.
pub const THEORETICAL_MAX_MARGIN: f64 = 1.5;
/// Growth ratio between consecutive snapshots above which expansion is flagged.
pub const MAX_AREA_GROWTH_RATE: f64 = 1.0;
/// 0.1 ha.
pub const MIN_PROJECT_AREA_M2: f64 = 1_000.0;

pub const AREA_EXPANSION_PENALTY: u32 = 25;
pub const THEORETICAL_MAX_PENALTY: u32 = 30;
pub const SMALL_AREA_PENALTY: u32 = 10;
