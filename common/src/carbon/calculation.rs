use serde::{Deserialize, Serialize};

use crate::carbon::buffers::BufferSet;
use crate::carbon::ecosystem::EcosystemType;
use crate::reference;

/// Input for the forward (area to absorption) calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaInput {
    pub area_m2: f64,
    pub ecosystem: EcosystemType,
    #[serde(default = "default_horizon")]
    pub horizon_years: u32,
    #[serde(default)]
    pub buffers: BufferSet,
}

impl AreaInput {
    /// Uses the default 20 year horizon and reference buffers.
    pub fn new(area_m2: f64, ecosystem: EcosystemType) -> Self {
        Self {
            area_m2,
            ecosystem,
            horizon_years: reference::DEFAULT_HORIZON_YEARS,
            buffers: BufferSet::default(),
        }
    }

    pub fn with_horizon(mut self, horizon_years: u32) -> Self {
        self.horizon_years = horizon_years;
        self
    }

    pub fn with_buffers(mut self, buffers: BufferSet) -> Self {
        self.buffers = buffers;
        self
    }
}

/// Input for the inverse (policy) calculation: how much land reaches a target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetInput {
    pub target_co2_tons: f64,
    pub ecosystem: EcosystemType,
    #[serde(default = "default_horizon")]
    pub horizon_years: u32,
    #[serde(default)]
    pub buffers: BufferSet,
}

impl TargetInput {
    pub fn new(target_co2_tons: f64, ecosystem: EcosystemType) -> Self {
        Self {
            target_co2_tons,
            ecosystem,
            horizon_years: reference::DEFAULT_HORIZON_YEARS,
            buffers: BufferSet::default(),
        }
    }

    pub fn with_horizon(mut self, horizon_years: u32) -> Self {
        self.horizon_years = horizon_years;
        self
    }

    pub fn with_buffers(mut self, buffers: BufferSet) -> Self {
        self.buffers = buffers;
        self
    }
}

fn default_horizon() -> u32 {
    reference::DEFAULT_HORIZON_YEARS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    Standard,
    Policy,
}

/// Everyday comparisons for an amount of sequestered CO2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImpactEquivalences {
    pub cars_removed: u64,
    pub homes_powered: u64,
    pub trees_planted: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub mode: CalculationMode,
    pub ecosystem: EcosystemType,
    pub horizon_years: u32,
    pub buffers: BufferSet,
    /// Tonnes per year, 2 decimals.
    pub annual_co2_absorption: f64,
    /// Tonnes over the whole horizon, 2 decimals.
    pub cumulative_co2_absorption: f64,
    pub equivalences: ImpactEquivalences,
    /// Only set in [`CalculationMode::Policy`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_area_m2: Option<u64>,
}
