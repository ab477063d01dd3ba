//! # Project Models
//!
//! A project is the unit owners register and verifiers decide on.
//!
//! * [`Project`]: The persisted entity, owned by the storage collaborator.
//! * [`ProjectSnapshot`]: The ephemeral view the anomaly detector scores.
//! * [`status::ProjectStatus`]: The review state machine.
//! * [`verification::VerificationRecord`]: The outcome of a verifier's decision.
//! * [`event`]: Entries written to the transaction ledger.

pub mod event;
pub mod status;
pub mod verification;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::carbon::buffers::BufferSet;
use crate::carbon::calculation::CalculationResult;
use crate::carbon::ecosystem::EcosystemType;
use crate::credibility::CredibilityScore;
use crate::error::{Error, Result};
use crate::reference;

pub use status::ProjectStatus;

pub type ProjectId = Uuid;

/// WGS84 coordinates. Deserialization goes through [`GeoPoint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = Error;

    fn try_from(raw: RawGeoPoint) -> Result<Self> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::invalid_input(format!(
                "coordinates out of range: ({latitude}, {longitude})"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// The calculation figures stored alongside a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonCalculation {
    pub annual_co2_absorption: f64,
    #[serde(default)]
    pub cumulative_co2_absorption: f64,
    #[serde(default = "default_horizon")]
    pub horizon_years: u32,
    #[serde(default = "Utc::now")]
    pub calculated_at: DateTime<Utc>,
}

fn default_horizon() -> u32 {
    reference::DEFAULT_HORIZON_YEARS
}

impl From<&CalculationResult> for CarbonCalculation {
    fn from(result: &CalculationResult) -> Self {
        Self {
            annual_co2_absorption: result.annual_co2_absorption,
            cumulative_co2_absorption: result.cumulative_co2_absorption,
            horizon_years: result.horizon_years,
            calculated_at: Utc::now(),
        }
    }
}

/// What an owner submits when registering a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    pub area_m2: f64,
    pub ecosystem: EcosystemType,
    #[serde(default = "default_horizon")]
    pub horizon_years: u32,
    #[serde(default)]
    pub buffers: BufferSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub location: Option<GeoPoint>,
    pub area_m2: f64,
    pub ecosystem: EcosystemType,
    pub status: ProjectStatus,
    pub carbon_calculation: Option<CarbonCalculation>,
    pub credibility_score: CredibilityScore,
    /// Flags from the most recent assessment. Empty until assessed.
    #[serde(default)]
    pub anomaly_flags: Vec<String>,
    pub token_id: Option<String>,
    pub tx_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Bumped by the store on every update; used for optimistic concurrency.
    #[serde(default)]
    pub version: u64,
}

impl Project {
    /// Builds a fresh `pending` project from a draft.
    pub fn from_draft(owner_id: impl Into<String>, draft: ProjectDraft) -> Result<Self> {
        if draft.name.trim().is_empty() {
            return Err(Error::invalid_input("project name must not be empty"));
        }
        if !draft.area_m2.is_finite() || draft.area_m2 <= 0.0 {
            return Err(Error::invalid_input(format!(
                "area must be positive, got {} m2",
                draft.area_m2
            )));
        }
        // The fields are public, so a hand-built point may not have been checked.
        let location = draft
            .location
            .map(|point| GeoPoint::new(point.latitude, point.longitude))
            .transpose()?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            name: draft.name,
            description: draft.description,
            location,
            area_m2: draft.area_m2,
            ecosystem: draft.ecosystem,
            status: ProjectStatus::Pending,
            carbon_calculation: None,
            credibility_score: CredibilityScore::default(),
            anomaly_flags: Vec::new(),
            token_id: None,
            tx_hash: None,
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    /// The view of this project the anomaly detector works on.
    pub fn snapshot(&self) -> Result<ProjectSnapshot> {
        let carbon_calculation = self.carbon_calculation.clone().ok_or_else(|| {
            Error::invalid_input(format!("project {} has no carbon calculation", self.id))
        })?;

        Ok(ProjectSnapshot {
            area_m2: self.area_m2,
            ecosystem: self.ecosystem,
            carbon_calculation,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub area_m2: f64,
    pub ecosystem: EcosystemType,
    pub carbon_calculation: CarbonCalculation,
}

/// Selects projects when listing. `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub owner_id: Option<String>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        self.status.is_none_or(|s| s == project.status)
            && self
                .owner_id
                .as_deref()
                .is_none_or(|owner| owner == project.owner_id)
    }
}
