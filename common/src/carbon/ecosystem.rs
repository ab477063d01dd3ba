use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::reference;

/// The coastal ecosystem a project restores or conserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EcosystemType {
    Mangrove,
    Seagrass,
    SaltMarsh,
    KelpForest,
}

impl EcosystemType {
    pub const ALL: [EcosystemType; 4] = [
        EcosystemType::Mangrove,
        EcosystemType::Seagrass,
        EcosystemType::SaltMarsh,
        EcosystemType::KelpForest,
    ];

    /// Nominal sequestration rate in tonnes of CO2 per hectare per year.
    pub fn sequestration_factor(self) -> f64 {
        match self {
            EcosystemType::Mangrove => reference::MANGROVE_FACTOR,
            EcosystemType::Seagrass => reference::SEAGRASS_FACTOR,
            EcosystemType::SaltMarsh => reference::SALT_MARSH_FACTOR,
            EcosystemType::KelpForest => reference::KELP_FOREST_FACTOR,
        }
    }

    /// Highest per-hectare annual rate still considered plausible.
    pub fn theoretical_max(self) -> f64 {
        self.sequestration_factor() * reference::THEORETICAL_MAX_MARGIN
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            EcosystemType::Mangrove => "mangrove",
            EcosystemType::Seagrass => "seagrass",
            EcosystemType::SaltMarsh => "salt_marsh",
            EcosystemType::KelpForest => "kelp_forest",
        }
    }
}

impl fmt::Display for EcosystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for EcosystemType {
    type Err = Error;

    /// Parses the snake_case tag. Hyphens and case are tolerated
    /// (`Salt-Marsh` parses as [`EcosystemType::SaltMarsh`]).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase().replace('-', "_");
        EcosystemType::ALL
            .into_iter()
            .find(|eco| eco.as_tag() == tag)
            .ok_or_else(|| Error::invalid_input(format!("unknown ecosystem type: {s}")))
    }
}
