//! # Credibility Score
//!
//! A project's running trust rating. Anomaly reports subtract from it; it
//! never leaves `0..=100`.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const MAX_CREDIBILITY: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct CredibilityScore(u8);

impl CredibilityScore {
    /// Values above 100 are clamped.
    pub fn new(value: u8) -> Self {
        Self(value.min(MAX_CREDIBILITY))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Subtracts an unbounded penalty, flooring at zero.
    pub fn penalize(self, impact: u32) -> Self {
        let remaining = u32::from(self.0).saturating_sub(impact);
        // remaining <= self.0 <= 100
        Self(remaining as u8)
    }
}

impl Default for CredibilityScore {
    fn default() -> Self {
        Self(MAX_CREDIBILITY)
    }
}

impl From<u8> for CredibilityScore {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<CredibilityScore> for u8 {
    fn from(score: CredibilityScore) -> Self {
        score.0
    }
}

impl fmt::Display for CredibilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/100", self.0)
    }
}
