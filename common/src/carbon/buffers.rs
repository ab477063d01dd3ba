use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::reference;

/// Percentage discounts applied to gross absorption.
///
/// The three components are summed and removed from 100%: a set of
/// `10 / 15 / 5` keeps 70% of the gross estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BufferSet {
    /// Measurement uncertainty.
    pub uncertainty: f64,
    /// Risk of ecosystem die-off.
    pub mortality: f64,
    /// Third-party verification overhead.
    pub verification: f64,
}

impl Default for BufferSet {
    fn default() -> Self {
        reference::DEFAULT_BUFFERS
    }
}

impl BufferSet {
    pub fn new(uncertainty: f64, mortality: f64, verification: f64) -> Self {
        Self {
            uncertainty,
            mortality,
            verification,
        }
    }

    pub fn total(&self) -> f64 {
        self.uncertainty + self.mortality + self.verification
    }

    /// Rejects negative or non-finite components and totals of 100% or more.
    pub fn validate(&self) -> Result<()> {
        let components = [
            ("uncertainty", self.uncertainty),
            ("mortality", self.mortality),
            ("verification", self.verification),
        ];
        for (name, value) in components {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid_input(format!(
                    "{name} buffer must be a non-negative percentage, got {value}"
                )));
            }
        }
        if self.total() >= 100.0 {
            return Err(Error::invalid_input(format!(
                "buffers must sum to less than 100%, got {}%",
                self.total()
            )));
        }
        Ok(())
    }

    /// Share of gross absorption kept after discounting, in `(0, 1]`.
    ///
    /// Both calculator modes go through this function.
    pub fn factor(&self) -> Result<f64> {
        self.validate()?;
        Ok((100.0 - self.total()) / 100.0)
    }
}
