//! # Carbon Models
//!
//! Value objects describing what goes into and comes out of a sequestration
//! calculation.
//!
//! * [`ecosystem::EcosystemType`]: The coastal ecosystem being restored.
//! * [`buffers::BufferSet`]: Conservative discounts applied to gross absorption.
//! * [`calculation::CalculationResult`]: Output of the calculator, both modes.

pub mod buffers;
pub mod calculation;
pub mod ecosystem;
