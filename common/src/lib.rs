//! # Blue Carbon Common
//!
//! Shared domain models for the blue carbon registry.
//!
//! Everything in this crate is a value object: pure Rust, no IO, no async.
//! The calculation and scoring engines in `bluecarbon-core` and the CLI both
//! build on these types.
//!
//! ## Contents
//! * **[`carbon`]**: Ecosystem tags, buffer sets and calculation results.
//! * **[`reference`]**: Fixed sequestration factors and impact ratios.
//! * **[`project`]**: Projects, their status machine and verification records.
//! * **[`credibility`]**: The clamped credibility score.
//! * **[`error`]**: The shared error type.

pub mod carbon;
pub mod config;
pub mod credibility;
pub mod error;
pub mod project;
pub mod reference;

pub use error::{Error, ErrorKind, Result};
