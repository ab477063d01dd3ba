//! # Ports (Boundaries)
//!
//! Traits isolating the verification workflow from its collaborators.
//!
//! * **[`storage`]**: Where projects and verification records live.
//! * **[`ledger`]**: Where auditable events are written.
//!
//! The workflow depends only on these traits. Concrete implementations live in
//! [`crate::adapters`], and tests substitute their own doubles.

pub mod ledger;
pub mod storage;
