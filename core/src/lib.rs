//! # Blue Carbon Core
//!
//! The registry's engine, laid out along hexagonal lines:
//!
//! * **[`calculator`]** and **[`anomaly`]**: Pure domain algorithms. No IO,
//!   no shared state, safe to call from any number of threads.
//! * **[`workflow`]**: Application service orchestrating the algorithms and
//!   the outbound ports.
//! * **[`ports`]**: Traits for the storage and ledger collaborators.
//! * **[`adapters`]**: In-process implementations of those traits.

pub mod adapters;
pub mod anomaly;
pub mod calculator;
pub mod ports;
pub mod workflow;
