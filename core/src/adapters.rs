//! # Adapters (Infrastructure)
//!
//! In-process implementations of the [`crate::ports`].
//!
//! * [`memory_store::InMemoryProjectStore`]: A versioned project store.
//! * [`mock_ledger::MockLedger`]: A ledger that answers after a random delay
//!   with random transaction hashes.
//!
//! Both are enough to drive the whole workflow from the CLI or from tests.
//! Production deployments swap them for real storage and ledger clients.

pub mod memory_store;
pub mod mock_ledger;
