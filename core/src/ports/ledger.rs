use async_trait::async_trait;

use bluecarbon_common::Result;
use bluecarbon_common::project::event::{EventKind, LedgerReceipt, MintReceipt};

/// An append-only transaction log.
///
/// Calls are slow and their identifiers are not predictable; callers must not
/// assume either. Failures surface as
/// [`bluecarbon_common::Error::CollaboratorUnavailable`].
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn log_event(
        &self,
        kind: EventKind,
        subject: &str,
        payload: serde_json::Value,
    ) -> Result<LedgerReceipt>;

    /// Mints a credit token for `subject`.
    async fn mint(&self, subject: &str) -> Result<MintReceipt>;
}
