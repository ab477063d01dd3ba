use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use tracing::debug;

use bluecarbon_common::project::event::{EventKind, LedgerReceipt, LoggedEvent, MintReceipt};
use bluecarbon_common::{Error, Result};

use crate::ports::ledger::Ledger;

const GENESIS_BLOCK: u64 = 1_000_000;

/// Stand-in for a blockchain: every call waits a random time inside
/// `latency`, then answers with a fresh random hash and the next block number.
pub struct MockLedger {
    latency: (Duration, Duration),
    next_block: AtomicU64,
    next_token: AtomicU64,
    events: Mutex<Vec<LoggedEvent>>,
}

impl MockLedger {
    pub fn new(latency: (Duration, Duration)) -> Self {
        Self {
            latency,
            next_block: AtomicU64::new(GENESIS_BLOCK),
            next_token: AtomicU64::new(1),
            events: Mutex::new(Vec::new()),
        }
    }

    /// No delay. Hashes stay random.
    pub fn instant() -> Self {
        Self::new((Duration::ZERO, Duration::ZERO))
    }

    /// Everything logged so far, in order.
    pub fn events(&self) -> Result<Vec<LoggedEvent>> {
        self.events
            .lock()
            .map(|events| events.clone())
            .map_err(|_| Error::unavailable("ledger", "event log poisoned"))
    }

    async fn confirm(&self) -> (String, u64) {
        let (min, max) = self.latency;
        let delay: Duration = if max > min {
            let (lo, hi) = (min.as_millis() as u64, max.as_millis() as u64);
            Duration::from_millis(rand::rng().random_range(lo..=hi))
        } else {
            min
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let block_number = self.next_block.fetch_add(1, Ordering::Relaxed);
        (random_tx_hash(), block_number)
    }
}

fn random_tx_hash() -> String {
    let bytes: [u8; 32] = rand::random();
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("0x{hex}")
}

#[async_trait]
impl Ledger for MockLedger {
    async fn log_event(
        &self,
        kind: EventKind,
        subject: &str,
        payload: serde_json::Value,
    ) -> Result<LedgerReceipt> {
        let (tx_hash, block_number) = self.confirm().await;
        debug!(%kind, subject, %tx_hash, block_number, "ledger event recorded");

        let event = LoggedEvent {
            kind,
            subject: subject.to_string(),
            payload,
            tx_hash: tx_hash.clone(),
            block_number,
            recorded_at: Utc::now(),
        };
        self.events
            .lock()
            .map_err(|_| Error::unavailable("ledger", "event log poisoned"))?
            .push(event);

        Ok(LedgerReceipt {
            tx_hash,
            block_number,
        })
    }

    async fn mint(&self, subject: &str) -> Result<MintReceipt> {
        let (tx_hash, block_number) = self.confirm().await;
        let token_id = format!("BCC-{:06}", self.next_token.fetch_add(1, Ordering::Relaxed));
        debug!(subject, %token_id, %tx_hash, "credit token minted");

        Ok(MintReceipt {
            token_id,
            tx_hash,
            block_number,
        })
    }
}
