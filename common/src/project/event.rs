use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Registration,
    Verification,
    Calculation,
    NftMint,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            EventKind::Registration => "registration",
            EventKind::Verification => "verification",
            EventKind::Calculation => "calculation",
            EventKind::NftMint => "nft_mint",
        };
        f.write_str(tag)
    }
}

/// Returned by the ledger once an event is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerReceipt {
    /// `0x`-prefixed hex.
    pub tx_hash: String,
    pub block_number: u64,
}

/// Returned by the ledger once a credit token is minted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintReceipt {
    pub token_id: String,
    pub tx_hash: String,
    pub block_number: u64,
}

/// An event as the ledger stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub kind: EventKind,
    pub subject: String,
    pub payload: serde_json::Value,
    pub tx_hash: String,
    pub block_number: u64,
    pub recorded_at: DateTime<Utc>,
}
