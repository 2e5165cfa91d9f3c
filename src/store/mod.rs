//! Snapshot persistence
//!
//! Serializes the three persisted tables (open positions, append-only
//! trade history, single-row account state) plus the position id
//! counter to a JSON document, for hosts that need durability.

use crate::account::AccountState;
use crate::ledger::{Position, TradeRecord};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A consistent point-in-time copy of engine state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Single-row account state
    pub account: AccountState,
    /// Positions still open at snapshot time
    pub open_positions: Vec<Position>,
    /// Append-only settled trade history
    pub trade_history: Vec<TradeRecord>,
    /// Next identifier the ledger will assign; persisting it keeps ids
    /// unique across restarts
    pub next_position_id: u64,
}

impl EngineSnapshot {
    /// Write the snapshot as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)
            .with_context(|| format!("writing snapshot to {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Read a snapshot back from disk
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path.as_ref())
            .with_context(|| format!("reading snapshot from {}", path.as_ref().display()))?;
        let snapshot = serde_json::from_str(&json)?;
        Ok(snapshot)
    }
}
