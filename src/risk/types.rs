//! Risk and engine error types

use crate::ledger::PositionId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a trade intent was rejected at the entry gate
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RejectReason {
    /// Drawdown at or above the configured limit
    #[error("drawdown {current} at or above limit {limit}")]
    DrawdownLimit { current: Decimal, limit: Decimal },
    /// Loss streak at or above the configured limit
    #[error("{count} consecutive losses at or above limit {limit}")]
    LossStreak { count: u32, limit: u32 },
}

/// Engine-level errors. None of these is fatal: each is a typed
/// outcome the caller is expected to handle.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Trade intent rejected by the risk gate; the caller should not
    /// retry the same trade, only reconsider later
    #[error("trade rejected: {0}")]
    Rejected(#[from] RejectReason),
    /// Referenced position does not exist or is already closed
    #[error("position {0} not found")]
    NotFound(PositionId),
    /// Metrics requested before enough trades exist
    #[error("insufficient trade history: {have} trades, need {need}")]
    InsufficientData { have: usize, need: usize },
    /// Non-positive entry price supplied by the caller
    #[error("invalid entry price: {0}")]
    InvalidPrice(Decimal),
}
