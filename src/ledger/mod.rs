//! Position ledger module
//!
//! Position and trade record types, plus the open position book

mod book;
mod types;

pub use book::PositionLedger;
pub use types::{ExitReason, Position, PositionId, PositionStatus, Side, TradeRecord};
