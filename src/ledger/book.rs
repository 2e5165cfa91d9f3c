//! Open position book

use super::{ExitReason, Position, PositionId, PositionStatus, Side};
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// Owns the set of open positions and assigns identifiers.
///
/// This is the sole creation point for [`Position`] values. Identifiers
/// start at 1 and are never reused; the counter survives snapshot
/// restore (see [`crate::store`]).
pub struct PositionLedger {
    open: HashMap<PositionId, Position>,
    next_id: u64,
}

impl PositionLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            open: HashMap::new(),
            next_id: 1,
        }
    }

    /// Rebuild a ledger from persisted positions and an id counter
    pub fn from_parts(positions: Vec<Position>, next_id: u64) -> Self {
        let open = positions.into_iter().map(|p| (p.id, p)).collect();
        Self { open, next_id }
    }

    /// Materialize a new open position
    #[allow(clippy::too_many_arguments)]
    pub fn open(
        &mut self,
        strategy: &str,
        symbol: &str,
        side: Side,
        entry_price: Decimal,
        quantity: Decimal,
        stop_loss: Decimal,
        take_profit: Decimal,
    ) -> Position {
        let id = PositionId(self.next_id);
        self.next_id += 1;

        let position = Position {
            id,
            strategy: strategy.to_string(),
            symbol: symbol.to_string(),
            side,
            entry_price,
            current_price: entry_price,
            quantity,
            stop_loss,
            take_profit,
            entry_time: Utc::now(),
            status: PositionStatus::Open,
            unrealized_pnl: dec!(0),
        };

        self.open.insert(id, position.clone());
        position
    }

    /// Remove a position from the open set (the open→closed transition)
    pub fn remove(&mut self, id: PositionId) -> Option<Position> {
        self.open.remove(&id)
    }

    /// Look up an open position by id
    pub fn get(&self, id: PositionId) -> Option<&Position> {
        self.open.get(&id)
    }

    /// Snapshot of all open positions
    pub fn list_open(&self) -> Vec<Position> {
        self.open.values().cloned().collect()
    }

    /// Number of open positions
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Next identifier the ledger will assign
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Mark every open position in `symbol` to `price` and return the
    /// ids that breached a protective exit, with the triggering reason.
    pub fn mark_symbol(&mut self, symbol: &str, price: Decimal) -> Vec<(PositionId, ExitReason)> {
        let mut triggered = Vec::new();
        for position in self.open.values_mut() {
            if position.symbol == symbol {
                position.mark(price);
                if let Some(reason) = position.exit_trigger() {
                    triggered.push((position.id, reason));
                }
            }
        }
        triggered
    }

    /// Sum of unrealized P&L across open positions
    pub fn total_unrealized_pnl(&self) -> Decimal {
        self.open.values().map(|p| p.unrealized_pnl).sum()
    }

    /// Sum of absolute entry notional across open positions
    pub fn total_exposure(&self) -> Decimal {
        self.open.values().map(|p| p.notional().abs()).sum()
    }
}

impl Default for PositionLedger {
    fn default() -> Self {
        Self::new()
    }
}
