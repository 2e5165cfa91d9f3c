//! Position and trade record types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque position identifier, monotonically increasing, never reused
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PositionId(pub u64);

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Long,
    Short,
}

/// Position lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionStatus {
    Open,
    Closed,
}

/// Why a position was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    StopLoss,
    TakeProfit,
    Manual,
}

/// An open position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Position identifier
    pub id: PositionId,
    /// Originating strategy
    pub strategy: String,
    /// Traded symbol
    pub symbol: String,
    /// Trade side
    pub side: Side,
    /// Entry price
    pub entry_price: Decimal,
    /// Last marked price
    pub current_price: Decimal,
    /// Quantity in units of the symbol
    pub quantity: Decimal,
    /// Protective stop price
    pub stop_loss: Decimal,
    /// Profit target price
    pub take_profit: Decimal,
    /// Entry timestamp
    pub entry_time: DateTime<Utc>,
    /// Lifecycle status
    pub status: PositionStatus,
    /// Current unrealized P&L
    pub unrealized_pnl: Decimal,
}

impl Position {
    /// Notional value at entry
    pub fn notional(&self) -> Decimal {
        self.entry_price * self.quantity
    }

    /// Update the mark price and recompute unrealized P&L
    pub fn mark(&mut self, price: Decimal) {
        self.current_price = price;
        self.unrealized_pnl = match self.side {
            Side::Long => (price - self.entry_price) * self.quantity,
            Side::Short => (self.entry_price - price) * self.quantity,
        };
    }

    /// Check whether the current mark breaches a protective exit.
    ///
    /// The stop is evaluated before the target on both sides, so a mark
    /// that gaps through both levels in one pass always resolves to the
    /// stop. At most one reason is returned per pass.
    pub fn exit_trigger(&self) -> Option<ExitReason> {
        match self.side {
            Side::Long if self.current_price <= self.stop_loss => Some(ExitReason::StopLoss),
            Side::Long if self.current_price >= self.take_profit => Some(ExitReason::TakeProfit),
            Side::Short if self.current_price >= self.stop_loss => Some(ExitReason::StopLoss),
            Side::Short if self.current_price <= self.take_profit => Some(ExitReason::TakeProfit),
            _ => None,
        }
    }
}

/// An immutable record of a settled trade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    /// The position as it stood at close
    pub position: Position,
    /// Exit price
    pub exit_price: Decimal,
    /// Exit timestamp
    pub exit_time: DateTime<Utc>,
    /// Realized P&L in account currency
    pub pnl: Decimal,
    /// Realized P&L as a percentage of entry notional
    pub pnl_percent: Decimal,
    /// Why the position closed
    pub exit_reason: ExitReason,
}

impl TradeRecord {
    /// Per-trade fractional return
    pub fn trade_return(&self) -> Decimal {
        self.pnl_percent / Decimal::from(100)
    }
}
