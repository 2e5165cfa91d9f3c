//! Protective exit price derivation

use crate::config::RiskConfig;
use crate::ledger::Side;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Derives stop-loss and take-profit prices from the entry
#[derive(Debug, Clone)]
pub struct ExitCalculator {
    /// Stop distance as a fraction of entry (e.g. 0.05)
    pub stop_loss_pct: Decimal,
    /// Target distance as a fraction of entry (e.g. 0.10)
    pub take_profit_pct: Decimal,
}

impl ExitCalculator {
    /// Create a new exit calculator
    pub fn new(stop_loss_pct: Decimal, take_profit_pct: Decimal) -> Self {
        Self {
            stop_loss_pct,
            take_profit_pct,
        }
    }

    /// Create from RiskConfig
    pub fn from_config(config: &RiskConfig) -> Self {
        Self {
            stop_loss_pct: config.stop_loss_pct,
            take_profit_pct: config.take_profit_pct,
        }
    }

    /// Stop-loss price for a position entered at `entry`
    pub fn stop_loss(&self, entry: Decimal, side: Side) -> Decimal {
        match side {
            Side::Long => entry * (dec!(1) - self.stop_loss_pct),
            Side::Short => entry * (dec!(1) + self.stop_loss_pct),
        }
    }

    /// Take-profit price for a position entered at `entry`
    pub fn take_profit(&self, entry: Decimal, side: Side) -> Decimal {
        match side {
            Side::Long => entry * (dec!(1) + self.take_profit_pct),
            Side::Short => entry * (dec!(1) - self.take_profit_pct),
        }
    }
}

impl Default for ExitCalculator {
    fn default() -> Self {
        Self {
            stop_loss_pct: dec!(0.05),
            take_profit_pct: dec!(0.10),
        }
    }
}
