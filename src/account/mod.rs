//! Account state and the per-close settlement transition

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Process-wide account state.
///
/// Mutated only through [`AccountState::apply_close`], called exactly
/// once per settled trade. Everything downstream (sizing dampeners,
/// entry gates, risk signals) reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountState {
    /// Balance at engine initialization
    pub initial_balance: Decimal,
    /// Current balance
    pub current_balance: Decimal,
    /// Highest balance ever reached
    pub peak_balance: Decimal,
    /// Fractional decline from peak, recomputed on every balance change
    pub current_drawdown: Decimal,
    /// Losing closes since the last winning close
    pub consecutive_losses: u32,
}

impl AccountState {
    /// Create account state with all balances at `initial_balance`
    pub fn new(initial_balance: Decimal) -> Self {
        Self {
            initial_balance,
            current_balance: initial_balance,
            peak_balance: initial_balance,
            current_drawdown: dec!(0),
            consecutive_losses: 0,
        }
    }

    /// Apply one settled trade: balance, loss streak, peak, and
    /// drawdown move together in a single transition.
    pub fn apply_close(&mut self, pnl: Decimal) {
        self.current_balance += pnl;

        if pnl < dec!(0) {
            self.consecutive_losses += 1;
        } else {
            self.consecutive_losses = 0;
        }

        if self.current_balance > self.peak_balance {
            self.peak_balance = self.current_balance;
        }

        self.current_drawdown = if self.peak_balance == dec!(0) {
            dec!(0)
        } else {
            (self.peak_balance - self.current_balance) / self.peak_balance
        };
    }
}
