//! Entry gate: drawdown and loss-streak limits

use super::RejectReason;
use crate::account::AccountState;
use crate::config::RiskConfig;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Rejects new trade intents when the account is past its limits
#[derive(Debug, Clone)]
pub struct EntryGate {
    /// Maximum drawdown before new entries are refused
    pub max_drawdown: Decimal,
    /// Maximum loss streak before new entries are refused
    pub max_consecutive_losses: u32,
}

impl EntryGate {
    /// Create a new entry gate
    pub fn new(max_drawdown: Decimal, max_consecutive_losses: u32) -> Self {
        Self {
            max_drawdown,
            max_consecutive_losses,
        }
    }

    /// Create from RiskConfig
    pub fn from_config(config: &RiskConfig) -> Self {
        Self {
            max_drawdown: config.max_drawdown,
            max_consecutive_losses: config.max_consecutive_losses,
        }
    }

    /// Check a new trade intent against the account. Drawdown is
    /// evaluated first.
    pub fn check(&self, account: &AccountState) -> Result<(), RejectReason> {
        if account.current_drawdown >= self.max_drawdown {
            return Err(RejectReason::DrawdownLimit {
                current: account.current_drawdown,
                limit: self.max_drawdown,
            });
        }

        if account.consecutive_losses >= self.max_consecutive_losses {
            return Err(RejectReason::LossStreak {
                count: account.consecutive_losses,
                limit: self.max_consecutive_losses,
            });
        }

        Ok(())
    }
}

impl Default for EntryGate {
    fn default() -> Self {
        Self {
            max_drawdown: dec!(0.20),
            max_consecutive_losses: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_account_passes() {
        let gate = EntryGate::default();
        let account = AccountState::new(dec!(10000));
        assert!(gate.check(&account).is_ok());
    }

    #[test]
    fn test_drawdown_limit() {
        let gate = EntryGate::default();
        let mut account = AccountState::new(dec!(10000));
        account.apply_close(dec!(-2200)); // 22% drawdown

        let err = gate.check(&account).unwrap_err();
        assert!(matches!(err, RejectReason::DrawdownLimit { .. }));
    }

    #[test]
    fn test_drawdown_at_limit_rejects() {
        let gate = EntryGate::default();
        let mut account = AccountState::new(dec!(10000));
        account.apply_close(dec!(-2000)); // exactly 20%

        assert!(gate.check(&account).is_err());
    }

    #[test]
    fn test_loss_streak_limit() {
        let gate = EntryGate::new(dec!(0.99), 5);
        let mut account = AccountState::new(dec!(10000));
        for _ in 0..5 {
            account.apply_close(dec!(-1));
        }

        let err = gate.check(&account).unwrap_err();
        assert_eq!(err, RejectReason::LossStreak { count: 5, limit: 5 });
    }

    #[test]
    fn test_streak_below_limit_passes() {
        let gate = EntryGate::default();
        let mut account = AccountState::new(dec!(10000));
        for _ in 0..4 {
            account.apply_close(dec!(-1));
        }
        assert!(gate.check(&account).is_ok());
    }
}
