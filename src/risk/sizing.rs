//! Position sizing
//!
//! Sizes new positions as a fraction of balance, shrunk multiplicatively
//! by recent volatility, current drawdown, and the running loss streak.
//! Every dampener floors at 50% of the base, and the result is re-clamped
//! to the hard cap after all factors are applied.

use crate::account::AccountState;
use crate::config::RiskConfig;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Calculates position value in account currency
#[derive(Debug, Clone)]
pub struct SizeCalculator {
    /// Hard ceiling as a fraction of balance (e.g. 0.95)
    pub max_position_pct: Decimal,
}

impl SizeCalculator {
    /// Create a new size calculator
    pub fn new(max_position_pct: Decimal) -> Self {
        Self { max_position_pct }
    }

    /// Create from RiskConfig
    pub fn from_config(config: &RiskConfig) -> Self {
        Self {
            max_position_pct: config.max_position_pct,
        }
    }

    /// Size a new position against the current account state.
    ///
    /// Pure: reads the account, mutates nothing.
    pub fn size(&self, account: &AccountState, volatility: Option<Decimal>) -> Decimal {
        let cap = account.current_balance * self.max_position_pct;
        let mut size = cap;

        if let Some(vol) = volatility {
            let factor = (dec!(1) - vol * dec!(2)).max(dec!(0.5));
            size *= factor;
        }

        if account.current_drawdown > dec!(0) {
            let factor = (dec!(1) - account.current_drawdown).max(dec!(0.5));
            size *= factor;
        }

        if account.consecutive_losses > 0 {
            let factor = (dec!(1) - Decimal::from(account.consecutive_losses) * dec!(0.1))
                .max(dec!(0.5));
            size *= factor;
        }

        size.min(cap)
    }
}

impl Default for SizeCalculator {
    fn default() -> Self {
        Self {
            max_position_pct: dec!(0.95),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> AccountState {
        AccountState::new(dec!(10000))
    }

    #[test]
    fn test_base_size_is_capped_fraction() {
        let calc = SizeCalculator::default();
        // 10000 * 0.95 = 9500
        assert_eq!(calc.size(&account(), None), dec!(9500));
    }

    #[test]
    fn test_volatility_dampening() {
        let calc = SizeCalculator::default();
        // factor = 1 - 0.1 * 2 = 0.8 -> 9500 * 0.8 = 7600
        assert_eq!(calc.size(&account(), Some(dec!(0.1))), dec!(7600));
    }

    #[test]
    fn test_volatility_floor() {
        let calc = SizeCalculator::default();
        // 1 - 0.9 * 2 would be negative; floored at 0.5
        assert_eq!(calc.size(&account(), Some(dec!(0.9))), dec!(4750));
    }

    #[test]
    fn test_drawdown_dampening() {
        let calc = SizeCalculator::default();
        let mut account = account();
        account.apply_close(dec!(-1000)); // 10% drawdown, 1 loss

        // balance 9000, cap 8550
        // drawdown factor 0.9, streak factor 0.9
        // 8550 * 0.9 * 0.9 = 6925.50
        assert_eq!(calc.size(&account, None), dec!(6925.50));
    }

    #[test]
    fn test_loss_streak_floor() {
        let calc = SizeCalculator::default();
        let mut account = account();
        // Seven tiny losses barely move drawdown but stack the streak;
        // the streak factor floors at 0.5 instead of 1 - 0.7 = 0.3.
        for _ in 0..7 {
            account.apply_close(dec!(-0.01));
        }
        assert_eq!(account.consecutive_losses, 7);

        let cap = account.current_balance * dec!(0.95);
        let size = calc.size(&account, None);
        assert!(size >= cap * dec!(0.49));
        assert!(size <= cap * dec!(0.51));
    }

    #[test]
    fn test_never_exceeds_cap() {
        let calc = SizeCalculator::default();
        let account = account();
        let cap = account.current_balance * calc.max_position_pct;

        for vol in [None, Some(dec!(0)), Some(dec!(0.05)), Some(dec!(2))] {
            assert!(calc.size(&account, vol) <= cap);
        }
    }

    #[test]
    fn test_zero_volatility_is_neutral() {
        let calc = SizeCalculator::default();
        assert_eq!(calc.size(&account(), Some(dec!(0))), dec!(9500));
    }

    #[test]
    fn test_from_config() {
        let config = RiskConfig::default();
        let calc = SizeCalculator::from_config(&config);
        assert_eq!(calc.max_position_pct, dec!(0.95));
    }
}
