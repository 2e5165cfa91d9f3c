//! Advisory risk signals
//!
//! Human-readable warnings derived from account state and open
//! positions. Purely advisory: nothing here gates or mutates.

use crate::account::AccountState;
use crate::ledger::Position;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Thresholds for the advisory warnings
#[derive(Debug, Clone)]
pub struct RiskSignalEvaluator {
    /// Drawdown fraction that raises the drawdown warning
    pub drawdown_warn: Decimal,
    /// Loss streak that raises the streak warning
    pub loss_streak_warn: u32,
    /// Open position count that raises the count warning
    pub position_count_warn: usize,
    /// Exposure-to-balance ratio that raises the concentration warning
    pub concentration_warn: Decimal,
    /// Fraction of initial balance below which capital loss is flagged
    pub capital_floor: Decimal,
}

impl RiskSignalEvaluator {
    /// Evaluate all warnings against the current account and open set
    pub fn evaluate(&self, account: &AccountState, open: &[Position]) -> Vec<String> {
        let mut warnings = Vec::new();

        if account.current_drawdown > self.drawdown_warn {
            warnings.push(format!(
                "HIGH DRAWDOWN WARNING: {:.1}% below peak",
                account.current_drawdown * dec!(100)
            ));
        }

        if account.consecutive_losses >= self.loss_streak_warn {
            warnings.push(format!(
                "CONSECUTIVE LOSSES: {} losing trades in a row",
                account.consecutive_losses
            ));
        }

        if open.len() > self.position_count_warn {
            warnings.push(format!("HIGH POSITION COUNT: {} open positions", open.len()));
        }

        // Concentration proxy: absolute entry notional vs. balance
        let exposure: Decimal = open.iter().map(|p| p.notional().abs()).sum();
        if account.current_balance > dec!(0)
            && exposure / account.current_balance > self.concentration_warn
        {
            warnings.push(format!(
                "HIGH PORTFOLIO CONCENTRATION: {exposure} notional at risk"
            ));
        }

        if account.current_balance < account.initial_balance * self.capital_floor {
            warnings.push(format!(
                "SIGNIFICANT CAPITAL LOSS: balance {} below 80% of initial {}",
                account.current_balance, account.initial_balance
            ));
        }

        warnings
    }
}

impl Default for RiskSignalEvaluator {
    fn default() -> Self {
        Self {
            drawdown_warn: dec!(0.15),
            loss_streak_warn: 3,
            position_count_warn: 10,
            concentration_warn: dec!(0.5),
            capital_floor: dec!(0.8),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{PositionLedger, Side};

    fn open_unit(ledger: &mut PositionLedger, symbol: &str, notional: Decimal) {
        ledger.open(
            "test",
            symbol,
            Side::Long,
            notional,
            dec!(1),
            notional * dec!(0.95),
            notional * dec!(1.10),
        );
    }

    #[test]
    fn test_healthy_account_is_quiet() {
        let evaluator = RiskSignalEvaluator::default();
        let account = AccountState::new(dec!(10000));
        assert!(evaluator.evaluate(&account, &[]).is_empty());
    }

    #[test]
    fn test_drawdown_warning() {
        let evaluator = RiskSignalEvaluator::default();
        let mut account = AccountState::new(dec!(10000));
        account.apply_close(dec!(-1600)); // 16% drawdown

        let warnings = evaluator.evaluate(&account, &[]);
        assert!(warnings.iter().any(|w| w.contains("HIGH DRAWDOWN WARNING")));
    }

    #[test]
    fn test_loss_streak_warning() {
        let evaluator = RiskSignalEvaluator::default();
        let mut account = AccountState::new(dec!(10000));
        for _ in 0..3 {
            account.apply_close(dec!(-10));
        }

        let warnings = evaluator.evaluate(&account, &[]);
        assert!(warnings.iter().any(|w| w.contains("CONSECUTIVE LOSSES")));
    }

    #[test]
    fn test_position_count_warning() {
        let evaluator = RiskSignalEvaluator::default();
        let account = AccountState::new(dec!(1000000));
        let mut ledger = PositionLedger::new();
        for i in 0..11 {
            open_unit(&mut ledger, &format!("SYM{i}"), dec!(10));
        }

        let warnings = evaluator.evaluate(&account, &ledger.list_open());
        assert!(warnings.iter().any(|w| w.contains("HIGH POSITION COUNT")));
    }

    #[test]
    fn test_concentration_warning() {
        let evaluator = RiskSignalEvaluator::default();
        let account = AccountState::new(dec!(10000));
        let mut ledger = PositionLedger::new();
        open_unit(&mut ledger, "BTC", dec!(6000)); // 60% of balance

        let warnings = evaluator.evaluate(&account, &ledger.list_open());
        assert!(warnings
            .iter()
            .any(|w| w.contains("HIGH PORTFOLIO CONCENTRATION")));
    }

    #[test]
    fn test_capital_loss_warning() {
        let evaluator = RiskSignalEvaluator::default();
        let mut account = AccountState::new(dec!(10000));
        account.apply_close(dec!(-2500)); // balance 7500 < 8000

        let warnings = evaluator.evaluate(&account, &[]);
        assert!(warnings
            .iter()
            .any(|w| w.contains("SIGNIFICANT CAPITAL LOSS")));
    }

    #[test]
    fn test_multiple_warnings_ordered() {
        let evaluator = RiskSignalEvaluator::default();
        let mut account = AccountState::new(dec!(10000));
        for _ in 0..4 {
            account.apply_close(dec!(-600));
        }
        // 24% drawdown, 4-loss streak, balance 7600

        let warnings = evaluator.evaluate(&account, &[]);
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("HIGH DRAWDOWN"));
        assert!(warnings[1].contains("CONSECUTIVE LOSSES"));
        assert!(warnings[2].contains("SIGNIFICANT CAPITAL LOSS"));
    }
}
