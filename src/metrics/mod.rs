//! Portfolio metrics derivation
//!
//! All figures are pure functions of the trade history and current
//! account state; nothing here mutates or persists.

mod stats;

use crate::account::AccountState;
use crate::ledger::TradeRecord;
use crate::risk::EngineError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Minimum trades before metrics are computable
pub const MIN_TRADES: usize = 2;

/// Below this many trades, Sharpe and VaR figures are statistically
/// unstable and a warning is logged alongside the result.
pub const STABLE_SAMPLE: usize = 30;

/// Derived portfolio statistics
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioMetrics {
    /// Current account balance
    pub total_balance: Decimal,
    /// Sum of unrealized P&L over open positions
    pub unrealized_pnl: Decimal,
    /// Total return since inception, percent
    pub total_return_pct: Decimal,
    /// Mean excess per-trade return over per-trade stddev
    pub sharpe_ratio: Decimal,
    /// Worst peak-to-trough decline of the cumulative return curve, percent
    pub max_drawdown_pct: Decimal,
    /// Winning trades over total, percent
    pub win_rate_pct: Decimal,
    /// Mean winning pnl_percent, 0 if no wins
    pub avg_win_pct: Decimal,
    /// Mean losing pnl_percent, 0 if no losses
    pub avg_loss_pct: Decimal,
    /// Gross wins over absolute gross losses, 0 if no losses
    pub profit_factor: Decimal,
    /// One-period historical VaR at 95% confidence, in account currency
    pub var_95: Decimal,
    /// Number of trades backing these figures
    pub sample_size: usize,
}

impl PortfolioMetrics {
    /// Derive metrics from the settled trade history.
    ///
    /// `unrealized_pnl` is the ledger's current open-position sum and
    /// `risk_free_rate` is per trade-equivalent period. Requires at
    /// least [`MIN_TRADES`] records.
    pub fn compute(
        history: &[TradeRecord],
        account: &AccountState,
        unrealized_pnl: Decimal,
        risk_free_rate: Decimal,
    ) -> Result<Self, EngineError> {
        if history.len() < MIN_TRADES {
            return Err(EngineError::InsufficientData {
                have: history.len(),
                need: MIN_TRADES,
            });
        }

        if history.len() < STABLE_SAMPLE {
            tracing::warn!(
                trades = history.len(),
                stable = STABLE_SAMPLE,
                "small sample: Sharpe and VaR figures are unstable"
            );
        }

        let returns: Vec<f64> = history
            .iter()
            .map(|t| f64::try_from(t.trade_return()).unwrap_or(0.0))
            .collect();

        let rf = f64::try_from(risk_free_rate).unwrap_or(0.0);
        let sd = stats::std_dev(&returns);
        let sharpe = if sd == 0.0 {
            0.0
        } else {
            (stats::mean(&returns) - rf) / sd
        };

        let var_95 = Decimal::try_from(stats::percentile(&returns, 0.05))
            .unwrap_or_default()
            * account.current_balance;

        let total_return_pct = if account.initial_balance == dec!(0) {
            dec!(0)
        } else {
            (account.current_balance - account.initial_balance) / account.initial_balance
                * dec!(100)
        };

        let wins: Vec<&TradeRecord> = history.iter().filter(|t| t.pnl > dec!(0)).collect();
        let losses: Vec<&TradeRecord> = history.iter().filter(|t| t.pnl < dec!(0)).collect();

        let win_rate_pct =
            Decimal::from(wins.len()) / Decimal::from(history.len()) * dec!(100);

        let avg_win_pct = if wins.is_empty() {
            dec!(0)
        } else {
            wins.iter().map(|t| t.pnl_percent).sum::<Decimal>() / Decimal::from(wins.len())
        };
        let avg_loss_pct = if losses.is_empty() {
            dec!(0)
        } else {
            losses.iter().map(|t| t.pnl_percent).sum::<Decimal>() / Decimal::from(losses.len())
        };

        let gross_wins: Decimal = wins.iter().map(|t| t.pnl).sum();
        let gross_losses: Decimal = losses.iter().map(|t| t.pnl).sum();
        let profit_factor = if gross_losses == dec!(0) {
            dec!(0)
        } else {
            gross_wins / gross_losses.abs()
        };

        Ok(Self {
            total_balance: account.current_balance,
            unrealized_pnl,
            total_return_pct,
            sharpe_ratio: Decimal::try_from(sharpe).unwrap_or_default(),
            max_drawdown_pct: max_drawdown_pct(&returns),
            win_rate_pct,
            avg_win_pct,
            avg_loss_pct,
            profit_factor,
            var_95,
            sample_size: history.len(),
        })
    }

    /// Format as table for host dashboards and CLI output
    pub fn format_table(&self) -> String {
        format!(
            r#"
══════════════════════════════════════════════════════
               PORTFOLIO METRICS
══════════════════════════════════════════════════════

ACCOUNT
───────────────────────────────────────────────────────
Balance:          {:.2}
Unrealized P&L:   {:+.2}
Total Return:     {:+.2}%

PERFORMANCE
───────────────────────────────────────────────────────
Sharpe Ratio:     {:.2}
Max Drawdown:     {:.2}%
Win Rate:         {:.1}%
Avg Win / Loss:   {:+.2}% / {:+.2}%
Profit Factor:    {:.2}
VaR (95%):        {:.2}

Trades:           {}
══════════════════════════════════════════════════════
"#,
            self.total_balance,
            self.unrealized_pnl,
            self.total_return_pct,
            self.sharpe_ratio,
            self.max_drawdown_pct,
            self.win_rate_pct,
            self.avg_win_pct,
            self.avg_loss_pct,
            self.profit_factor,
            self.var_95,
            self.sample_size,
        )
    }
}

/// Maximum drawdown of the cumulative return curve built from the
/// ordered trade sequence, as a percentage.
fn max_drawdown_pct(returns: &[f64]) -> Decimal {
    let mut equity = 1.0_f64;
    let mut peak = 1.0_f64;
    let mut max_dd = 0.0_f64;

    for r in returns {
        equity *= 1.0 + r;
        if equity > peak {
            peak = equity;
        }
        if peak > 0.0 {
            let dd = (peak - equity) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    Decimal::try_from(max_dd * 100.0).unwrap_or_default()
}
