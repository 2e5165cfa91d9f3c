//! Portfolio engine facade
//!
//! [`PortfolioEngine`] is the single owner of account state, the open
//! position book, and the trade history. Every mutation (open,
//! mark-to-market trigger, close) runs under one mutex, so a sizing
//! decision can never interleave with a settlement that changes
//! drawdown. Metrics and risk signals read a consistent view under the
//! same lock and compute outside any I/O.

use crate::account::AccountState;
use crate::config::Config;
use crate::ledger::{ExitReason, Position, PositionId, PositionLedger, Side, TradeRecord};
use crate::metrics::PortfolioMetrics;
use crate::risk::{
    EngineError, EntryGate, ExitCalculator, RiskSignalEvaluator, SizeCalculator,
};
use crate::store::EngineSnapshot;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

struct EngineInner {
    account: AccountState,
    ledger: PositionLedger,
    history: Vec<TradeRecord>,
}

/// Risk-managed position and portfolio accounting engine
pub struct PortfolioEngine {
    gate: EntryGate,
    sizer: SizeCalculator,
    exits: ExitCalculator,
    signals: RiskSignalEvaluator,
    risk_free_rate: Decimal,
    inner: Mutex<EngineInner>,
}

impl PortfolioEngine {
    /// Create an engine from configuration
    pub fn new(config: &Config) -> Self {
        Self {
            gate: EntryGate::from_config(&config.risk),
            sizer: SizeCalculator::from_config(&config.risk),
            exits: ExitCalculator::from_config(&config.risk),
            signals: RiskSignalEvaluator::default(),
            risk_free_rate: config.metrics.risk_free_rate,
            inner: Mutex::new(EngineInner {
                account: AccountState::new(config.account.initial_balance),
                ledger: PositionLedger::new(),
                history: Vec::new(),
            }),
        }
    }

    /// Rebuild an engine from a persisted snapshot
    pub fn restore(config: &Config, snapshot: EngineSnapshot) -> Self {
        Self {
            gate: EntryGate::from_config(&config.risk),
            sizer: SizeCalculator::from_config(&config.risk),
            exits: ExitCalculator::from_config(&config.risk),
            signals: RiskSignalEvaluator::default(),
            risk_free_rate: config.metrics.risk_free_rate,
            inner: Mutex::new(EngineInner {
                account: snapshot.account,
                ledger: PositionLedger::from_parts(
                    snapshot.open_positions,
                    snapshot.next_position_id,
                ),
                history: snapshot.trade_history,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EngineInner> {
        self.inner.lock().expect("engine state lock poisoned")
    }

    /// Open a new position for a strategy-originated trade intent.
    ///
    /// Runs the entry gate first; a rejection leaves all state
    /// untouched. On success the position value comes from the size
    /// calculator and the protective prices from the exit calculator.
    pub fn open_position(
        &self,
        strategy: &str,
        symbol: &str,
        side: Side,
        entry_price: Decimal,
        volatility: Option<Decimal>,
    ) -> Result<Position, EngineError> {
        if entry_price <= dec!(0) {
            return Err(EngineError::InvalidPrice(entry_price));
        }

        let mut inner = self.lock();

        if let Err(reason) = self.gate.check(&inner.account) {
            tracing::warn!(strategy, symbol, %reason, "trade rejected");
            return Err(reason.into());
        }

        let size = self.sizer.size(&inner.account, volatility);
        let quantity = size / entry_price;
        let stop_loss = self.exits.stop_loss(entry_price, side);
        let take_profit = self.exits.take_profit(entry_price, side);

        let position = inner.ledger.open(
            strategy,
            symbol,
            side,
            entry_price,
            quantity,
            stop_loss,
            take_profit,
        );

        tracing::info!(
            id = %position.id,
            strategy,
            symbol,
            ?side,
            %entry_price,
            %quantity,
            %stop_loss,
            %take_profit,
            "position opened"
        );
        Ok(position)
    }

    /// Mark every open position against the supplied prices and settle
    /// any that breach a protective exit.
    ///
    /// Positions whose symbol is absent from the map are left
    /// untouched; a partial feed never blocks unrelated positions.
    /// Returns the trade records produced during this pass.
    pub fn mark_to_market(&self, prices: &HashMap<String, Decimal>) -> Vec<TradeRecord> {
        let mut inner = self.lock();
        let mut closed = Vec::new();

        for (symbol, price) in prices {
            for (id, reason) in inner.ledger.mark_symbol(symbol, *price) {
                // Settlement runs synchronously under the same lock as
                // the mark that triggered it.
                match settle(&mut inner, id, *price, reason) {
                    Ok(record) => closed.push(record),
                    Err(err) => tracing::error!(%id, %err, "settlement failed"),
                }
            }
        }

        closed
    }

    /// Close a position at its current tracked price
    pub fn close_manually(&self, id: PositionId) -> Result<TradeRecord, EngineError> {
        let mut inner = self.lock();
        let exit_price = inner
            .ledger
            .get(id)
            .map(|p| p.current_price)
            .ok_or(EngineError::NotFound(id))?;
        settle(&mut inner, id, exit_price, ExitReason::Manual)
    }

    /// Derive portfolio metrics from the settled history
    pub fn metrics(&self) -> Result<PortfolioMetrics, EngineError> {
        let inner = self.lock();
        PortfolioMetrics::compute(
            &inner.history,
            &inner.account,
            inner.ledger.total_unrealized_pnl(),
            self.risk_free_rate,
        )
    }

    /// Advisory warnings for the current account and open set
    pub fn risk_signals(&self) -> Vec<String> {
        let inner = self.lock();
        self.signals
            .evaluate(&inner.account, &inner.ledger.list_open())
    }

    /// Snapshot of the account state
    pub fn account(&self) -> AccountState {
        self.lock().account.clone()
    }

    /// Snapshot of all open positions
    pub fn open_positions(&self) -> Vec<Position> {
        self.lock().ledger.list_open()
    }

    /// Snapshot of the settled trade history
    pub fn trade_history(&self) -> Vec<TradeRecord> {
        self.lock().history.clone()
    }

    /// Consistent snapshot of all persisted tables
    pub fn snapshot(&self) -> EngineSnapshot {
        let inner = self.lock();
        EngineSnapshot {
            account: inner.account.clone(),
            open_positions: inner.ledger.list_open(),
            trade_history: inner.history.clone(),
            next_position_id: inner.ledger.next_id(),
        }
    }
}

/// Settle one position: compute realized P&L, apply the account
/// transition exactly once, move the position into history.
fn settle(
    inner: &mut EngineInner,
    id: PositionId,
    exit_price: Decimal,
    exit_reason: ExitReason,
) -> Result<TradeRecord, EngineError> {
    let mut position = inner.ledger.remove(id).ok_or(EngineError::NotFound(id))?;

    let pnl = match position.side {
        Side::Long => (exit_price - position.entry_price) * position.quantity,
        Side::Short => (position.entry_price - exit_price) * position.quantity,
    };
    let notional = position.notional();
    let pnl_percent = if notional == dec!(0) {
        dec!(0)
    } else {
        pnl / notional * dec!(100)
    };

    inner.account.apply_close(pnl);

    position.status = crate::ledger::PositionStatus::Closed;
    position.current_price = exit_price;
    position.unrealized_pnl = dec!(0);

    let record = TradeRecord {
        position,
        exit_price,
        exit_time: Utc::now(),
        pnl,
        pnl_percent,
        exit_reason,
    };

    tracing::info!(
        %id,
        %exit_price,
        ?exit_reason,
        %pnl,
        balance = %inner.account.current_balance,
        streak = inner.account.consecutive_losses,
        "position closed"
    );

    inner.history.push(record.clone());
    Ok(record)
}
