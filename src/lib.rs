//! portfolio-engine: risk-managed position and portfolio accounting
//!
//! This library provides the core components for:
//! - Position sizing with volatility, drawdown, and loss-streak dampening
//! - Protective stop-loss / take-profit derivation
//! - An open position ledger with monotonic identifiers
//! - Mark-to-market with prioritized exit triggers
//! - Atomic settlement into account state and trade history
//! - Portfolio metrics (Sharpe, max drawdown, VaR, win rate, profit factor)
//! - Advisory risk signals
//! - JSON snapshot persistence
//!
//! Strategy callers drive the engine through [`PortfolioEngine`]: open a
//! position, feed prices via mark-to-market, and read metrics and
//! signals. The engine never talks to an exchange or a price feed.

pub mod account;
pub mod config;
pub mod engine;
pub mod ledger;
pub mod metrics;
pub mod risk;
pub mod store;
pub mod telemetry;

pub use engine::PortfolioEngine;
