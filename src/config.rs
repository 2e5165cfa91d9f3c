//! Configuration types for portfolio-engine

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Account initialization configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    /// Starting balance in account currency
    #[serde(default = "default_initial_balance")]
    pub initial_balance: Decimal,
}

/// Risk management configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RiskConfig {
    /// Hard ceiling on position value as a fraction of balance
    #[serde(default = "default_max_position_pct")]
    pub max_position_pct: Decimal,

    /// Stop distance as a fraction of entry price
    #[serde(default = "default_stop_loss_pct")]
    pub stop_loss_pct: Decimal,

    /// Target distance as a fraction of entry price
    #[serde(default = "default_take_profit_pct")]
    pub take_profit_pct: Decimal,

    /// Drawdown fraction at which new entries are refused
    #[serde(default = "default_max_drawdown")]
    pub max_drawdown: Decimal,

    /// Loss streak at which new entries are refused
    #[serde(default = "default_max_consecutive_losses")]
    pub max_consecutive_losses: u32,
}

/// Portfolio metrics configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    /// Risk-free rate per trade-equivalent period, as a fraction
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: Decimal,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g. "info", "portfolio_engine=debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_initial_balance() -> Decimal {
    Decimal::from(10000)
}
fn default_max_position_pct() -> Decimal {
    Decimal::new(95, 2) // 0.95
}
fn default_stop_loss_pct() -> Decimal {
    Decimal::new(5, 2) // 0.05
}
fn default_take_profit_pct() -> Decimal {
    Decimal::new(10, 2) // 0.10
}
fn default_max_drawdown() -> Decimal {
    Decimal::new(20, 2) // 0.20
}
fn default_max_consecutive_losses() -> u32 {
    5
}
fn default_risk_free_rate() -> Decimal {
    Decimal::new(3, 6) // 0.000003 per trade period
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            initial_balance: default_initial_balance(),
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            max_position_pct: default_max_position_pct(),
            stop_loss_pct: default_stop_loss_pct(),
            take_profit_pct: default_take_profit_pct(),
            max_drawdown: default_max_drawdown(),
            max_consecutive_losses: default_max_consecutive_losses(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("initial_balance must be positive, got {0}")]
    NonPositiveBalance(Decimal),
    #[error("max_position_pct must be in (0, 1], got {0}")]
    BadPositionPct(Decimal),
    #[error("{name} must be positive, got {value}")]
    NonPositivePct { name: &'static str, value: Decimal },
}

impl Config {
    /// Load configuration from a TOML file and validate it
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check percentage bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        let zero = Decimal::ZERO;
        let one = Decimal::ONE;

        if self.account.initial_balance <= zero {
            return Err(ConfigError::NonPositiveBalance(self.account.initial_balance));
        }
        if self.risk.max_position_pct <= zero || self.risk.max_position_pct > one {
            return Err(ConfigError::BadPositionPct(self.risk.max_position_pct));
        }
        if self.risk.stop_loss_pct <= zero {
            return Err(ConfigError::NonPositivePct {
                name: "stop_loss_pct",
                value: self.risk.stop_loss_pct,
            });
        }
        if self.risk.take_profit_pct <= zero {
            return Err(ConfigError::NonPositivePct {
                name: "take_profit_pct",
                value: self.risk.take_profit_pct,
            });
        }
        Ok(())
    }
}
