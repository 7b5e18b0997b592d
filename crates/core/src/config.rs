//! Application configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::symbol::AssetClass;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub ib: IbSettings,
}

/// Engine-level knobs: polling cadence, sizing inputs, dispatch mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seconds between polling cycles.
    pub poll_interval_secs: u64,
    /// Account value used for equity position sizing.
    pub portfolio_value: Decimal,
    /// Leverage applied to equity sizing.
    pub equity_leverage: u32,
    /// Leverage applied to forex sizing.
    pub forex_leverage: u32,
    /// When true, dispatch to the dry-run recorder instead of the broker.
    pub dry_run: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 60,
            portfolio_value: Decimal::from(100_000),
            equity_leverage: 3,
            forex_leverage: 30,
            dry_run: true,
        }
    }
}

impl EngineConfig {
    /// Leverage for the given asset class.
    #[must_use]
    pub const fn leverage_for(&self, asset_class: AssetClass) -> u32 {
        match asset_class {
            AssetClass::Equity => self.equity_leverage,
            AssetClass::Forex => self.forex_leverage,
        }
    }
}

/// Filesystem locations of the external collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Tabular signal feed produced upstream.
    pub signal_feed: String,
    /// Per-symbol parameter table.
    pub symbol_table: String,
    /// Append-only execution ledger.
    pub ledger: String,
    /// Per-cycle snapshot of annotated signals.
    pub snapshot: String,
    /// Dry-run plan export.
    pub plan: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            signal_feed: "signals.csv".to_string(),
            symbol_table: "symbols.csv".to_string(),
            ledger: "executed_signals.csv".to_string(),
            snapshot: "cycle_snapshot.csv".to_string(),
            plan: "plan.csv".to_string(),
        }
    }
}

/// IB Gateway/TWS connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IbSettings {
    /// Gateway host (use 127.0.0.1, not localhost — TWS may block IPv6).
    pub host: String,
    /// Gateway port (4001 = live, 4002 = paper).
    pub port: u16,
    /// Client ID, unique per connection.
    pub client_id: i32,
}

impl Default for IbSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4002,
            client_id: 100,
        }
    }
}

impl IbSettings {
    /// Connection URL for the ibapi crate.
    #[must_use]
    pub fn connection_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
