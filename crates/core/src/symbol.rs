//! Per-symbol trading parameters.
//!
//! Rows from the symbol configuration table are validated into typed
//! [`SymbolConfig`] records at load time. Every default lives here, not in
//! the call sites that consume the config.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Asset class of a tradable symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetClass {
    Equity,
    Forex,
}

impl AssetClass {
    /// Parses the table's `AssetType` column. Accepts the spellings the
    /// upstream sheets have used over time ("Stock"/"STK", "Forex"/"FX").
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equity" | "stock" | "stk" => Some(Self::Equity),
            "forex" | "fx" | "cash" => Some(Self::Forex),
            _ => None,
        }
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equity => write!(f, "equity"),
            Self::Forex => write!(f, "forex"),
        }
    }
}

/// Trading parameters for one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolConfig {
    pub symbol: String,
    pub asset_class: AssetClass,
    /// Minimum quote increment; deviation units are quantized to this.
    pub tick_size: Decimal,
    /// Deviations to wait before the first ladder rung.
    pub wait_deviations: Decimal,
    /// Maximum number of ladder rungs per signal.
    pub max_ladder_depth: u32,
    /// Fraction of leveraged capital committed per equity entry.
    pub percent_capital: Decimal,
    /// Fixed share count overriding percent-capital sizing, if set.
    pub fixed_shares: Option<Decimal>,
    /// Notional per forex entry, in quote currency units.
    pub fixed_notional: Decimal,
    pub enabled: bool,
}

impl SymbolConfig {
    /// Fallback tick for symbols missing a quote tick (forex-style 4 dp).
    #[must_use]
    pub fn default_tick() -> Decimal {
        Decimal::new(1, 4)
    }

    /// Default fraction of capital per equity entry (2%).
    #[must_use]
    pub fn default_percent_capital() -> Decimal {
        Decimal::new(2, 2)
    }

    /// Default forex notional per entry (100 000 units).
    #[must_use]
    pub fn default_fixed_notional() -> Decimal {
        Decimal::from(100_000)
    }

    pub const DEFAULT_WAIT_DEVIATIONS: u32 = 1;
    pub const DEFAULT_MAX_LADDER_DEPTH: u32 = 5;

    /// A config with all defaults for the given symbol and class.
    #[must_use]
    pub fn with_defaults(symbol: &str, asset_class: AssetClass) -> Self {
        Self {
            symbol: symbol.to_string(),
            asset_class,
            tick_size: Self::default_tick(),
            wait_deviations: Decimal::from(Self::DEFAULT_WAIT_DEVIATIONS),
            max_ladder_depth: Self::DEFAULT_MAX_LADDER_DEPTH,
            percent_capital: Self::default_percent_capital(),
            fixed_shares: None,
            fixed_notional: Self::default_fixed_notional(),
            enabled: true,
        }
    }
}

/// Read-only lookup of per-symbol parameters, rebuilt each cycle.
#[derive(Debug, Clone, Default)]
pub struct SymbolConfigTable {
    symbols: HashMap<String, SymbolConfig>,
}

impl SymbolConfigTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, config: SymbolConfig) {
        self.symbols.insert(config.symbol.clone(), config);
    }

    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&SymbolConfig> {
        self.symbols.get(symbol)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
