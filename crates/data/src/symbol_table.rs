//! Symbol configuration table loading.
//!
//! Rows are validated into typed [`SymbolConfig`] records here, once, at
//! load time. Optional columns fall back to the defaults enumerated on
//! `SymbolConfig`; a row with no usable symbol or an unknown asset type is
//! a configuration defect and is skipped with a warning.

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::warn;
use trigger_trade_core::{AssetClass, SymbolConfig, SymbolConfigTable};

/// Loads the per-symbol parameter table from CSV.
///
/// Expected columns (beyond `Symbol` and `AssetType`, all optional):
/// `QuoteTick`, `WaitDevs`, `MaxOrders`, `PercentCapital`, `FixedShares`,
/// `FixedForexUSD`, `Enable`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read. Invalid rows do
/// not error; they are skipped.
pub fn load_symbol_table(path: &Path) -> Result<SymbolConfigTable> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open symbol table: {}", path.display()))?;
    let headers = reader.headers()?.clone();

    let mut table = SymbolConfigTable::new();
    for result in reader.records() {
        let record = result?;
        match parse_row(&headers, &record) {
            Some(config) => table.insert(config),
            None => warn!(row = ?record, "invalid symbol config row skipped"),
        }
    }
    Ok(table)
}

fn parse_row(headers: &csv::StringRecord, record: &csv::StringRecord) -> Option<SymbolConfig> {
    let field = |column: &str| {
        headers
            .iter()
            .position(|header| header == column)
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    let symbol = field("Symbol")?.to_string();
    let asset_class = AssetClass::parse(field("AssetType")?)?;

    let decimal = |column: &str| field(column).and_then(|value| Decimal::from_str(value).ok());

    let tick_size = decimal("QuoteTick")
        .filter(|tick| *tick > Decimal::ZERO)
        .unwrap_or_else(SymbolConfig::default_tick);
    let wait_deviations = decimal("WaitDevs")
        .unwrap_or_else(|| Decimal::from(SymbolConfig::DEFAULT_WAIT_DEVIATIONS));
    let max_ladder_depth = field("MaxOrders")
        .and_then(|value| value.parse::<u32>().ok())
        .unwrap_or(SymbolConfig::DEFAULT_MAX_LADDER_DEPTH);
    let percent_capital =
        decimal("PercentCapital").unwrap_or_else(SymbolConfig::default_percent_capital);
    let fixed_shares = decimal("FixedShares");
    let fixed_notional =
        decimal("FixedForexUSD").unwrap_or_else(SymbolConfig::default_fixed_notional);
    let enabled = field("Enable").map_or(true, parse_bool);

    Some(SymbolConfig {
        symbol,
        asset_class,
        tick_size,
        wait_deviations,
        max_ladder_depth,
        percent_capital,
        fixed_shares,
        fixed_notional,
        enabled,
    })
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y"
    )
}
