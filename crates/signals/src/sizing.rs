//! Position sizing from account and symbol parameters.

use rust_decimal::Decimal;
use trigger_trade_core::{AssetClass, EngineConfig, SymbolConfig};

/// Haircut applied to leveraged capital before committing it.
fn capital_haircut() -> Decimal {
    Decimal::new(80, 2)
}

/// Order quantity for one signal.
///
/// Equities: `floor(portfolio x leverage x 0.80 x percent_capital / last)`
/// share count, unless the symbol configures a fixed share count. Forex:
/// the configured fixed notional; sizing is not portfolio-derived for
/// this asset class.
#[must_use]
pub fn position_size(
    config: &SymbolConfig,
    engine: &EngineConfig,
    last_price: Decimal,
) -> Decimal {
    match config.asset_class {
        AssetClass::Equity => {
            if let Some(shares) = config.fixed_shares {
                return shares;
            }
            if last_price <= Decimal::ZERO {
                return Decimal::ZERO;
            }
            let leverage = Decimal::from(engine.leverage_for(config.asset_class));
            let capital = engine.portfolio_value * leverage * capital_haircut();
            (capital * config.percent_capital / last_price).floor()
        }
        AssetClass::Forex => config.fixed_notional,
    }
}
