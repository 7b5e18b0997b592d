//! Deviation-unit (SD) computation and tick quantization.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use trigger_trade_core::{DeviationUnit, SymbolConfig};

/// Computes the quantized deviation unit for one signal.
///
/// `raw = |eq_price - last_price| / |eq_level|`, then the tick count is
/// rounded **up** (never down) and the price unit is that count times the
/// tick size. A zero reference level yields the degenerate zero unit,
/// which downstream filtering excludes. A missing or non-positive tick
/// size falls back to the 0.0001 default so forex-style quantization
/// keeps working.
#[must_use]
pub fn compute(
    eq_price: Decimal,
    last_price: Decimal,
    eq_level: Decimal,
    tick_size: Decimal,
) -> DeviationUnit {
    if eq_level.is_zero() {
        return DeviationUnit::zero();
    }

    let tick = if tick_size > Decimal::ZERO {
        tick_size
    } else {
        SymbolConfig::default_tick()
    };

    let raw = (eq_price - last_price).abs() / eq_level.abs();
    let ticks_dec = (raw / tick).ceil();
    // A tick count that does not fit i64 is garbage input.
    let Some(ticks) = ticks_dec.to_i64() else {
        return DeviationUnit::zero();
    };

    DeviationUnit {
        raw,
        ticks,
        price: ticks_dec * tick,
    }
}
