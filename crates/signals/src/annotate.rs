//! Per-signal pipeline assembly.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use trigger_trade_core::{EngineConfig, NormalizedSignal, RawSignal, SymbolConfig};

use crate::{deviation, pyramid, sizing, stop_loss};

/// Runs one normalized signal through the full pipeline.
///
/// Returns `None` when the signal cannot produce any order: the symbol is
/// disabled, or the deviation unit is degenerate (no valid distance unit).
/// A zero position size keeps the annotation but suppresses the ladder,
/// since zero-size orders are never emitted.
#[must_use]
pub fn annotate(
    signal: &RawSignal,
    config: &SymbolConfig,
    engine: &EngineConfig,
) -> Option<NormalizedSignal> {
    if !config.enabled {
        debug!(symbol = %signal.symbol, "symbol disabled, skipping signal");
        return None;
    }

    let deviation = deviation::compute(
        signal.eq_price,
        signal.last,
        signal.eq_level,
        config.tick_size,
    );
    if !deviation.is_valid() {
        debug!(symbol = %signal.symbol, "degenerate deviation unit, skipping signal");
        return None;
    }

    let entry_price = pyramid::entry_price(signal.kind, signal.bid, signal.ask);
    let position_size = sizing::position_size(config, engine, signal.last);

    let ladder = if position_size > Decimal::ZERO {
        pyramid::build_ladder(
            signal.kind,
            Some(entry_price),
            deviation.price,
            config.wait_deviations,
            config.max_ladder_depth,
        )
    } else {
        Vec::new()
    };

    let stop_loss = stop_loss::classify(signal.kind, entry_price, signal.last);

    Some(NormalizedSignal {
        signal: signal.clone(),
        deviation,
        entry_price,
        position_size,
        ladder,
        stop_loss,
        cancel_remaining: stop_loss.cancels_remaining(),
        annotated_at: Utc::now(),
    })
}
