//! Pyramid ladder construction.

use rust_decimal::Decimal;
use trigger_trade_core::{OrderLadderEntry, SignalKind};

/// Rung prices carry a fixed 5-decimal display precision; tick rounding
/// already happened upstream in the deviation unit.
const LADDER_PRICE_DP: u32 = 5;

/// Entry price for a trigger: bid for longs, ask for shorts.
#[must_use]
pub fn entry_price(kind: SignalKind, bid: Decimal, ask: Decimal) -> Decimal {
    match kind {
        SignalKind::LongTrigger => bid,
        SignalKind::ShortTrigger => ask,
    }
}

/// Builds the ordered rung prices for one signal.
///
/// Rung `i` sits `(wait_deviations + i)` deviation units from the entry:
/// above it for longs, below it for shorts, so each successive rung is one
/// unit farther out. Empty when the entry is undefined or the deviation
/// price is not positive.
#[must_use]
pub fn build_ladder(
    kind: SignalKind,
    entry_price: Option<Decimal>,
    sd_price: Decimal,
    wait_deviations: Decimal,
    max_orders: u32,
) -> Vec<OrderLadderEntry> {
    let Some(entry) = entry_price else {
        return Vec::new();
    };
    if sd_price <= Decimal::ZERO {
        return Vec::new();
    }

    let side = kind.side();
    let mut ladder = Vec::with_capacity(max_orders as usize);
    for i in 0..max_orders {
        let offset = (wait_deviations + Decimal::from(i)) * sd_price;
        let price = match kind {
            SignalKind::LongTrigger => entry + offset,
            SignalKind::ShortTrigger => entry - offset,
        };
        ladder.push(OrderLadderEntry {
            price: price.round_dp(LADDER_PRICE_DP),
            side,
        });
    }
    ladder
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use trigger_trade_core::OrderSide;

    #[test]
    fn long_ladder_is_strictly_increasing() {
        let ladder = build_ladder(
            SignalKind::LongTrigger,
            Some(dec!(100)),
            dec!(1),
            dec!(1),
            3,
        );
        let prices: Vec<Decimal> = ladder.iter().map(|entry| entry.price).collect();
        assert_eq!(prices, vec![dec!(101), dec!(102), dec!(103)]);
        assert!(ladder.iter().all(|entry| entry.side == OrderSide::Buy));
    }

    #[test]
    fn short_ladder_is_strictly_decreasing() {
        let ladder = build_ladder(
            SignalKind::ShortTrigger,
            Some(dec!(100)),
            dec!(1),
            dec!(1),
            3,
        );
        let prices: Vec<Decimal> = ladder.iter().map(|entry| entry.price).collect();
        assert_eq!(prices, vec![dec!(99), dec!(98), dec!(97)]);
        assert!(ladder.iter().all(|entry| entry.side == OrderSide::Sell));
    }

    #[test]
    fn undefined_entry_yields_empty_ladder() {
        assert!(build_ladder(SignalKind::LongTrigger, None, dec!(1), dec!(1), 3).is_empty());
    }

    #[test]
    fn non_positive_deviation_yields_empty_ladder() {
        assert!(build_ladder(SignalKind::LongTrigger, Some(dec!(100)), dec!(0), dec!(1), 3).is_empty());
    }

    #[test]
    fn fractional_units_round_to_five_decimals() {
        let ladder = build_ladder(
            SignalKind::LongTrigger,
            Some(dec!(1.08500)),
            dec!(0.0001230000),
            dec!(0.5),
            2,
        );
        assert_eq!(ladder[0].price, dec!(1.08506));
        assert_eq!(ladder[1].price, dec!(1.08518));
    }

    #[test]
    fn entry_price_follows_signal_side() {
        assert_eq!(
            entry_price(SignalKind::LongTrigger, dec!(99.9), dec!(100.1)),
            dec!(99.9)
        );
        assert_eq!(
            entry_price(SignalKind::ShortTrigger, dec!(99.9), dec!(100.1)),
            dec!(100.1)
        );
    }
}
