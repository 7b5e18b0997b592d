//! Stop-loss bps progression: a state machine over profit, not time.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use trigger_trade_core::{SignalKind, StopLossDirective};

/// Hard stop: loss of 1% of entry, overriding every trailing tier.
const HARD_STOP_BPS: i64 = -100;

/// Profit tier -> trailing stop, highest satisfied tier wins.
const TRAIL_TIERS: &[(i64, i64)] = &[(25, 15), (15, 10), (10, 6), (6, 4), (4, 2)];

/// Trailing stop used below every tabulated tier.
const BASE_TRAIL_BPS: i64 = 2;

/// Profit where the fixed +10 bps / +10 bps extrapolation takes over.
const EXTRAPOLATION_START_BPS: i64 = 35;

/// Signed profit of the position in basis points.
#[must_use]
pub fn profit_bps(kind: SignalKind, entry_price: Decimal, last_price: Decimal) -> Decimal {
    if entry_price.is_zero() {
        return Decimal::ZERO;
    }
    let signed = match kind {
        SignalKind::LongTrigger => last_price - entry_price,
        SignalKind::ShortTrigger => entry_price - last_price,
    };
    signed / entry_price * Decimal::from(10_000)
}

/// Classifies a position's realized profit into a stop-loss directive.
#[must_use]
pub fn classify(kind: SignalKind, entry_price: Decimal, last_price: Decimal) -> StopLossDirective {
    classify_profit(profit_bps(kind, entry_price, last_price))
}

/// Directive for a precomputed profit in bps.
///
/// Beyond the table, the trailing stop follows the price at a constant
/// 10 bps band: `step = floor((profit - 35) / 10)`,
/// `trail = 35 + 10 * step - 10`.
#[must_use]
pub fn classify_profit(profit_bps: Decimal) -> StopLossDirective {
    if profit_bps <= Decimal::from(HARD_STOP_BPS) {
        return StopLossDirective::ExitFull;
    }

    if profit_bps >= Decimal::from(EXTRAPOLATION_START_BPS) {
        let start = Decimal::from(EXTRAPOLATION_START_BPS);
        let step = ((profit_bps - start) / Decimal::from(10))
            .floor()
            .to_i64()
            .unwrap_or(0);
        return StopLossDirective::Trail {
            bps: EXTRAPOLATION_START_BPS + 10 * step - 10,
        };
    }

    let mut trail = BASE_TRAIL_BPS;
    for &(tier, stop) in TRAIL_TIERS {
        if profit_bps >= Decimal::from(tier) {
            trail = stop;
            break;
        }
    }
    StopLossDirective::Trail { bps: trail }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn table_tiers_are_exact() {
        assert_eq!(classify_profit(dec!(25)), StopLossDirective::Trail { bps: 15 });
        assert_eq!(classify_profit(dec!(24.9)), StopLossDirective::Trail { bps: 10 });
        assert_eq!(classify_profit(dec!(15)), StopLossDirective::Trail { bps: 10 });
        assert_eq!(classify_profit(dec!(10)), StopLossDirective::Trail { bps: 6 });
        assert_eq!(classify_profit(dec!(6)), StopLossDirective::Trail { bps: 4 });
        assert_eq!(classify_profit(dec!(4)), StopLossDirective::Trail { bps: 2 });
    }

    #[test]
    fn below_all_tiers_uses_base_trail() {
        assert_eq!(classify_profit(dec!(3.9)), StopLossDirective::Trail { bps: 2 });
        assert_eq!(classify_profit(dec!(0)), StopLossDirective::Trail { bps: 2 });
        assert_eq!(classify_profit(dec!(-50)), StopLossDirective::Trail { bps: 2 });
    }

    #[test]
    fn extrapolation_boundary_at_35() {
        // step = floor(0/10) = 0 -> 35 + 0 - 10 = 25
        assert_eq!(classify_profit(dec!(35)), StopLossDirective::Trail { bps: 25 });
        // 34.9 still sits in the top table tier
        assert_eq!(classify_profit(dec!(34.9)), StopLossDirective::Trail { bps: 15 });
    }

    #[test]
    fn extrapolation_steps_every_10_bps() {
        // step = floor(10/10) = 1 -> 35 + 10 - 10 = 35
        assert_eq!(classify_profit(dec!(45)), StopLossDirective::Trail { bps: 35 });
        assert_eq!(classify_profit(dec!(44.9)), StopLossDirective::Trail { bps: 25 });
        // step = floor(20/10) = 2 -> 45
        assert_eq!(classify_profit(dec!(55)), StopLossDirective::Trail { bps: 45 });
        // step = floor(65/10) = 6 -> 85
        assert_eq!(classify_profit(dec!(100)), StopLossDirective::Trail { bps: 85 });
    }

    #[test]
    fn hard_stop_overrides_everything() {
        assert_eq!(classify_profit(dec!(-100)), StopLossDirective::ExitFull);
        assert_eq!(classify_profit(dec!(-150)), StopLossDirective::ExitFull);
        assert_eq!(classify_profit(dec!(-99.9)), StopLossDirective::Trail { bps: 2 });
    }

    #[test]
    fn profit_is_signed_by_side() {
        // Long: last above entry is profit
        assert_eq!(
            profit_bps(SignalKind::LongTrigger, dec!(100), dec!(100.25)),
            dec!(25)
        );
        // Short: last below entry is profit
        assert_eq!(
            profit_bps(SignalKind::ShortTrigger, dec!(100), dec!(99)),
            dec!(100)
        );
        // Long underwater by 1.5%
        assert_eq!(
            profit_bps(SignalKind::LongTrigger, dec!(100), dec!(98.5)),
            dec!(-150)
        );
    }

    #[test]
    fn classify_composes_profit_and_table() {
        assert_eq!(
            classify(SignalKind::LongTrigger, dec!(100), dec!(100.25)),
            StopLossDirective::Trail { bps: 15 }
        );
        assert_eq!(
            classify(SignalKind::ShortTrigger, dec!(100), dec!(99)),
            StopLossDirective::Trail { bps: 85 }
        );
        assert_eq!(
            classify(SignalKind::LongTrigger, dec!(100), dec!(98.5)),
            StopLossDirective::ExitFull
        );
    }
}
