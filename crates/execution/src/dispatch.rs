//! Dispatch of one annotated signal to the order gateway.

use anyhow::Result;
use rust_decimal::Decimal;
use tracing::debug;
use trigger_trade_core::{NormalizedSignal, OrderGateway, SymbolConfig};

/// Counts of gateway actions emitted for one signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub limit_orders: usize,
    pub trailing_stops: usize,
    pub cancels: usize,
}

impl DispatchOutcome {
    #[must_use]
    pub fn total(&self) -> usize {
        self.limit_orders + self.trailing_stops + self.cancels
    }
}

/// Emits one limit order per ladder rung, in rung order, then the stop
/// action. The order side comes from the signal kind; the stop directive
/// never changes it. A zero-quantity signal emits no orders and no
/// trailing stop, but an `ExitFull` cancel still goes out.
///
/// # Errors
///
/// Propagates the first gateway error; anything already sent stays sent.
pub async fn dispatch_signal(
    gateway: &mut dyn OrderGateway,
    normalized: &NormalizedSignal,
    config: &SymbolConfig,
) -> Result<DispatchOutcome> {
    let mut outcome = DispatchOutcome::default();
    let symbol = normalized.signal.symbol.as_str();
    let quantity = normalized.position_size;

    for rung in &normalized.ladder {
        gateway
            .place_limit_order(symbol, config.asset_class, quantity, rung.price, rung.side)
            .await?;
        outcome.limit_orders += 1;
    }

    if normalized.stop_loss.cancels_remaining() {
        gateway.cancel_all_orders_for_symbol(symbol).await?;
        outcome.cancels += 1;
    } else if let Some(trail_amount) = normalized.stop_loss.trail_amount() {
        if quantity > Decimal::ZERO {
            gateway
                .place_trailing_stop(
                    symbol,
                    config.asset_class,
                    quantity,
                    trail_amount,
                    normalized.signal.kind.side(),
                )
                .await?;
            outcome.trailing_stops += 1;
        } else {
            debug!(symbol, "zero quantity, trailing stop suppressed");
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dry_run::{DryRunGateway, PlannedAction};
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use trigger_trade_core::{
        AssetClass, DeviationUnit, OrderLadderEntry, OrderSide, RawSignal, SignalKind,
        StopLossDirective,
    };

    fn normalized(stop_loss: StopLossDirective, quantity: Decimal) -> NormalizedSignal {
        NormalizedSignal {
            signal: RawSignal {
                date: "2025-08-01".to_string(),
                time: "09:30:00".to_string(),
                symbol: "AAPL".to_string(),
                kind: SignalKind::LongTrigger,
                bid: dec!(100.00),
                ask: dec!(100.10),
                last: dec!(100.05),
                eq_price: dec!(101.05),
                eq_level: dec!(10),
                bias: dec!(1),
            },
            deviation: DeviationUnit {
                raw: dec!(0.1),
                ticks: 10,
                price: dec!(0.10),
            },
            entry_price: dec!(100.00),
            position_size: quantity,
            ladder: if quantity > Decimal::ZERO {
                vec![
                    OrderLadderEntry {
                        price: dec!(100.10),
                        side: OrderSide::Buy,
                    },
                    OrderLadderEntry {
                        price: dec!(100.20),
                        side: OrderSide::Buy,
                    },
                ]
            } else {
                Vec::new()
            },
            stop_loss,
            cancel_remaining: stop_loss.cancels_remaining(),
            annotated_at: Utc::now(),
        }
    }

    fn config() -> SymbolConfig {
        SymbolConfig::with_defaults("AAPL", AssetClass::Equity)
    }

    #[tokio::test]
    async fn ladder_dispatches_in_rung_order_then_trails() {
        let mut gateway = DryRunGateway::new();
        let normalized = normalized(StopLossDirective::Trail { bps: 4 }, dec!(47));

        let outcome = dispatch_signal(&mut gateway, &normalized, &config())
            .await
            .unwrap();
        assert_eq!(outcome.limit_orders, 2);
        assert_eq!(outcome.trailing_stops, 1);
        assert_eq!(outcome.cancels, 0);

        let actions = gateway.actions();
        assert_eq!(actions.len(), 3);
        assert!(matches!(
            &actions[0],
            PlannedAction::LimitOrder { price, .. } if *price == dec!(100.10)
        ));
        assert!(matches!(
            &actions[1],
            PlannedAction::LimitOrder { price, .. } if *price == dec!(100.20)
        ));
        assert!(matches!(
            &actions[2],
            PlannedAction::TrailingStop { trail_amount, .. } if *trail_amount == dec!(0.0004)
        ));
    }

    #[tokio::test]
    async fn exit_full_cancels_instead_of_trailing() {
        let mut gateway = DryRunGateway::new();
        let normalized = normalized(StopLossDirective::ExitFull, dec!(47));

        let outcome = dispatch_signal(&mut gateway, &normalized, &config())
            .await
            .unwrap();
        assert_eq!(outcome.cancels, 1);
        assert_eq!(outcome.trailing_stops, 0);
        assert!(matches!(
            gateway.actions().last().unwrap(),
            PlannedAction::CancelAll { symbol } if symbol == "AAPL"
        ));
    }

    #[tokio::test]
    async fn zero_quantity_emits_nothing_but_cancel_still_goes_out() {
        let mut gateway = DryRunGateway::new();
        let trailed = normalized(StopLossDirective::Trail { bps: 2 }, Decimal::ZERO);
        let outcome = dispatch_signal(&mut gateway, &trailed, &config())
            .await
            .unwrap();
        assert_eq!(outcome.total(), 0);
        assert!(gateway.actions().is_empty());

        let exited = normalized(StopLossDirective::ExitFull, Decimal::ZERO);
        let outcome = dispatch_signal(&mut gateway, &exited, &config())
            .await
            .unwrap();
        assert_eq!(outcome.cancels, 1);
    }
}
