use crate::signal::{OrderSide, SignalRow};
use crate::symbol::AssetClass;
use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Pull-based source of raw signal rows.
///
/// `fetch` returns `Ok(None)` when the feed is absent, which the
/// orchestrator treats as a no-op cycle.
#[async_trait]
pub trait SignalSource: Send + Sync {
    async fn fetch(&mut self) -> Result<Option<Vec<SignalRow>>>;
}

/// Capability surface of the order gateway.
///
/// Two implementations are expected: a dry-run recorder and a live
/// broker-session gateway. The engine only ever talks to this trait.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn place_limit_order(
        &mut self,
        symbol: &str,
        asset_class: AssetClass,
        quantity: Decimal,
        price: Decimal,
        side: OrderSide,
    ) -> Result<()>;

    /// `trail_amount` is a price fraction (bps / 10_000), not a bps count.
    async fn place_trailing_stop(
        &mut self,
        symbol: &str,
        asset_class: AssetClass,
        quantity: Decimal,
        trail_amount: Decimal,
        side: OrderSide,
    ) -> Result<()>;

    async fn cancel_all_orders_for_symbol(&mut self, symbol: &str) -> Result<()>;

    /// Releases the gateway connection; called once on engine shutdown.
    async fn disconnect(&mut self) -> Result<()>;
}
