//! Live order gateway bound to an IB session.

use anyhow::{bail, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, info};
use trigger_trade_core::{AssetClass, IbSettings, OrderGateway, OrderSide};

use crate::client::IbSession;
use crate::contracts;

/// `OrderGateway` implementation backed by a live IB Gateway session.
///
/// Connection management is real; the wire-level order submission still
/// needs an IB Gateway to develop against and is left behind explicit
/// errors so a misconfigured live run fails loudly instead of silently.
pub struct IbGateway {
    session: IbSession,
}

impl IbGateway {
    /// Connects a new gateway session.
    pub async fn connect(settings: IbSettings) -> Result<Self> {
        let session = IbSession::connect(settings).await?;
        Ok(Self { session })
    }

    fn ensure_connected(&self) -> Result<()> {
        if !self.session.is_connected() {
            bail!("IB session lost");
        }
        Ok(())
    }
}

#[async_trait]
impl OrderGateway for IbGateway {
    async fn place_limit_order(
        &mut self,
        symbol: &str,
        asset_class: AssetClass,
        quantity: Decimal,
        price: Decimal,
        side: OrderSide,
    ) -> Result<()> {
        self.ensure_connected()?;
        info!(symbol, %side, %quantity, %price, class = %asset_class, "Placing limit order");

        match asset_class {
            AssetClass::Equity => {
                // SMART-routed USD stock contract.
                let _contract = ibapi::contracts::Contract::stock(symbol);
            }
            AssetClass::Forex => {
                let Some((base, quote)) = contracts::forex_pair(symbol) else {
                    bail!("unrecognized forex symbol: {symbol}");
                };
                debug!(base, quote, "Resolved forex pair");
            }
        }

        // TODO: Build the ibapi order, submit via the session, and monitor
        // status until accepted or rejected.
        bail!("IB order transmission not yet implemented, use the dry-run gateway")
    }

    async fn place_trailing_stop(
        &mut self,
        symbol: &str,
        asset_class: AssetClass,
        quantity: Decimal,
        trail_amount: Decimal,
        side: OrderSide,
    ) -> Result<()> {
        self.ensure_connected()?;
        // The protective order trades against the entry side.
        let stop_side = side.exit_side();
        info!(symbol, %stop_side, %quantity, %trail_amount, class = %asset_class, "Placing trailing stop");

        // TODO: Submit a TRAIL order (GTC) via the session.
        bail!("IB order transmission not yet implemented, use the dry-run gateway")
    }

    async fn cancel_all_orders_for_symbol(&mut self, symbol: &str) -> Result<()> {
        self.ensure_connected()?;
        info!(symbol, "Cancelling all open orders for symbol");

        // TODO: Enumerate open trades for the symbol and cancel each.
        bail!("IB order cancellation not yet implemented, use the dry-run gateway")
    }

    async fn disconnect(&mut self) -> Result<()> {
        info!("Releasing IB Gateway session");
        // Dropping the client closes the socket; nothing else to release.
        Ok(())
    }
}
