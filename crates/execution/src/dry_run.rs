//! Dry-run order gateway: records planned actions without network effects.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::info;
use trigger_trade_core::{AssetClass, OrderGateway, OrderSide};

/// One recorded gateway action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    LimitOrder {
        symbol: String,
        asset_class: AssetClass,
        quantity: Decimal,
        price: Decimal,
        side: OrderSide,
    },
    TrailingStop {
        symbol: String,
        asset_class: AssetClass,
        quantity: Decimal,
        trail_amount: Decimal,
        side: OrderSide,
    },
    CancelAll {
        symbol: String,
    },
}

/// Gateway that records every action it is asked to perform.
///
/// Used as the dry-run dispatch target and as the test double for the
/// engine. Recorded actions can be exported as a plan CSV for preview.
#[derive(Debug, Default)]
pub struct DryRunGateway {
    actions: Vec<PlannedAction>,
}

impl DryRunGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions recorded so far, in dispatch order.
    #[must_use]
    pub fn actions(&self) -> &[PlannedAction] {
        &self.actions
    }

    /// Writes the recorded actions to a plan CSV for preview.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn export_plan(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create plan file: {}", path.display()))?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record([
            "Action",
            "Symbol",
            "AssetClass",
            "Side",
            "Quantity",
            "Price",
            "TrailAmount",
        ])?;

        for action in &self.actions {
            match action {
                PlannedAction::LimitOrder {
                    symbol,
                    asset_class,
                    quantity,
                    price,
                    side,
                } => writer.write_record(&[
                    "LIMIT".to_string(),
                    symbol.clone(),
                    asset_class.to_string(),
                    side.to_string(),
                    quantity.to_string(),
                    price.to_string(),
                    String::new(),
                ])?,
                PlannedAction::TrailingStop {
                    symbol,
                    asset_class,
                    quantity,
                    trail_amount,
                    side,
                } => writer.write_record(&[
                    "TRAIL".to_string(),
                    symbol.clone(),
                    asset_class.to_string(),
                    side.to_string(),
                    quantity.to_string(),
                    String::new(),
                    trail_amount.to_string(),
                ])?,
                PlannedAction::CancelAll { symbol } => writer.write_record(&[
                    "CANCEL_ALL".to_string(),
                    symbol.clone(),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                ])?,
            }
        }

        writer.flush()?;
        Ok(())
    }
}

#[async_trait]
impl OrderGateway for DryRunGateway {
    async fn place_limit_order(
        &mut self,
        symbol: &str,
        asset_class: AssetClass,
        quantity: Decimal,
        price: Decimal,
        side: OrderSide,
    ) -> Result<()> {
        info!(symbol, %side, %quantity, %price, "dry-run: limit order planned");
        self.actions.push(PlannedAction::LimitOrder {
            symbol: symbol.to_string(),
            asset_class,
            quantity,
            price,
            side,
        });
        Ok(())
    }

    async fn place_trailing_stop(
        &mut self,
        symbol: &str,
        asset_class: AssetClass,
        quantity: Decimal,
        trail_amount: Decimal,
        side: OrderSide,
    ) -> Result<()> {
        info!(symbol, %side, %quantity, %trail_amount, "dry-run: trailing stop planned");
        self.actions.push(PlannedAction::TrailingStop {
            symbol: symbol.to_string(),
            asset_class,
            quantity,
            trail_amount,
            side,
        });
        Ok(())
    }

    async fn cancel_all_orders_for_symbol(&mut self, symbol: &str) -> Result<()> {
        info!(symbol, "dry-run: cancel-all planned");
        self.actions.push(PlannedAction::CancelAll {
            symbol: symbol.to_string(),
        });
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        info!(actions = self.actions.len(), "dry-run gateway closed");
        Ok(())
    }
}
