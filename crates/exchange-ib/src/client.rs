//! IB Gateway/TWS session management.

use anyhow::{Context, Result};
use tracing::info;
use trigger_trade_core::IbSettings;

/// Wrapper around the ibapi client bound to one gateway session.
pub struct IbSession {
    settings: IbSettings,
    client: ibapi::Client,
}

impl IbSession {
    /// Connect to IB Gateway/TWS.
    pub async fn connect(settings: IbSettings) -> Result<Self> {
        let url = settings.connection_url();
        info!(url = %url, client_id = settings.client_id, "Connecting to IB Gateway");

        let client = ibapi::Client::connect(&url, settings.client_id)
            .await
            .context("Failed to connect to IB Gateway")?;

        info!("Connected to IB Gateway");
        Ok(Self { settings, client })
    }

    /// Get a reference to the underlying ibapi client.
    pub fn inner(&self) -> &ibapi::Client {
        &self.client
    }

    /// Check if the connection is alive.
    pub fn is_connected(&self) -> bool {
        self.client.is_connected()
    }

    /// Connection settings this session was created with.
    pub fn settings(&self) -> &IbSettings {
        &self.settings
    }
}
