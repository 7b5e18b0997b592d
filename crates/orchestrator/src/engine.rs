//! The polling cycle engine.
//!
//! One cycle: fetch -> normalize -> ledger filter -> annotate -> snapshot
//! -> dispatch -> mark. Cycles never overlap; the loop sleeps the
//! configured interval between them and stops cleanly on ctrl-c.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, error, info, warn};
use trigger_trade_core::{
    EngineConfig, NormalizedSignal, OrderGateway, PathsConfig, SignalSource, SymbolConfig,
};
use trigger_trade_data::{load_symbol_table, write_snapshot, ExecutionLedger};
use trigger_trade_execution::dispatch_signal;
use trigger_trade_signals::{annotate, normalize};

use crate::error::CycleError;

/// Summary of one polling cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Rows read from the feed.
    pub fetched: usize,
    /// Signals surviving normalization.
    pub normalized: usize,
    /// Signals already in the ledger.
    pub already_processed: usize,
    /// Signals skipped for configuration or pipeline reasons.
    pub skipped: usize,
    /// Signals dispatched this cycle.
    pub dispatched: usize,
    /// Gateway actions emitted this cycle.
    pub orders: usize,
}

pub struct Engine<S, G>
where
    S: SignalSource,
    G: OrderGateway,
{
    config: EngineConfig,
    symbol_table_path: PathBuf,
    snapshot_path: PathBuf,
    source: S,
    gateway: G,
    ledger: ExecutionLedger,
}

impl<S, G> Engine<S, G>
where
    S: SignalSource,
    G: OrderGateway,
{
    #[must_use]
    pub fn new(
        config: EngineConfig,
        paths: &PathsConfig,
        source: S,
        gateway: G,
        ledger: ExecutionLedger,
    ) -> Self {
        Self {
            config,
            symbol_table_path: PathBuf::from(&paths.symbol_table),
            snapshot_path: PathBuf::from(&paths.snapshot),
            source,
            gateway,
            ledger,
        }
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.config.poll_interval_secs)
    }

    /// The gateway, for post-run inspection (plan export in dry-run mode).
    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Releases the gateway connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway fails to disconnect cleanly.
    pub async fn shutdown(&mut self) -> anyhow::Result<()> {
        self.gateway.disconnect().await
    }

    /// Runs one full cycle.
    ///
    /// # Errors
    ///
    /// Returns a [`CycleError`]; the caller decides retry-vs-stop via
    /// [`CycleError::is_fatal`].
    pub async fn run_cycle(&mut self) -> Result<CycleReport, CycleError> {
        let mut report = CycleReport::default();

        let Some(rows) = self.source.fetch().await.map_err(CycleError::Feed)? else {
            debug!("signal feed absent, cycle is a no-op");
            return Ok(report);
        };
        report.fetched = rows.len();
        if rows.is_empty() {
            info!("signal feed is empty");
            return Ok(report);
        }

        let signals = normalize(&rows);
        report.normalized = signals.len();

        let pending: Vec<_> = signals
            .iter()
            .filter(|signal| !self.ledger.contains(&signal.identity().ledger_key()))
            .collect();
        report.already_processed = report.normalized - pending.len();
        if pending.is_empty() {
            info!("no new signals to process");
            return Ok(report);
        }

        // Symbol parameters are re-read every cycle; the table is cheap and
        // operators edit it while the loop runs.
        let table = load_symbol_table(&self.symbol_table_path).map_err(CycleError::Config)?;

        let mut annotated: Vec<(NormalizedSignal, SymbolConfig)> = Vec::new();
        for signal in pending {
            let Some(symbol_config) = table.get(&signal.symbol) else {
                warn!(symbol = %signal.symbol, "no symbol configuration, skipping signal");
                report.skipped += 1;
                continue;
            };
            match annotate(signal, symbol_config, &self.config) {
                Some(normalized) => annotated.push((normalized, symbol_config.clone())),
                None => report.skipped += 1,
            }
        }

        let snapshot: Vec<NormalizedSignal> = annotated
            .iter()
            .map(|(normalized, _)| normalized.clone())
            .collect();
        if let Err(e) = write_snapshot(&self.snapshot_path, &snapshot) {
            // Audit artifact; losing one snapshot must not block dispatch.
            warn!(error = %e, "failed to write cycle snapshot");
        }

        for (normalized, symbol_config) in &annotated {
            let key = normalized.signal.identity().ledger_key();
            let result = dispatch_signal(&mut self.gateway, normalized, symbol_config).await;

            // Mark after the dispatch attempt, success or failure: a
            // partially dispatched ladder is never re-attempted.
            self.ledger.append(&[key]).map_err(CycleError::Ledger)?;

            match result {
                Ok(outcome) => {
                    report.dispatched += 1;
                    report.orders += outcome.total();
                }
                Err(e) => return Err(CycleError::Gateway(e)),
            }
        }

        info!(
            dispatched = report.dispatched,
            orders = report.orders,
            skipped = report.skipped,
            already_processed = report.already_processed,
            "cycle complete"
        );
        Ok(report)
    }

    /// Runs the polling loop until interrupted or a fatal error occurs.
    ///
    /// # Errors
    ///
    /// Returns the fatal error that stopped the loop; gateway-level cycle
    /// failures are logged and retried on the next interval instead.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut interval = tokio::time::interval(self.poll_interval());
        info!(
            interval_secs = self.config.poll_interval_secs,
            "engine started"
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match self.run_cycle().await {
                        Ok(report) => debug!(?report, "cycle finished"),
                        Err(e) if e.is_fatal() => {
                            error!(error = %e, "fatal error, stopping engine");
                            let _ = self.gateway.disconnect().await;
                            return Err(e.into());
                        }
                        Err(e) => error!(error = %e, "cycle aborted, retrying next interval"),
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupt received, stopping engine");
                    break;
                }
            }
        }

        self.gateway.disconnect().await?;
        Ok(())
    }
}
