use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use trigger_trade_core::{AppConfig, ConfigLoader};
use trigger_trade_data::{load_symbol_table, CsvSignalSource, ExecutionLedger};
use trigger_trade_execution::DryRunGateway;
use trigger_trade_ib::IbGateway;
use trigger_trade_orchestrator::Engine;

#[derive(Parser)]
#[command(name = "trigger-trade")]
#[command(about = "Signal-to-order translation engine for pyramid-laddered entries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the polling loop
    Run {
        /// Config file path
        #[arg(short, long, default_value = "config/Config.toml")]
        config: String,
        /// Dispatch to the live broker gateway instead of the dry-run recorder
        #[arg(long)]
        live: bool,
    },
    /// Run a single cycle and exit
    Once {
        /// Config file path
        #[arg(short, long, default_value = "config/Config.toml")]
        config: String,
        /// Dispatch to the live broker gateway instead of the dry-run recorder
        #[arg(long)]
        live: bool,
    },
    /// Validate configuration and the symbol table, then exit
    CheckConfig {
        /// Config file path
        #[arg(short, long, default_value = "config/Config.toml")]
        config: String,
    },
}

#[derive(Clone, Copy)]
enum RunMode {
    Loop,
    Once,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { config, live } => {
            let config = ConfigLoader::load_from(&config)?;
            dispatch(config, live, RunMode::Loop).await
        }
        Commands::Once { config, live } => {
            let config = ConfigLoader::load_from(&config)?;
            dispatch(config, live, RunMode::Once).await
        }
        Commands::CheckConfig { config } => check_config(&config),
    }
}

async fn dispatch(config: AppConfig, live_flag: bool, mode: RunMode) -> Result<()> {
    let live = live_flag || !config.engine.dry_run;
    if live {
        info!("dispatching LIVE via the broker gateway");
        run_live(config, mode).await
    } else {
        info!("dispatching to the dry-run recorder (no orders leave this machine)");
        run_dry(config, mode).await
    }
}

async fn run_dry(config: AppConfig, mode: RunMode) -> Result<()> {
    let source = CsvSignalSource::new(config.paths.signal_feed.as_str());
    let ledger = ExecutionLedger::open(config.paths.ledger.as_str())?;
    let mut engine = Engine::new(
        config.engine.clone(),
        &config.paths,
        source,
        DryRunGateway::new(),
        ledger,
    );

    match mode {
        RunMode::Loop => engine.run().await?,
        RunMode::Once => {
            let report = engine.run_cycle().await?;
            info!(?report, "single cycle finished");
            engine.shutdown().await?;
        }
    }

    engine.gateway().export_plan(Path::new(&config.paths.plan))?;
    info!(plan = %config.paths.plan, "dry-run plan exported");
    Ok(())
}

async fn run_live(config: AppConfig, mode: RunMode) -> Result<()> {
    let source = CsvSignalSource::new(config.paths.signal_feed.as_str());
    let ledger = ExecutionLedger::open(config.paths.ledger.as_str())?;
    let gateway = IbGateway::connect(config.ib.clone()).await?;
    let mut engine = Engine::new(config.engine.clone(), &config.paths, source, gateway, ledger);

    match mode {
        RunMode::Loop => engine.run().await?,
        RunMode::Once => {
            let report = engine.run_cycle().await?;
            info!(?report, "single cycle finished");
            engine.shutdown().await?;
        }
    }
    Ok(())
}

fn check_config(path: &str) -> Result<()> {
    let config = ConfigLoader::load_from(path)?;
    info!(
        feed = %config.paths.signal_feed,
        symbols = %config.paths.symbol_table,
        ledger = %config.paths.ledger,
        poll_interval_secs = config.engine.poll_interval_secs,
        dry_run = config.engine.dry_run,
        "configuration loaded"
    );

    let table = load_symbol_table(Path::new(&config.paths.symbol_table))?;
    info!(symbols = table.len(), "symbol table loaded");
    Ok(())
}
