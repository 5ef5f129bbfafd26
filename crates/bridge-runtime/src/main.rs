//! Air-Bridge command line entry point.

use anyhow::Result;
use bridge_runtime::cli::{Cli, Command};
use bridge_runtime::{commands, KeyMaterial};
use bridge_telemetry::{init_telemetry, TelemetryConfig};
use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_telemetry(&TelemetryConfig::from_env())?;

    match cli.command {
        Command::Record {
            keys,
            provider,
            record_file,
        } => {
            let config = provider.runtime_config(Some(record_file));
            let keys = KeyMaterial::from(keys);

            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            tokio::spawn(async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        info!("[runtime] interrupt received, shutting down");
                        let _ = shutdown_tx.send(true);
                    }
                    Err(e) => {
                        error!("[runtime] failed to listen for interrupt: {}", e);
                        shutdown_tx.closed().await;
                    }
                }
            });

            commands::record(&keys, &config, shutdown_rx).await?;
        }
        Command::Locate { keys, provider } => {
            commands::locate(&keys.into(), &provider.runtime_config(None)).await?;
        }
        Command::Read {
            keys,
            provider,
            message,
            bytes,
        } => {
            commands::read(&keys.into(), &provider.runtime_config(None), message, bytes).await?;
        }
        Command::Decrypt {
            privkey,
            encpayload,
        } => {
            commands::decrypt(&privkey, &encpayload)?;
        }
    }

    Ok(())
}
