//! camsign status server
//!
//! Client devices report whether their camera is in use. The server
//! aggregates the reports and switches a networked smart outlet (the
//! "camera in use" sign) on while any recently reporting device has its
//! camera on.
//!
//! Usage:
//!   camsign-server serve 192.168.1.50 --port 9988
//!   camsign-server plug 192.168.1.50 info
//!
//! Reports are held in memory only and are lost on restart.

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use camsign_plug::PlugClient;
use camsign_server::{build_router, AppState};
use camsign_sync::{Reconciler, StatusStore, SyncConfig, SyncLoop};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "camsign-server")]
#[command(about = "Aggregates camera-in-use reports and drives an indicator outlet")]
struct Args {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the status API and the periodic outlet sync
    Serve {
        /// Address of the outlet
        outlet: String,

        /// HTTP port to listen on
        #[arg(short, long, default_value = "9988")]
        port: u16,

        /// Address to bind the HTTP listener to
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,

        /// TCP port of the outlet's control protocol
        #[arg(long, default_value = "9999")]
        outlet_port: u16,

        /// Seconds between periodic syncs
        #[arg(long, default_value = "60")]
        sync_interval: u64,

        /// Seconds a report stays eligible to turn the sign on
        #[arg(long, default_value = "900")]
        freshness_window: u64,
    },

    /// Send one command to the outlet and print its reply
    Plug {
        /// Address of the outlet
        outlet: String,

        /// TCP port of the outlet's control protocol
        #[arg(long, default_value = "9999")]
        outlet_port: u16,

        #[command(subcommand)]
        action: PlugAction,
    },
}

#[derive(Subcommand, Debug)]
enum PlugAction {
    /// Switch the outlet on
    On,
    /// Switch the outlet off
    Off,
    /// Print system information
    Info,
    /// Print system information and energy meter readings
    Meter,
    /// Print per-day energy statistics for a month
    Daystat {
        #[arg(long)]
        month: u32,
        #[arg(long)]
        year: i32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    match args.command {
        Command::Serve {
            outlet,
            port,
            bind,
            outlet_port,
            sync_interval,
            freshness_window,
        } => {
            let config = SyncConfig {
                freshness_window: Duration::from_secs(freshness_window),
                sync_interval: Duration::from_secs(sync_interval.max(1)),
            };
            serve(PlugClient::new(outlet).with_port(outlet_port), &bind, port, config).await
        }
        Command::Plug {
            outlet,
            outlet_port,
            action,
        } => run_plug(PlugClient::new(outlet).with_port(outlet_port), action).await,
    }
}

async fn serve(plug: PlugClient, bind: &str, port: u16, config: SyncConfig) -> Result<()> {
    info!("camsign server starting...");
    info!("Outlet: {}:{}", plug.host(), plug.port());

    let reconciler = Arc::new(Reconciler::new(
        Arc::new(StatusStore::new()),
        Arc::new(plug),
        config,
    ));
    let sync_loop = SyncLoop::spawn(reconciler.clone());

    let app = build_router(AppState::new(reconciler));
    let listener = tokio::net::TcpListener::bind((bind, port))
        .await
        .with_context(|| format!("Failed to bind HTTP port {port}"))?;
    info!("HTTP status API listening on {}:{}", bind, port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    sync_loop.shutdown().await;
    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn run_plug(plug: PlugClient, action: PlugAction) -> Result<()> {
    let reply = match action {
        PlugAction::On => plug.turn_on().await.map(|()| None),
        PlugAction::Off => plug.turn_off().await.map(|()| None),
        PlugAction::Info => plug.system_info().await.map(Some),
        PlugAction::Meter => plug.meter_info().await.map(Some),
        PlugAction::Daystat { month, year } => plug.daily_stats(month, year).await.map(Some),
    }
    .with_context(|| format!("Outlet {}:{} did not answer", plug.host(), plug.port()))?;

    if let Some(reply) = reply {
        println!("{reply}");
    }
    Ok(())
}
