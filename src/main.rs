//! relayd - line-oriented TCP chat relay.
//!
//! Every connected client is online under a unique display name. Plain lines
//! go to everyone through a single broadcast queue; `to|<name>|<msg>` goes
//! straight to one peer; idle clients are kicked.

mod config;
mod error;
mod handlers;
mod http;
mod metrics;
mod network;
mod state;

use crate::config::Config;
use crate::network::Gateway;
use crate::state::{Hub, ServerInfo, run_dispatcher};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Line-oriented TCP chat relay.
#[derive(Parser, Debug)]
#[command(name = "relayd", version, about)]
struct Args {
    /// Path to a TOML config file. Built-in defaults apply without one.
    #[arg(long, env = "RELAYD_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen IP.
    #[arg(long)]
    ip: Option<IpAddr>,

    /// Override the listen port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path).map_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to load config");
            e
        })?,
        None => Config::default(),
    };
    config.listen.override_with(args.ip, args.port);

    if let Err(errors) = config::validation::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s)", errors.len());
    }

    info!(
        server = %config.server.name,
        listen = %config.listen.address,
        idle = config.timeouts.idle,
        "Starting relayd"
    );

    let (hub, broadcast_queue) = Hub::new(ServerInfo::from_config(&config));
    let hub = Arc::new(hub);
    tokio::spawn(run_dispatcher(Arc::clone(&hub), broadcast_queue));

    // metrics_port = 0 (or unset) disables the HTTP endpoint.
    let metrics_port = config.server.metrics_port.unwrap_or(0);
    if metrics_port == 0 {
        info!("Metrics endpoint disabled");
    } else {
        metrics::init();
        let addr = SocketAddr::new(config.listen.address.ip(), metrics_port);
        tokio::spawn(http::run_http_server(addr, Arc::clone(&hub)));
    }

    let gateway = Gateway::bind(config.listen.address, hub).await?;
    gateway.run().await;
    Ok(())
}
