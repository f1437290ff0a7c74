use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use signal_advisor_core::{AdvisorConfig, SystemClock};
use tokio::sync::oneshot;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod console;
mod http;
mod sessions;

use crate::console::Walkthrough;
use crate::http::AdvisorServer;
use crate::sessions::SessionRegistry;

const REAP_PERIOD: Duration = Duration::from_secs(60);

#[derive(Parser, Debug)]
#[command(
    name = "signal-advisor",
    author,
    version,
    about = "Predict the next traffic signal's phase along a fixed route",
    long_about = "Steps a vehicle through a fixed sequence of waypoints, finds the nearest \
                  traffic signal at each one, and predicts whether it will be red or green \
                  along with the distance and ETA at the configured speed.\n\n\
                  Without --config the built-in Chandigarh route is used."
)]
struct Args {
    /// Scenario JSON (speed limits, route, signals)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (show debug messages)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the advisor page and its JSON API
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:8080")]
        bind: SocketAddr,

        /// Seconds a session may go untouched before it is dropped
        #[arg(long, default_value_t = 600)]
        idle_timeout: u32,
    },

    /// Walk the route in the terminal with a simulated clock
    Simulate {
        /// Vehicle speed in km/h (defaults to the scenario default)
        #[arg(short, long)]
        speed: Option<f64>,

        /// Number of waypoints to visit; wraps past the end of the route
        #[arg(short = 'n', long, default_value_t = 5)]
        steps: usize,

        /// Simulated seconds between waypoints
        #[arg(short, long, default_value_t = 10.0)]
        interval: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match &args.config {
        Some(path) => AdvisorConfig::from_path(path)
            .with_context(|| format!("failed to load scenario from {}", path.display()))?,
        None => AdvisorConfig::chandigarh().context("built-in scenario is invalid")?,
    };
    let scenario = Arc::new(config.into_scenario().context("invalid scenario")?);

    info!(
        waypoints = scenario.route().len(),
        signals = scenario.signals().len(),
        "scenario loaded"
    );

    match args.command {
        Command::Serve { bind, idle_timeout } => {
            let idle_timeout = TimeDelta::seconds(i64::from(idle_timeout));
            let registry = Arc::new(SessionRegistry::new(scenario, Arc::new(SystemClock), idle_timeout));
            let reaper = registry.spawn_reaper(REAP_PERIOD);
            let server = AdvisorServer::bind(bind, registry)
                .await
                .with_context(|| format!("failed to bind {bind}"))?;

            let (shutdown_tx, shutdown_rx) = oneshot::channel();
            info!(addr = %server.local_addr()?, "serving advisories");

            tokio::spawn(async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        info!("shutting down");
                        let _ = shutdown_tx.send(());
                    }
                    // Dropping the sender would stop the server, so hold on to it.
                    Err(error) => {
                        warn!(%error, "cannot listen for ctrl-c");
                        std::future::pending::<()>().await;
                        drop(shutdown_tx);
                    }
                }
            });

            server.run(shutdown_rx).await.context("server failed")?;
            reaper.abort();
        }
        Command::Simulate {
            speed,
            steps,
            interval,
        } => {
            Walkthrough {
                speed_kmh: speed,
                steps,
                interval_s: interval,
            }
            .run(scenario)?;
        }
    }

    Ok(())
}
