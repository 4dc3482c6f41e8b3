// Route Telemetry
// Main entry point

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::prelude::*;

use route_telemetry::cli::render_report;
use route_telemetry::client::{StatsClient, StatsWatcher};
use route_telemetry::config::{load_config, Config};
use route_telemetry::ingest::{replay_file, RecordRequest};
use route_telemetry::metrics::{RoutingTelemetry, TracingHook};
use route_telemetry::server::TelemetryServer;

#[derive(Parser, Debug)]
#[command(name = "route-telemetry")]
#[command(about = "Rolling-window routing telemetry", version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Run the HTTP telemetry daemon
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Print current stats from the daemon
    Stats {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Poll the daemon and redraw stats until interrupted
    Watch {
        /// Poll interval in seconds (overrides config)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Compute stats offline from a JSON Lines event file
    Replay {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Send a single event to the daemon
    Record {
        route: String,
        latency_ms: f64,
        /// Mark the event as failed
        #[arg(long)]
        failed: bool,
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing();

    let config = load_config()?;

    match args.command {
        Command::Serve { bind } => run_serve(config, bind).await,
        Command::Stats { json } => run_stats(&config, json).await,
        Command::Watch { interval } => run_watch(&config, interval).await,
        Command::Replay { file, json } => run_replay(&config, &file, json),
        Command::Record {
            route,
            latency_ms,
            failed,
            query,
            model,
        } => {
            let mut request = RecordRequest::new(route, latency_ms, !failed);
            request.query = query;
            request.model = model;
            run_record(&config, request).await
        }
    }
}

/// Initialize tracing subscriber
fn init_tracing() {
    let show_debug = std::env::var("ROUTE_TELEMETRY_DEBUG")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false);
    let default_level = if show_debug { "debug" } else { "info" };

    // Default: INFO level, can be overridden with RUST_LOG env var
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Bridge log crate → tracing (for dependencies using log crate)
    tracing_log::LogTracer::init().ok();
}

fn build_telemetry(config: &Config) -> RoutingTelemetry {
    let telemetry = RoutingTelemetry::new(config.capacity);
    if config.log_events {
        telemetry.with_hook(Arc::new(TracingHook))
    } else {
        telemetry
    }
}

/// Run HTTP daemon server
async fn run_serve(mut config: Config, bind: Option<String>) -> Result<()> {
    if let Some(bind) = bind {
        config.server.bind_address = bind;
    }

    tracing::info!(capacity = config.capacity, "Telemetry window configured");

    let telemetry = build_telemetry(&config);
    let server = TelemetryServer::new(config.server.clone(), telemetry);

    server.serve().await.inspect_err(|e| {
        tracing::error!(error = %e, "Server exited with error");
    })
}

async fn run_stats(config: &Config, json: bool) -> Result<()> {
    let client = StatsClient::new(&config.client)?;
    let stats = client.fetch_stats().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", render_report(&stats));
    }
    Ok(())
}

async fn run_watch(config: &Config, interval: Option<u64>) -> Result<()> {
    let seconds = interval.unwrap_or(config.client.poll_interval_seconds).max(1);
    let client = StatsClient::new(&config.client)?;
    tracing::info!(daemon = %client.base_url(), interval_secs = seconds, "Watching stats");

    let mut watcher = StatsWatcher::new(client);
    let mut ticker = tokio::time::interval(Duration::from_secs(seconds));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = ticker.tick() => {
                watcher.poll().await;
                // Clear screen and redraw the retained view
                print!("\x1b[2J\x1b[H");
                match watcher.view() {
                    Some(stats) => print!("{}", render_report(stats)),
                    None => println!("Waiting for daemon..."),
                }
                if watcher.is_stale() {
                    println!(
                        "(daemon unreachable, showing last data; {} failed polls)",
                        watcher.consecutive_failures()
                    );
                }
            }
        }
    }

    Ok(())
}

fn run_replay(config: &Config, file: &Path, json: bool) -> Result<()> {
    let mut telemetry = build_telemetry(config);
    replay_file(file, &mut telemetry)?;
    let stats = telemetry.get_stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", render_report(&stats));
    }
    Ok(())
}

async fn run_record(config: &Config, request: RecordRequest) -> Result<()> {
    request.validate()?;
    let client = StatsClient::new(&config.client)?;
    client.record(&request).await?;
    println!("✓ Recorded {} ({} ms)", request.route, request.latency_ms);
    Ok(())
}
