//! Motorola/Arris cable modem to InfluxDB2 forwarder
//!
//! Logs in to the modem's HNAP management endpoint, polls downstream and
//! upstream channel status plus device identity, and writes the result to
//! InfluxDB2.
//!
//! # Commands
//!
//! - `run` (default): poll every `COLLECTOR_INTERVAL_SEC` until SIGINT/SIGTERM
//! - `check`: poll once and print the resulting data points

mod circuit_breaker;
mod collector;
mod config;
mod error;
mod hnap;
mod influxdb;
mod model;

#[cfg(test)]
mod test_utils;

use crate::circuit_breaker::{BreakerPolicy, CircuitBreaker};
use crate::collector::{CircuitProtectedCollector, ModemMetricCollector};
use crate::error::Error;
use crate::hnap::Gatherer;
use crate::model::{batch_collect_metrics, MetricCollector};
use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::signal::ctrl_c;
use tokio::signal::unix::{signal, SignalKind};
use tokio::task::JoinError;
use tokio::time;
use tokio::time::{sleep, Duration};

/// Forward cable modem channel telemetry to InfluxDB2
#[derive(Parser, Debug)]
#[command(name = "moto-hnap-forwarder", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Poll the modem periodically and write to InfluxDB
    Run,
    /// Poll the modem once and print the data points
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = config::load_app_config()?;
    tracing_subscriber::fmt()
        .with_max_level(app_config.log_level())
        .init();

    let modem_config = config::load_modem_config()?;
    tracing::debug!(config = ?modem_config, "loaded modem configuration");
    let gatherer =
        Arc::new(Gatherer::new(&modem_config).context("Failed to build modem HTTP client")?);
    let modem_collector = ModemMetricCollector::new(gatherer);

    match cli.command.unwrap_or(Command::Run) {
        Command::Check => Ok(check(&modem_collector).await?),
        Command::Run => run(modem_collector).await,
    }
}

/// Polls once and prints every data point to stdout.
async fn check(collector: &dyn MetricCollector) -> error::Result<()> {
    let builders = collector.collect(Local::now()).await?;
    for builder in builders {
        println!("{:?}", builder.to_point()?);
    }
    Ok(())
}

/// Runs the collection loop until SIGINT or SIGTERM.
async fn run(modem_collector: ModemMetricCollector) -> anyhow::Result<()> {
    let collector_config = Arc::new(config::load_collector_config()?);
    let circuit_breaker_config = config::load_circuit_breaker_config()?;
    let influx_config = config::load_influx_config()?;
    let influx_client = Arc::new(influxdb::Client::new(influx_config));

    let circuit_breaker = CircuitBreaker::new(
        "ModemMetricCollector",
        BreakerPolicy::from(&circuit_breaker_config),
    );
    let collectors: Arc<Vec<Box<dyn MetricCollector>>> =
        Arc::new(vec![Box::new(CircuitProtectedCollector::new(
            "ModemMetricCollector",
            Arc::new(modem_collector),
            circuit_breaker,
        ))]);

    // Factory for the collection task so it can be recreated after a crash
    let create_task = || -> tokio::task::JoinHandle<()> {
        let config = Arc::clone(&collector_config);
        tokio::spawn(create_collect_task(
            Arc::clone(&influx_client),
            Arc::clone(&collectors),
            Duration::from_secs(config.interval_sec),
            "modem_collectors",
            config.task_timeout_seconds,
        ))
    };
    let mut collect_task = create_task();

    let mut sig_term =
        signal(SignalKind::terminate()).context("Failed to register SIGTERM handler")?;
    tracing::info!("Running... Press Ctrl-C or send SIGTERM to terminate.");
    loop {
        tokio::select! {
            _ = sig_term.recv() => {
                tracing::info!("Received SIGTERM. Exiting...");
                break;
            }
            _ = ctrl_c() => {
                tracing::info!("Received SIGINT. Exiting...");
                break;
            }
            result = &mut collect_task => {
                handle_task_result("modem_collectors", result);
                collect_task = create_task();
            }
        }
    }
    collect_task.abort();
    Ok(())
}

/// Wraps a future with a timeout so a hung modem cannot stall the loop.
async fn with_timeout<F>(task_name: &'static str, future: F, timeout_seconds: u64)
where
    F: IntoFuture,
{
    let timeout_duration = Duration::from_secs(timeout_seconds);

    if time::timeout(timeout_duration, future).await.is_err() {
        tracing::error!(task = task_name, timeout_seconds, "Task timed out");
    }
}

/// Runs one collection cycle, writes the points, then sleeps for `interval`.
///
/// A failed poll writes nothing for that cycle.
async fn create_collect_task(
    influx_client: Arc<influxdb::Client>,
    collectors: Arc<Vec<Box<dyn MetricCollector>>>,
    interval: Duration,
    task_name: &'static str,
    timeout_seconds: u64,
) {
    with_timeout(
        task_name,
        async {
            let points = batch_collect_metrics(&collectors, Local::now()).await;

            for point in &points {
                tracing::trace!("{:?}", point);
            }

            let count = points.len();
            match influx_client.write(points).await {
                Ok(_) => tracing::info!(task = task_name, count, "Wrote points to InfluxDB"),
                Err(e) => tracing::error!(
                    task = task_name,
                    error = %Error::from(e),
                    "Failed to write points to InfluxDB"
                ),
            }
        },
        timeout_seconds,
    )
    .await;
    sleep(interval).await;
}

/// Logs how a supervised task ended.
fn handle_task_result(task_name: &str, result: Result<(), JoinError>) {
    match result {
        Ok(_) => {
            tracing::debug!("Task {} completed.", task_name);
        }
        Err(e) => {
            tracing::error!("Task {} failed: {:?}", task_name, e);
        }
    }
}
