use anyhow::Context;
use clap::Parser;
use herald_demo::{DemoConfig, load_config, run};
use herald_logger::Logger;
use std::path::PathBuf;
use tracing::info;

/// Runs a sample order workflow through the herald event hub.
#[derive(Debug, Parser)]
#[command(name = "herald", version, about)]
struct Cli {
    /// Configuration file; defaults to an optional `herald.*` in the working directory.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of orders to place, overriding `workflow.orders`.
    #[arg(short, long, value_name = "N")]
    orders: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg: DemoConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    if let Some(orders) = cli.orders {
        cfg.workflow.orders = orders;
    }

    let _log = Logger::init(&cfg.logger)?;

    let report = run(&cfg.workflow);
    info!(
        processed = report.processed,
        rejected = report.rejected,
        audited = report.audited,
        notified = report.notified,
        shipped = report.shipped,
        "Workflow finished"
    );

    Ok(())
}
