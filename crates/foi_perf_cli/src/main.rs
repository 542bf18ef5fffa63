//! foi-performance CLI: university FOI statistics from WhatDoTheyKnow, as CSV.

mod logging;

use clap::Parser;
use foi_perf::wdtk::DEFAULT_BASE_URL;
use foi_perf::{run, FetchConfig, Fetcher};
use foi_perf_report::CsvReport;
use logging::LogConfig;
use std::time::Duration;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let log = LogConfig { debug: cli.debug };
    run_report(cli, log)
}

#[derive(Parser, Debug)]
#[command(name = "foi-performance")]
#[command(author = "Martin Keegan")]
#[command(about = "Detect academic FOI conformance from the WhatDoTheyKnow API")]
struct Cli {
    /// Set logging level to INFO.
    #[arg(long)]
    debug: bool,
    /// Override the default per-request delay, in seconds.
    #[arg(long, value_name = "SECONDS", default_value = "2.0", value_parser = parse_delay)]
    delay: Duration,
    #[arg(long, hide = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

fn parse_delay(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .trim()
        .parse()
        .map_err(|e| format!("invalid delay {s:?}: {e}"))?;
    Duration::try_from_secs_f64(secs)
        .map_err(|_| format!("delay must be finite and non-negative, got {s}"))
}

fn run_report(cli: Cli, log: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    log.install();
    let config = FetchConfig {
        base_url: cli.base_url,
        delay: cli.delay,
    };
    let fetcher = Fetcher::new(config)?;
    let stdout = std::io::stdout();
    let mut report = CsvReport::new(stdout.lock());
    let rt = tokio::runtime::Runtime::new()?;
    let summary = rt.block_on(run(&fetcher, &mut report))?;
    report.into_inner()?;
    info!(rows = summary.rows, requests = summary.requests, "done");
    Ok(())
}
