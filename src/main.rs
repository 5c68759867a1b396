use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use supplyline::config::RunConfig;
use supplyline::domain::demand::ExpiryPolicy;
use supplyline::domain::policy::greedy::GreedyPolicy;
use supplyline::driver::simulation_driver::SimulationDriver;
use supplyline::service::round_client::{HttpRoundService, RoundService};
use supplyline::{build_network, logger, reporting};

#[derive(Debug, Parser)]
#[command(name = "supplyline", about = "Schedules commodity movements against the round service.")]
struct Cli {
    /// Directory holding the semicolon-delimited config tables.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Base URL of the round service.
    #[arg(long, default_value = "http://localhost:8080/api/v1")]
    base_url: String,

    /// Static API credential for the round service.
    #[arg(long)]
    api_key: String,

    /// Minimum pause between rounds, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    round_delay_ms: u64,

    /// Backlog expiry policy: 'retain' or 'report-missed'.
    #[arg(long, default_value = "retain")]
    expiry: String,

    /// Where the per-day run report is written.
    #[arg(long, default_value = "run_report.csv")]
    report: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init();

    let expiry_policy: ExpiryPolicy = cli.expiry.parse().map_err(anyhow::Error::msg)?;
    let config = RunConfig {
        base_url: cli.base_url,
        api_key: cli.api_key,
        data_dir: cli.data_dir,
        round_delay: Duration::from_millis(cli.round_delay_ms),
        expiry_policy,
        report_path: cli.report,
        ..RunConfig::default()
    };

    let (network, ledger) =
        build_network(&config.data_dir).context("failed to load the network tables")?;

    let service: Arc<dyn RoundService> =
        Arc::new(HttpRoundService::new(config.base_url.clone(), &config.api_key)?);
    let policy = Box::new(GreedyPolicy::new(config.horizon_end));

    let mut driver = SimulationDriver::new(network, ledger, policy, service, config.clone());
    let run_result = driver.run().await;

    // Report whatever the run produced, even a partial one.
    reporting::write_run_report(&config.report_path, driver.history())?;

    run_result.context("simulation run failed")?;
    Ok(())
}
