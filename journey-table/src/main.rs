use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use journey_table::domain::Network;
use journey_table::run::{RunConfig, run};

/// Build the first/last train table for one MTR network.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Which network to harvest
    #[arg(value_enum, default_value_t = Network::HeavyRail)]
    network: Network,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let started = chrono::Local::now();
    info!(network = %cli.network, started = %started.format("%Y-%m-%d %H:%M:%S"), "starting");

    match run(RunConfig::from_env(cli.network)).await {
        Ok(report) => {
            let finished = chrono::Local::now();
            info!(
                path = %report.path.display(),
                bytes = report.bytes,
                pairs = report.summary.pairs,
                skipped = report.summary.skipped,
                finished = %finished.format("%Y-%m-%d %H:%M:%S"),
                elapsed_secs = (finished - started).num_seconds(),
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(network = %cli.network, error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}
