//! Handler for the `run` command.

use std::sync::Arc;

use tokio::signal;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::app::{Config, RunState, SimulationController};
use crate::cli::command::{Cli, LogArgs, RunArgs};
use crate::cli::output;
use crate::domain::OpportunityRecord;
use crate::error::Result;
use crate::store::{JsonFileStore, OpportunityStore};

/// Apply shared `--log-level` / `--json-logs` overrides.
pub(crate) fn apply_log_args(config: &mut Config, args: &LogArgs) {
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.format = "json".to_string();
    }
}

/// Execute the run command.
pub async fn execute(cli: &Cli, args: &RunArgs) -> Result<()> {
    let mut config = Config::load_or_default(&cli.config)?;

    if let Some(threshold) = args.threshold {
        config.simulation.threshold = threshold;
    }
    if let Some(ref path) = args.log_path {
        config.simulation.log_path = path.clone();
    }
    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }
    apply_log_args(&mut config, &args.logging);
    config.validate()?;
    config.init_logging();

    let store: Arc<dyn OpportunityStore> =
        Arc::new(JsonFileStore::new(config.simulation.log_path.clone()));
    let controller =
        SimulationController::new(&config.simulation, store).with_tick_limit(args.ticks);

    output::header();
    output::field("Sources", config.simulation.sources.join(" vs "));
    output::field("Tickers", config.simulation.feed.tickers.join(", "));
    output::field(
        "Threshold",
        format!("{:.2}%", config.simulation.threshold * 100.0),
    );
    output::field("Log", config.simulation.log_path.display());
    if let Some(ticks) = args.ticks {
        output::field("Ticks", ticks);
    }
    output::note("Press Ctrl-C to stop");

    let mut events = controller.subscribe();
    let mut state = controller.watch_state();
    controller.start().await?;
    info!("Simulation running in foreground");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(record) => print_opportunity(&record),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Opportunity output fell behind");
                }
                Err(RecvError::Closed) => break,
            },
            _ = state.wait_for(|s| *s == RunState::Stopped) => break,
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    while let Ok(record) = events.try_recv() {
        print_opportunity(&record);
    }

    let stopped = controller.shutdown().await;
    let status = controller.status();

    output::section("Summary");
    output::field("Ticks", status.ticks_processed);
    output::field("Opportunities", status.opportunities_detected);
    if let Some(ref error) = status.last_error {
        output::error(error);
    }
    info!(
        ticks = status.ticks_processed,
        opportunities = status.opportunities_detected,
        "Simulation finished"
    );

    stopped.map(|_| ())
}

fn print_opportunity(record: &OpportunityRecord) {
    let message = format!(
        "{} vs {}  {}  est. {}",
        record.price_source_1(),
        record.price_source_2(),
        output::highlight(format!("{:.4}%", record.difference_pct())),
        output::positive(format!("${:.2}", record.estimated_profit())),
    );
    output::opportunity(
        &record.timestamp().format("%H:%M:%S").to_string(),
        record.ticker().as_str(),
        &message,
    );
}
