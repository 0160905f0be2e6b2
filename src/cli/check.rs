//! Handler for `check config`.

use crate::app::Config;
use crate::cli::command::{CheckCommand, Cli};
use crate::cli::output;
use crate::error::Result;

pub fn execute(cli: &Cli, command: &CheckCommand) -> Result<()> {
    match command {
        CheckCommand::Config => check_config(cli),
    }
}

fn check_config(cli: &Cli) -> Result<()> {
    let path = &cli.config;
    output::header();
    output::field("Config", path.display());

    if !path.exists() {
        output::warning("Configuration file not found, checking built-in defaults");
    }

    let config = Config::load_or_default(path)?;
    output::success("Configuration is valid");

    let sim = &config.simulation;
    output::section("Simulation");
    output::field("Sources", sim.sources.join(" vs "));
    output::field("Tickers", sim.feed.tickers.join(", "));
    output::field("Threshold", format!("{:.2}%", sim.threshold * 100.0));
    output::field("Timestamp", format!("{:?}", sim.timestamp).to_lowercase());
    output::field("Log", sim.log_path.display());
    output::field(
        "Tick",
        format!(
            "{}ms + up to {}ms",
            sim.feed.update_interval_ms, sim.feed.jitter_ms
        ),
    );
    match sim.seed {
        Some(seed) => output::field("Seed", seed),
        None => output::field("Seed", output::muted("random")),
    }

    output::section("Server");
    output::field("Bind", config.server.bind_addr());
    output::field("CORS", &config.server.cors_origins);

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    if sim.log_path.exists() {
        output::note(&format!("Opportunity log present at {}", sim.log_path.display()));
    } else {
        output::hint("the opportunity log is created on the first detection");
    }
    Ok(())
}
