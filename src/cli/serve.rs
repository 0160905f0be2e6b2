//! Handler for the `serve` command.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use crate::api::{create_router, AppState};
use crate::app::{Config, SimulationController};
use crate::cli::command::{Cli, ServeArgs};
use crate::cli::output;
use crate::cli::run::apply_log_args;
use crate::error::Result;
use crate::market_data::{CandleProvider, MockCandleProvider};
use crate::store::{JsonFileStore, OpportunityStore};

/// Execute the serve command.
pub async fn execute(cli: &Cli, args: &ServeArgs) -> Result<()> {
    let mut config = Config::load_or_default(&cli.config)?;

    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    apply_log_args(&mut config, &args.logging);
    config.validate()?;
    config.init_logging();

    let store: Arc<dyn OpportunityStore> =
        Arc::new(JsonFileStore::new(config.simulation.log_path.clone()));
    let controller = Arc::new(SimulationController::new(&config.simulation, store));
    let provider: Arc<dyn CandleProvider> = Arc::new(match config.market_data.seed {
        Some(seed) => MockCandleProvider::with_seed(seed),
        None => MockCandleProvider::new(),
    });

    if args.autostart {
        controller.start().await?;
    }

    let state = AppState::new(
        Arc::clone(&controller),
        provider,
        config.market_data.clone(),
    );
    let app = create_router(state, &config.server.cors_origins);

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(addr.as_str()).await?;
    let local = listener.local_addr()?;

    output::header();
    output::field("Listening", output::highlight(format!("http://{local}")));
    output::field("Log", config.simulation.log_path.display());
    output::field("Simulation", if args.autostart { "running" } else { "idle" });
    output::hint("POST /api/arbitrage/start to begin the simulation");
    info!(addr = %local, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
        })
        .await?;

    controller.shutdown().await?;
    info!("Server stopped");
    Ok(())
}
