//! Application layer: configuration, shared state and the simulation task.

pub mod config;
mod controller;
mod orchestrator;
mod state;

pub use config::{Config, LoggingConfig, MarketDataConfig, ServerConfig, SimulationConfig};
pub use controller::{simulated_feeds, FeedFactory, SimulationController};
pub use orchestrator::{Command, Orchestrator};
pub use state::{RunState, SimulationState, SimulationStatus};
