//! Lifecycle control for the background simulation task.

use std::sync::Arc;

use tokio::sync::{broadcast, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::config::SimulationConfig;
use super::orchestrator::{Command, Orchestrator};
use super::state::{RunState, SimulationState, SimulationStatus};
use crate::domain::{DetectorConfig, OpportunityRecord, SourceName};
use crate::error::{Result, SimulationError};
use crate::feed::{MergedFeed, SimulatedFeed};
use crate::store::OpportunityStore;

/// Builds a fresh pair of feeds for each new walk.
pub type FeedFactory = Arc<dyn Fn() -> MergedFeed + Send + Sync>;

const EVENT_CAPACITY: usize = 256;

struct RunningTask {
    control: watch::Sender<Command>,
    handle: JoinHandle<Result<()>>,
}

/// Owns the simulation task and exposes its state machine.
pub struct SimulationController {
    detector: DetectorConfig,
    feeds: FeedFactory,
    store: Arc<dyn OpportunityStore>,
    state: Arc<SimulationState>,
    events: broadcast::Sender<OpportunityRecord>,
    tick_limit: Option<u64>,
    task: Mutex<Option<RunningTask>>,
}

impl SimulationController {
    /// Controller running the configured random walks.
    pub fn new(config: &SimulationConfig, store: Arc<dyn OpportunityStore>) -> Self {
        Self::with_feed_factory(config.detector(), simulated_feeds(config), store)
    }

    /// Controller running feeds produced by `feeds`.
    pub fn with_feed_factory(
        detector: DetectorConfig,
        feeds: FeedFactory,
        store: Arc<dyn OpportunityStore>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            detector,
            feeds,
            store,
            state: Arc::new(SimulationState::new()),
            events,
            tick_limit: None,
            task: Mutex::new(None),
        }
    }

    /// Stop each walk on its own after `limit` tick pairs.
    #[must_use]
    pub fn with_tick_limit(mut self, limit: Option<u64>) -> Self {
        self.tick_limit = limit;
        self
    }

    /// Start a fresh walk, or resume a paused one.
    pub async fn start(&self) -> Result<SimulationStatus> {
        let mut task = self.task.lock().await;

        let current = self.state.run_state();
        match current {
            RunState::Running if task.as_ref().is_some_and(|t| !t.handle.is_finished()) => {
                return Err(SimulationError::InvalidTransition {
                    action: "start",
                    state: current,
                }
                .into());
            }
            RunState::Paused => {
                if let Some(running) = task.as_ref() {
                    running.control.send_replace(Command::Run);
                    self.state.set_run_state(RunState::Running);
                    info!("Simulation resumed");
                    return Ok(self.state.status());
                }
            }
            _ => {}
        }

        // Reap a finished walk before starting over. Its error, if any, is
        // already in the status.
        if let Some(old) = task.take() {
            if let Err(e) = finish(old).await {
                warn!(error = %e, "Previous simulation ended with an error");
            }
        }

        let (control, rx) = watch::channel(Command::Run);
        let orchestrator = Orchestrator::new(
            (self.feeds)(),
            self.detector,
            Arc::clone(&self.store),
            Arc::clone(&self.state),
        )
        .with_events(self.events.clone())
        .with_tick_limit(self.tick_limit);

        self.state.set_run_state(RunState::Running);
        let handle = tokio::spawn(orchestrator.run(rx));
        *task = Some(RunningTask { control, handle });

        info!("Simulation started");
        Ok(self.state.status())
    }

    /// Pause a running walk. Prices are kept for the next `start`.
    pub async fn pause(&self) -> Result<SimulationStatus> {
        let task = self.task.lock().await;

        let Some(running) = task.as_ref().filter(|t| !t.handle.is_finished()) else {
            // Nothing left to pause; a walk that ended without reporting counts as stopped.
            let state = match self.state.run_state() {
                RunState::Idle => RunState::Idle,
                _ => RunState::Stopped,
            };
            return Err(SimulationError::InvalidTransition {
                action: "pause",
                state,
            }
            .into());
        };

        // The walk may fail between the check above and here, so only a
        // state that is still `running` becomes `paused`.
        self.state
            .transition(RunState::Running, RunState::Paused)
            .map_err(|state| SimulationError::InvalidTransition {
                action: "pause",
                state,
            })?;
        running.control.send_replace(Command::Pause);
        info!("Simulation pause requested");
        Ok(self.state.status())
    }

    /// Stop the walk and wait for the in-flight tick. The log is kept.
    pub async fn shutdown(&self) -> Result<SimulationStatus> {
        let mut task = self.task.lock().await;

        if let Some(running) = task.take() {
            running.control.send_replace(Command::Stop);
            finish(running).await?;
            info!("Simulation stopped");
        }
        if self.state.run_state() != RunState::Idle {
            self.state.set_run_state(RunState::Stopped);
        }
        Ok(self.state.status())
    }

    /// Stop the walk and discard every opportunity, in memory and on disk.
    pub async fn reset(&self) -> Result<SimulationStatus> {
        let was_idle = self.state.run_state() == RunState::Idle;

        if let Err(e) = self.shutdown().await {
            // A failed walk must not block clearing its leftovers.
            warn!(error = %e, "Previous simulation ended with an error");
        }
        self.store.clear()?;
        self.state.clear();
        if !was_idle {
            self.state.set_run_state(RunState::Stopped);
        }

        info!(store = %self.store.describe(), "Simulation reset");
        Ok(self.state.status())
    }

    /// Wait for the current walk to end on its own.
    pub async fn join(&self) -> Result<()> {
        let running = self.task.lock().await.take();
        match running {
            Some(running) => finish(running).await,
            None => Ok(()),
        }
    }

    pub fn status(&self) -> SimulationStatus {
        self.state.status()
    }

    /// Opportunities detected since the last reset, oldest first.
    pub fn opportunities(&self) -> Vec<OpportunityRecord> {
        self.state.opportunities()
    }

    /// Observe run state transitions, e.g. to wait for `stopped`.
    pub fn watch_state(&self) -> watch::Receiver<RunState> {
        self.state.watch()
    }

    pub fn store(&self) -> &Arc<dyn OpportunityStore> {
        &self.store
    }

    /// Receive every opportunity as it is detected.
    pub fn subscribe(&self) -> broadcast::Receiver<OpportunityRecord> {
        self.events.subscribe()
    }
}

async fn finish(running: RunningTask) -> Result<()> {
    drop(running.control);
    match running.handle.await {
        Ok(result) => result,
        Err(e) => Err(SimulationError::TaskFailed(e.to_string()).into()),
    }
}

/// Factory building two seeded random walks from `config`.
pub fn simulated_feeds(config: &SimulationConfig) -> FeedFactory {
    let config = config.clone();
    Arc::new(move || {
        let first = SourceName::new(config.sources[0].as_str());
        let second = SourceName::new(config.sources[1].as_str());
        let feed = config.feed.clone();

        match config.seed {
            Some(seed) => MergedFeed::new(
                Box::new(SimulatedFeed::with_seed(first, feed.clone(), seed)),
                Box::new(SimulatedFeed::with_seed(second, feed, seed.wrapping_add(1))),
            ),
            None => MergedFeed::new(
                Box::new(SimulatedFeed::new(first, feed.clone())),
                Box::new(SimulatedFeed::new(second, feed)),
            ),
        }
    })
}
