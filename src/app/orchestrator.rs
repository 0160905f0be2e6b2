//! Simulation loop: feeds -> detector -> store.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info};

use crate::app::state::{RunState, SimulationState};
use crate::domain::{DetectorConfig, OpportunityRecord, TickPair};
use crate::error::Result;
use crate::feed::MergedFeed;
use crate::store::OpportunityStore;

/// Desired loop behaviour, observed at the top of every iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Run,
    Pause,
    Stop,
}

/// Drives one merged feed until told to stop.
pub struct Orchestrator {
    feed: MergedFeed,
    detector: DetectorConfig,
    store: Arc<dyn OpportunityStore>,
    state: Arc<SimulationState>,
    events: Option<broadcast::Sender<OpportunityRecord>>,
    tick_limit: Option<u64>,
}

impl Orchestrator {
    pub fn new(
        feed: MergedFeed,
        detector: DetectorConfig,
        store: Arc<dyn OpportunityStore>,
        state: Arc<SimulationState>,
    ) -> Self {
        Self {
            feed,
            detector,
            store,
            state,
            events: None,
            tick_limit: None,
        }
    }

    /// Publish every detected opportunity on `events`.
    #[must_use]
    pub fn with_events(mut self, events: broadcast::Sender<OpportunityRecord>) -> Self {
        self.events = Some(events);
        self
    }

    /// Stop on its own after `limit` tick pairs.
    #[must_use]
    pub fn with_tick_limit(mut self, limit: Option<u64>) -> Self {
        self.tick_limit = limit;
        self
    }

    /// Run the loop.
    ///
    /// Cancellation is cooperative: a `Stop` or `Pause` sent while a tick is
    /// in flight takes effect once that tick has been processed. A store
    /// failure ends the loop with the error and leaves the state `stopped`.
    pub async fn run(mut self, mut control: watch::Receiver<Command>) -> Result<()> {
        let (first, second) = self.feed.sources();
        info!(
            first = first,
            second = second,
            threshold = self.detector.threshold,
            store = %self.store.describe(),
            "Simulation loop started"
        );

        let mut ticks: u64 = 0;

        loop {
            let command = *control.borrow_and_update();
            match command {
                Command::Stop => {
                    info!(ticks, "Stop requested");
                    break;
                }
                Command::Pause => {
                    if self.state.run_state() != RunState::Paused {
                        self.state.set_run_state(RunState::Paused);
                        info!(ticks, "Simulation paused");
                    }
                    if control.changed().await.is_err() {
                        debug!("Control channel closed while paused");
                        break;
                    }
                    continue;
                }
                Command::Run => {
                    if self.state.run_state() != RunState::Running {
                        self.state.set_run_state(RunState::Running);
                        info!(ticks, "Simulation running");
                    }
                }
            }

            if self.tick_limit.is_some_and(|limit| ticks >= limit) {
                info!(ticks, "Tick limit reached");
                break;
            }

            let Some(pair) = self.feed.next_pair().await else {
                info!(ticks, "Price feed ended");
                break;
            };
            ticks += 1;

            if let Err(e) = self.process(&pair) {
                error!(error = %e, ticks, "Simulation stopped on error");
                self.state.record_failure(e.to_string());
                return Err(e);
            }
        }

        self.state.set_run_state(RunState::Stopped);
        Ok(())
    }

    fn process(&self, pair: &TickPair) -> Result<()> {
        let opportunities = self.detector.detect_pair(pair)?;

        self.store.append(&opportunities)?;
        self.state.record_tick(pair, &opportunities);

        for opp in &opportunities {
            info!(
                ticker = %opp.ticker(),
                price_source_1 = opp.price_source_1(),
                price_source_2 = opp.price_source_2(),
                difference_pct = opp.difference_pct(),
                estimated_profit = opp.estimated_profit(),
                "Arbitrage opportunity detected"
            );
            if let Some(events) = &self.events {
                // No subscribers is fine.
                let _ = events.send(opp.clone());
            }
        }

        debug!(
            first = %pair.first.source,
            second = %pair.second.source,
            opportunities = opportunities.len(),
            "Tick pair processed"
        );
        Ok(())
    }
}
