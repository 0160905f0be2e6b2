//! Shared simulation state.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::watch;

use crate::domain::{OpportunityRecord, PriceSnapshot, TickPair};

/// Lifecycle of the simulation loop.
///
/// `idle -> running -> {running, paused, stopped}`; `paused -> running`
/// resumes the same walk, `stopped -> running` starts a fresh one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Paused,
    Stopped,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// Point-in-time view of the simulation, safe to hand to callers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationStatus {
    pub state: RunState,
    pub ticks_processed: u64,
    pub opportunities_detected: usize,
    /// Latest snapshot per source name.
    pub latest_prices: BTreeMap<String, PriceSnapshot>,
    pub last_tick_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

#[derive(Debug, Default)]
struct Inner {
    state: RunState,
    ticks_processed: u64,
    latest_prices: BTreeMap<String, PriceSnapshot>,
    opportunities: Vec<OpportunityRecord>,
    last_tick_at: Option<DateTime<Utc>>,
    started_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

/// State shared between the orchestrator task and its controllers.
#[derive(Debug)]
pub struct SimulationState {
    inner: RwLock<Inner>,
    changes: watch::Sender<RunState>,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            changes: watch::channel(RunState::Idle).0,
        }
    }
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run_state(&self) -> RunState {
        self.inner.read().state
    }

    /// Observe run state transitions.
    pub fn watch(&self) -> watch::Receiver<RunState> {
        self.changes.subscribe()
    }

    pub fn set_run_state(&self, state: RunState) {
        let mut inner = self.inner.write();
        if state == RunState::Running && inner.started_at.is_none() {
            inner.started_at = Some(Utc::now());
        }
        inner.state = state;
        self.changes.send_replace(state);
    }

    /// Move from `from` to `to` in one step.
    ///
    /// Fails with the actual state, leaving it unchanged, if it is not `from`.
    pub fn transition(&self, from: RunState, to: RunState) -> Result<(), RunState> {
        let mut inner = self.inner.write();
        if inner.state != from {
            return Err(inner.state);
        }
        inner.state = to;
        self.changes.send_replace(to);
        Ok(())
    }

    /// Record a processed tick pair and the opportunities it produced.
    pub fn record_tick(&self, pair: &TickPair, opportunities: &[OpportunityRecord]) {
        let mut inner = self.inner.write();
        inner.ticks_processed += 1;
        inner.last_tick_at = Some(pair.captured_at());
        for tick in [&pair.first, &pair.second] {
            inner
                .latest_prices
                .insert(tick.source.to_string(), tick.prices.clone());
        }
        inner.opportunities.extend_from_slice(opportunities);
    }

    /// Move to `stopped` and remember why.
    pub fn record_failure(&self, error: impl Into<String>) {
        let mut inner = self.inner.write();
        inner.state = RunState::Stopped;
        inner.last_error = Some(error.into());
        self.changes.send_replace(RunState::Stopped);
    }

    /// Opportunities detected since the last reset, oldest first.
    pub fn opportunities(&self) -> Vec<OpportunityRecord> {
        self.inner.read().opportunities.clone()
    }

    pub fn status(&self) -> SimulationStatus {
        let inner = self.inner.read();
        SimulationStatus {
            state: inner.state,
            ticks_processed: inner.ticks_processed,
            opportunities_detected: inner.opportunities.len(),
            latest_prices: inner.latest_prices.clone(),
            last_tick_at: inner.last_tick_at,
            started_at: inner.started_at,
            last_error: inner.last_error.clone(),
        }
    }

    /// Drop accumulated prices, opportunities and counters.
    ///
    /// The run state is left untouched.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        let state = inner.state;
        *inner = Inner {
            state,
            ..Inner::default()
        };
    }
}
