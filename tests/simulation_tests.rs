mod harness;

use std::sync::Arc;
use std::time::Duration;

use pixel_trader::app::{
    Command, FeedFactory, Orchestrator, RunState, SimulationController, SimulationState,
};
use pixel_trader::domain::{DetectorConfig, TimestampPolicy};
use pixel_trader::store::{JsonFileStore, MemoryStore, OpportunityStore};
use tempfile::TempDir;
use tokio::sync::{broadcast, watch};

use harness::failing_store::FailingStore;
use harness::scripted_feed::{merged, ScriptedFeed};
use harness::snapshot;

fn detector(threshold: f64) -> DetectorConfig {
    DetectorConfig {
        threshold,
        timestamp: TimestampPolicy::Capture,
    }
}

fn diverging_feeds(ticks: usize, delay: Duration) -> (ScriptedFeed, ScriptedFeed) {
    let first = (0..ticks).map(|_| snapshot(&[("AAPL", 100.0), ("TSLA", 200.0)]));
    let second = (0..ticks).map(|_| snapshot(&[("AAPL", 101.0), ("TSLA", 200.0)]));
    (
        ScriptedFeed::new("BrokerA", first).with_delay(delay),
        ScriptedFeed::new("BrokerB", second).with_delay(delay),
    )
}

#[tokio::test]
async fn orchestrator_persists_opportunities_until_feed_ends() {
    let dir = TempDir::new().unwrap();
    let store: Arc<dyn OpportunityStore> =
        Arc::new(JsonFileStore::new(dir.path().join("opportunities.json")));
    let state = Arc::new(SimulationState::new());
    let (first, second) = diverging_feeds(3, Duration::ZERO);
    let (_control, rx) = watch::channel(Command::Run);

    Orchestrator::new(merged(first, second), detector(0.005), store.clone(), state.clone())
        .run(rx)
        .await
        .unwrap();

    let records = store.load().unwrap();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.ticker().as_str() == "AAPL"));

    let status = state.status();
    assert_eq!(status.state, RunState::Stopped);
    assert_eq!(status.ticks_processed, 3);
    assert_eq!(status.opportunities_detected, 3);
    assert_eq!(status.latest_prices.len(), 2);
    assert!(status.latest_prices.contains_key("BrokerB"));
}

#[tokio::test]
async fn orchestrator_publishes_each_opportunity() {
    let store: Arc<dyn OpportunityStore> = Arc::new(MemoryStore::new());
    let state = Arc::new(SimulationState::new());
    let (events, mut rx_events) = broadcast::channel(16);
    let (first, second) = diverging_feeds(2, Duration::ZERO);
    let (_control, rx) = watch::channel(Command::Run);

    Orchestrator::new(merged(first, second), detector(0.005), store, state)
        .with_events(events)
        .run(rx)
        .await
        .unwrap();

    assert_eq!(rx_events.recv().await.unwrap().ticker().as_str(), "AAPL");
    assert_eq!(rx_events.recv().await.unwrap().estimated_profit(), 1.0);
}

#[tokio::test]
async fn stop_before_first_tick_processes_nothing() {
    let store = Arc::new(MemoryStore::new());
    let state = Arc::new(SimulationState::new());
    let (first, second) = diverging_feeds(5, Duration::ZERO);
    let (_control, rx) = watch::channel(Command::Stop);

    Orchestrator::new(merged(first, second), detector(0.0), store.clone(), state.clone())
        .run(rx)
        .await
        .unwrap();

    assert!(store.is_empty());
    assert_eq!(state.status().ticks_processed, 0);
    assert_eq!(state.run_state(), RunState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn stop_is_observed_after_in_flight_tick() {
    let store = Arc::new(MemoryStore::new());
    let state = Arc::new(SimulationState::new());
    let (first, second) = diverging_feeds(100, Duration::from_secs(1));
    let (control, rx) = watch::channel(Command::Run);

    let task = tokio::spawn(
        Orchestrator::new(merged(first, second), detector(0.005), store.clone(), state.clone())
            .run(rx),
    );

    tokio::time::sleep(Duration::from_millis(2500)).await;
    control.send_replace(Command::Stop);
    task.await.unwrap().unwrap();

    // Ticks at 1s and 2s, plus the one in flight at 3s.
    assert_eq!(state.status().ticks_processed, 3);
    assert_eq!(store.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn pause_keeps_feed_position() {
    let store = Arc::new(MemoryStore::new());
    let state = Arc::new(SimulationState::new());
    let first = ScriptedFeed::new(
        "BrokerA",
        (1..=6).map(|i| snapshot(&[("AAPL", 100.0 + f64::from(i))])),
    )
    .with_delay(Duration::from_secs(1));
    let second = ScriptedFeed::new("BrokerB", (1..=6).map(|_| snapshot(&[("AAPL", 100.0)])))
        .with_delay(Duration::from_secs(1));
    let (control, rx) = watch::channel(Command::Run);

    let task = tokio::spawn(
        Orchestrator::new(merged(first, second), detector(0.0), store.clone(), state.clone())
            .run(rx),
    );

    tokio::time::sleep(Duration::from_millis(1500)).await;
    control.send_replace(Command::Pause);
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(state.run_state(), RunState::Paused);
    let paused_ticks = state.status().ticks_processed;
    assert_eq!(paused_ticks, 2);

    control.send_replace(Command::Run);
    task.await.unwrap().unwrap();

    let prices: Vec<f64> = store
        .load()
        .unwrap()
        .iter()
        .map(|r| r.price_source_1())
        .collect();
    assert_eq!(prices, vec![101.0, 102.0, 103.0, 104.0, 105.0, 106.0]);
}

#[tokio::test]
async fn store_failure_stops_loop_and_surfaces_error() {
    let store = Arc::new(FailingStore::new(1));
    let state = Arc::new(SimulationState::new());
    let (first, second) = diverging_feeds(5, Duration::ZERO);
    let (_control, rx) = watch::channel(Command::Run);

    let result = Orchestrator::new(merged(first, second), detector(0.005), store.clone(), state.clone())
        .run(rx)
        .await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("disk full"));
    assert_eq!(store.len(), 1);

    let status = state.status();
    assert_eq!(status.state, RunState::Stopped);
    assert_eq!(status.ticks_processed, 1);
    assert!(status.last_error.unwrap().contains("disk full"));
}

fn scripted_factory(ticks: usize) -> FeedFactory {
    Arc::new(move || {
        let (first, second) = diverging_feeds(ticks, Duration::from_millis(100));
        merged(first, second)
    })
}

#[tokio::test(start_paused = true)]
async fn controller_restart_begins_a_fresh_walk() {
    let store = Arc::new(MemoryStore::new());
    let controller =
        SimulationController::with_feed_factory(detector(0.005), scripted_factory(2), store.clone());
    let mut state = controller.watch_state();

    controller.start().await.unwrap();
    state.wait_for(|s| *s == RunState::Stopped).await.unwrap();
    assert_eq!(store.len(), 2);

    controller.start().await.unwrap();
    controller.join().await.unwrap();
    assert_eq!(store.len(), 4);
    assert_eq!(controller.status().ticks_processed, 4);
}

#[tokio::test(start_paused = true)]
async fn controller_reset_clears_persisted_log() {
    let dir = TempDir::new().unwrap();
    let store: Arc<dyn OpportunityStore> =
        Arc::new(JsonFileStore::new(dir.path().join("opportunities.json")));
    let controller =
        SimulationController::with_feed_factory(detector(0.005), scripted_factory(50), store.clone());

    controller.start().await.unwrap();
    tokio::time::sleep(Duration::from_millis(350)).await;
    assert!(!store.load().unwrap().is_empty());

    let status = controller.reset().await.unwrap();
    assert_eq!(status.state, RunState::Stopped);
    assert!(store.load().unwrap().is_empty());
    assert!(controller.opportunities().is_empty());
}

#[tokio::test]
async fn controller_failure_is_reported_and_restart_is_allowed() {
    let store = Arc::new(FailingStore::new(0));
    let controller =
        SimulationController::with_feed_factory(detector(0.005), scripted_factory(3), store);
    let mut state = controller.watch_state();

    controller.start().await.unwrap();
    state.wait_for(|s| *s == RunState::Stopped).await.unwrap();
    assert!(controller.status().last_error.is_some());

    // Restart reaps the failed walk instead of returning its error.
    controller.start().await.unwrap();
    let err = controller.join().await.unwrap_err();
    assert!(err.to_string().contains("disk full"));
}
