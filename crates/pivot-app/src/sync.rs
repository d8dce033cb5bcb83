//! Polling synchronizer
//!
//! One background task refreshes every engine collection on a fixed interval
//! (or immediately on request) and reports each cycle as a single
//! [`Message::SyncCompleted`]. Reads within a cycle run concurrently and fail
//! independently; the update function keeps the previous copy of any
//! collection whose read failed.
//!
//! Cycles never overlap: the task awaits each cycle before selecting on the
//! next tick, and refresh requests made meanwhile collapse into one follow-up
//! cycle. `SyncHandle::is_in_flight` only reports whether a cycle is running.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use pivot_api::EngineApi;
use pivot_core::prelude::*;
use pivot_core::{Asset, BatchCommand, MethodologySummary, Relationship, Stats, TriggerMatch};

use crate::message::Message;

/// Lower bound for the polling interval
pub const SYNC_MIN_MS: u64 = 500;

/// Outcome of one read; the error is already rendered for display
pub type Fetched<T> = std::result::Result<T, String>;

/// Everything one cycle read from the engine
#[derive(Debug, Clone)]
pub struct SyncSnapshot {
    /// Increases by one per cycle; older snapshots are discarded
    pub generation: u64,
    pub stats: Fetched<Stats>,
    pub assets: Fetched<Vec<Asset>>,
    pub methodologies: Fetched<Vec<MethodologySummary>>,
    pub trigger_matches: Fetched<Vec<TriggerMatch>>,
    pub batch_commands: Fetched<Vec<BatchCommand>>,
    pub relationships: Fetched<Vec<Relationship>>,
}

impl SyncSnapshot {
    /// Number of collections read per cycle
    pub const COLLECTIONS: usize = 6;

    /// `(collection, error)` for every read that failed
    pub fn failures(&self) -> Vec<(&'static str, String)> {
        fn check<T>(out: &mut Vec<(&'static str, String)>, name: &'static str, r: &Fetched<T>) {
            if let Err(e) = r {
                out.push((name, e.clone()));
            }
        }

        let mut failures = Vec::new();
        check(&mut failures, "stats", &self.stats);
        check(&mut failures, "assets", &self.assets);
        check(&mut failures, "methodologies", &self.methodologies);
        check(&mut failures, "trigger_matches", &self.trigger_matches);
        check(&mut failures, "batch_commands", &self.batch_commands);
        check(&mut failures, "relationships", &self.relationships);
        failures
    }

    /// Every read failed; the engine is most likely down
    pub fn is_unreachable(&self) -> bool {
        self.failures().len() == Self::COLLECTIONS
    }
}

/// Run the six reads of one cycle concurrently
pub async fn fetch_snapshot<A: EngineApi>(api: &A, generation: u64) -> SyncSnapshot {
    let (stats, assets, methodologies, trigger_matches, batch_commands, relationships) =
        tokio::join!(
            api.stats(),
            api.assets(),
            api.methodologies(),
            api.trigger_matches(),
            api.batch_commands(),
            api.relationships(),
        );

    SyncSnapshot {
        generation,
        stats: stats.map_err(|e| e.user_message()),
        assets: assets.map_err(|e| e.user_message()),
        methodologies: methodologies.map_err(|e| e.user_message()),
        trigger_matches: trigger_matches.map_err(|e| e.user_message()),
        batch_commands: batch_commands.map_err(|e| e.user_message()),
        relationships: relationships.map_err(|e| e.user_message()),
    }
}

/// Configured interval, clamped to [`SYNC_MIN_MS`]
pub fn effective_interval(interval_ms: u64) -> Duration {
    Duration::from_millis(interval_ms.max(SYNC_MIN_MS))
}

/// Control handle for a running sync loop
#[derive(Debug, Clone)]
pub struct SyncHandle {
    refresh: Arc<Notify>,
    in_flight: Arc<AtomicBool>,
}

impl SyncHandle {
    /// Start a cycle now instead of waiting for the next tick.
    ///
    /// A request made while a cycle is running starts another one right
    /// after it.
    pub fn request_refresh(&self) {
        self.refresh.notify_one();
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Spawn the polling loop.
///
/// The first cycle starts immediately. The loop ends when `shutdown_rx`
/// flips to `true` or the message channel closes.
pub fn spawn_sync_loop<A>(
    api: Arc<A>,
    msg_tx: mpsc::Sender<Message>,
    interval_ms: u64,
    mut shutdown_rx: watch::Receiver<bool>,
) -> (SyncHandle, JoinHandle<()>)
where
    A: EngineApi + Send + Sync + 'static,
{
    let handle = SyncHandle {
        refresh: Arc::new(Notify::new()),
        in_flight: Arc::new(AtomicBool::new(false)),
    };
    let refresh = handle.refresh.clone();
    let in_flight = handle.in_flight.clone();
    let interval = effective_interval(interval_ms);

    let task = tokio::spawn(async move {
        info!("Sync loop started (interval {:?})", interval);
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut generation: u64 = 0;

        loop {
            if *shutdown_rx.borrow() {
                break;
            }

            tokio::select! {
                _ = ticker.tick() => {}
                _ = refresh.notified() => {
                    debug!("Manual refresh requested");
                    ticker.reset();
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }
            }

            in_flight.store(true, Ordering::SeqCst);
            generation += 1;
            trace!("Sync cycle {} started", generation);

            let snapshot = tokio::select! {
                snapshot = fetch_snapshot(api.as_ref(), generation) => snapshot,
                _ = shutdown_rx.changed() => {
                    in_flight.store(false, Ordering::SeqCst);
                    break;
                }
            };
            in_flight.store(false, Ordering::SeqCst);

            for (collection, error) in snapshot.failures() {
                debug!("Sync cycle {}: {} failed: {}", generation, collection, error);
            }

            if msg_tx
                .send(Message::SyncCompleted(Box::new(snapshot)))
                .await
                .is_err()
            {
                debug!("Message channel closed, stopping sync loop");
                break;
            }
        }

        info!("Sync loop stopped after {} cycles", generation);
    });

    (handle, task)
}
