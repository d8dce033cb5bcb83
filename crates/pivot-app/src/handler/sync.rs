//! Applying sync snapshots

use chrono::Local;

use pivot_core::prelude::*;

use super::UpdateResult;
use crate::state::{AppState, ConnectionState};
use crate::sync::{Fetched, SyncSnapshot};

/// Replace every collection that was fetched, keep the rest.
///
/// Snapshots older than the last applied generation are dropped.
pub fn handle_sync_completed(state: &mut AppState, snapshot: SyncSnapshot) -> UpdateResult {
    if snapshot.generation <= state.sync.last_generation {
        debug!(
            "Dropping stale snapshot {} (applied {})",
            snapshot.generation, state.sync.last_generation
        );
        return UpdateResult::none();
    }

    let failures = snapshot.failures();
    let unreachable = snapshot.is_unreachable();
    let SyncSnapshot {
        generation,
        stats,
        assets,
        methodologies,
        trigger_matches,
        batch_commands,
        relationships,
    } = snapshot;

    let data = &mut state.data;
    replace(&mut data.stats, stats);
    replace(&mut data.assets, assets);
    replace(&mut data.methodologies, methodologies);
    replace(&mut data.trigger_matches, trigger_matches);
    replace(&mut data.batch_commands, batch_commands);
    replace(&mut data.relationships, relationships);

    for (collection, error) in &failures {
        warn!("Failed to refresh {}: {}", collection, error);
    }

    state.sync.last_generation = generation;
    if failures.is_empty() {
        state.sync.last_success = Some(Local::now());
    }
    update_connection(state, unreachable, &failures);
    state.sync.failed = failures;

    state.clamp_cursors();
    UpdateResult::none()
}

fn replace<T>(slot: &mut T, fetched: Fetched<T>) {
    if let Ok(value) = fetched {
        *slot = value;
    }
}

/// Toast on transitions only, so a steady outage is reported once
fn update_connection(state: &mut AppState, unreachable: bool, failures: &[(&'static str, String)]) {
    let next = if unreachable {
        let error = failures
            .first()
            .map(|(_, e)| e.clone())
            .unwrap_or_default();
        ConnectionState::Unreachable { error }
    } else {
        ConnectionState::Connected
    };

    match (&state.sync.connection, &next) {
        (ConnectionState::Unreachable { .. }, ConnectionState::Unreachable { .. }) => {}
        (_, ConnectionState::Unreachable { error }) => {
            warn!("Engine unreachable: {}", error);
            state.notify_error(format!("Engine unreachable: {}", error));
        }
        (ConnectionState::Unreachable { .. }, ConnectionState::Connected) => {
            info!("Connection to engine restored");
            state.notify_info("Connection to engine restored");
        }
        _ => {}
    }
    state.sync.connection = next;
}
