//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. The headless runner turns them into NDJSON.

use crate::state::{ConnectionState, NotificationLevel};

/// Domain events emitted by the Engine for external consumers.
///
/// Events are derived by comparing state before and after a message, so
/// subscribers see a consistent view of state changes.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Synchronization
    // ─────────────────────────────────────────────────────────
    /// A sync snapshot was applied
    SyncApplied {
        generation: u64,
        assets: usize,
        methodologies: usize,
        trigger_matches: usize,
        batch_commands: usize,
        relationships: usize,
        /// `(collection, error)` for reads that failed this cycle
        failed: Vec<(String, String)>,
    },

    /// The engine became reachable or unreachable
    ConnectionChanged { connection: ConnectionState },

    // ─────────────────────────────────────────────────────────
    // User Feedback
    // ─────────────────────────────────────────────────────────
    /// A toast was raised
    Notification {
        level: NotificationLevel,
        message: String,
    },

    // ─────────────────────────────────────────────────────────
    // Engine Lifecycle
    // ─────────────────────────────────────────────────────────
    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Returns a short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SyncApplied { .. } => "sync_applied",
            Self::ConnectionChanged { .. } => "connection_changed",
            Self::Notification { .. } => "notification",
            Self::Shutdown => "shutdown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_event_type_labels() {
        assert_eq!(EngineEvent::Shutdown.event_type(), "shutdown");

        let event = EngineEvent::ConnectionChanged {
            connection: ConnectionState::Connected,
        };
        assert_eq!(event.event_type(), "connection_changed");

        let event = EngineEvent::Notification {
            level: NotificationLevel::Error,
            message: "boom".into(),
        };
        assert_eq!(event.clone().event_type(), "notification");
    }
}
