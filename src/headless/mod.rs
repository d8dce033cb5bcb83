//! Headless mode - NDJSON event output without the terminal UI
//!
//! Runs the synchronizer and prints structured events to stdout, one per
//! line, so scripts can watch the engine without parsing ANSI output.
//!
//! # Example Output
//!
//! ```json
//! {"event":"started","api":"http://127.0.0.1:8000","interval_ms":3000,"timestamp":1704700001000}
//! {"event":"sync_completed","generation":1,"assets":3,"methodologies":12,"trigger_matches":2,"batch_commands":1,"relationships":2,"failed":[],"timestamp":1704700001050}
//! {"event":"shutdown","timestamp":1704700009000}
//! ```

pub mod runner;

use chrono::Utc;
use serde::Serialize;
use std::io::{self, Write};
use tracing::error;

use pivot_app::state::{ConnectionState, NotificationLevel};
use pivot_app::EngineEvent;

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// The runner is up and the first sync cycle is on its way
    Started {
        api: String,
        interval_ms: u64,
        timestamp: i64,
    },

    /// A sync snapshot was applied
    SyncCompleted {
        generation: u64,
        assets: usize,
        methodologies: usize,
        trigger_matches: usize,
        batch_commands: usize,
        relationships: usize,
        failed: Vec<String>,
        timestamp: i64,
    },

    /// One collection could not be read during the last cycle
    SyncFailed {
        collection: String,
        error: String,
        timestamp: i64,
    },

    /// The engine became reachable or unreachable
    ConnectionChanged {
        state: String,
        error: Option<String>,
        timestamp: i64,
    },

    /// A user-facing notification was raised
    Notification {
        level: String,
        message: String,
        timestamp: i64,
    },

    Shutdown { timestamp: i64 },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = self.write_to(&mut stdout) {
            error!("Failed to write headless event to stdout: {}", e);
        }
    }

    /// Write this event as one NDJSON line and flush
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        let json = serde_json::to_string(self).map_err(io::Error::other)?;
        writeln!(out, "{}", json)?;
        out.flush()
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn started(api: &str, interval_ms: u64) -> Self {
        Self::Started {
            api: api.to_string(),
            interval_ms,
            timestamp: Self::now(),
        }
    }

    pub fn shutdown() -> Self {
        Self::Shutdown {
            timestamp: Self::now(),
        }
    }

    /// Translate an engine event into the lines it produces.
    ///
    /// A sync with failures yields the summary followed by one
    /// `sync_failed` line per collection.
    pub fn from_engine_event(event: &EngineEvent) -> Vec<Self> {
        let timestamp = Self::now();
        match event {
            EngineEvent::SyncApplied {
                generation,
                assets,
                methodologies,
                trigger_matches,
                batch_commands,
                relationships,
                failed,
            } => {
                let mut events = vec![Self::SyncCompleted {
                    generation: *generation,
                    assets: *assets,
                    methodologies: *methodologies,
                    trigger_matches: *trigger_matches,
                    batch_commands: *batch_commands,
                    relationships: *relationships,
                    failed: failed.iter().map(|(c, _)| c.clone()).collect(),
                    timestamp,
                }];
                events.extend(failed.iter().map(|(collection, error)| Self::SyncFailed {
                    collection: collection.clone(),
                    error: error.clone(),
                    timestamp,
                }));
                events
            }
            EngineEvent::ConnectionChanged { connection } => {
                let (state, error) = match connection {
                    ConnectionState::Unknown => ("unknown", None),
                    ConnectionState::Connected => ("connected", None),
                    ConnectionState::Unreachable { error } => ("unreachable", Some(error.clone())),
                };
                vec![Self::ConnectionChanged {
                    state: state.to_string(),
                    error,
                    timestamp,
                }]
            }
            EngineEvent::Notification { level, message } => vec![Self::Notification {
                level: level_name(*level).to_string(),
                message: message.clone(),
                timestamp,
            }],
            EngineEvent::Shutdown => vec![Self::Shutdown { timestamp }],
        }
    }
}

fn level_name(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Success => "success",
        NotificationLevel::Info => "info",
        NotificationLevel::Error => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_failed_serialization() {
        let event = HeadlessEvent::SyncFailed {
            collection: "relationships".into(),
            error: "HTTP 500".into(),
            timestamp: 0,
        };
        let json = serde_json::to_string(&event).expect("serialization failed");
        insta::assert_snapshot!(
            json,
            @r#"{"event":"sync_failed","collection":"relationships","error":"HTTP 500","timestamp":0}"#
        );
    }

    #[test]
    fn test_started_serialization() {
        let event = HeadlessEvent::started("http://127.0.0.1:8000", 3000);
        let json = serde_json::to_string(&event).expect("serialization failed");
        let value: serde_json::Value = serde_json::from_str(&json).expect("invalid JSON");

        assert_eq!(value["event"], "started");
        assert_eq!(value["api"], "http://127.0.0.1:8000");
        assert_eq!(value["interval_ms"], 3000);
        assert!(value["timestamp"].is_number());
    }

    #[test]
    fn test_sync_applied_with_failures_expands() {
        let event = EngineEvent::SyncApplied {
            generation: 4,
            assets: 3,
            methodologies: 0,
            trigger_matches: 1,
            batch_commands: 0,
            relationships: 2,
            failed: vec![
                ("methodologies".into(), "timed out".into()),
                ("batch_commands".into(), "HTTP 502".into()),
            ],
        };

        let events = HeadlessEvent::from_engine_event(&event);
        assert_eq!(events.len(), 3);

        let summary = serde_json::to_value(&events[0]).expect("serialization failed");
        assert_eq!(summary["event"], "sync_completed");
        assert_eq!(summary["generation"], 4);
        assert_eq!(summary["assets"], 3);
        assert_eq!(
            summary["failed"],
            serde_json::json!(["methodologies", "batch_commands"])
        );

        match &events[2] {
            HeadlessEvent::SyncFailed {
                collection, error, ..
            } => {
                assert_eq!(collection, "batch_commands");
                assert_eq!(error, "HTTP 502");
            }
            other => panic!("Expected sync_failed, got {:?}", other),
        }
    }

    #[test]
    fn test_unreachable_connection_carries_error() {
        let event = EngineEvent::ConnectionChanged {
            connection: ConnectionState::Unreachable {
                error: "connection refused".into(),
            },
        };
        let value = serde_json::to_value(&HeadlessEvent::from_engine_event(&event)[0])
            .expect("serialization failed");

        assert_eq!(value["event"], "connection_changed");
        assert_eq!(value["state"], "unreachable");
        assert_eq!(value["error"], "connection refused");
    }

    #[test]
    fn test_notification_level_names() {
        let event = EngineEvent::Notification {
            level: NotificationLevel::Success,
            message: "Asset created".into(),
        };
        let value = serde_json::to_value(&HeadlessEvent::from_engine_event(&event)[0])
            .expect("serialization failed");

        assert_eq!(value["event"], "notification");
        assert_eq!(value["level"], "success");
        assert_eq!(value["message"], "Asset created");
    }

    #[test]
    fn test_write_to_emits_one_line() {
        let mut out = Vec::new();
        HeadlessEvent::shutdown()
            .write_to(&mut out)
            .expect("write failed");

        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.lines().count(), 1);
        assert!(text.ends_with('\n'));
        assert!(text.starts_with(r#"{"event":"shutdown""#));
    }
}
