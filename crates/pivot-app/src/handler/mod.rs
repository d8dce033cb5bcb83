//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `forms`: Asset/relationship form handlers
//! - `sync`: Applying sync snapshots to state

pub(crate) mod forms;
pub(crate) mod keys;
pub(crate) mod sync;
pub(crate) mod update;


use pivot_core::{AssetDraft, RelationshipDraft, Scenario};

use crate::message::Message;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Ask the sync loop for an immediate cycle
    RefreshNow,

    /// Create (`id: None`) or update an asset
    SaveAsset {
        id: Option<String>,
        draft: AssetDraft,
    },

    DeleteAsset {
        id: String,
        name: String,
    },

    CreateRelationship(RelationshipDraft),

    /// Load one methodology for the detail modal; `token` tags the response
    FetchMethodology {
        id: String,
        token: u64,
    },

    RunScenario(Scenario),

    ResetEngine,
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
