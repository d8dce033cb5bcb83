//! Message types for the application (TEA pattern)

use pivot_core::{MethodologyDetail, Scenario};

use crate::config::Tab;
use crate::input_key::InputKey;
use crate::sync::SyncSnapshot;

/// Editing operations forwarded to the open form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormInput {
    Char(char),
    Backspace,
    /// Clear the focused field
    Clear,
    Next,
    Prev,
    /// Flip a checkbox or step a select
    Toggle { forward: bool },
    /// Enter: run an action row, otherwise move to the next field
    Activate,
    /// Remove the array item under the cursor
    RemoveItem,
}

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates (toast expiry, spinners)
    Tick,

    /// Quit immediately (signal handler, Ctrl+C)
    Quit,

    /// Quit from the keyboard; closes an open modal first
    RequestQuit,

    // ─────────────────────────────────────────────────────────
    // Synchronization
    // ─────────────────────────────────────────────────────────
    /// Start a sync cycle now
    RefreshRequested,

    /// One sync cycle finished
    SyncCompleted(Box<SyncSnapshot>),

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    SwitchTab(Tab),
    NextTab,
    PrevTab,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,

    // ─────────────────────────────────────────────────────────
    // Asset Filter
    // ─────────────────────────────────────────────────────────
    StartFilter,
    /// Replace the name query
    FilterInput { text: String },
    /// Leave filter input, keeping the query
    EndFilter,
    ClearFilter,
    /// Step the type filter through the types present (then back to none)
    CycleTypeFilter,

    // ─────────────────────────────────────────────────────────
    // Forms
    // ─────────────────────────────────────────────────────────
    OpenCreateAsset,
    /// Edit the selected asset
    OpenEditAsset,
    /// New relationship, sourced from the selected asset when there is one
    OpenRelationshipForm,
    Form(FormInput),
    SubmitForm,
    CloseModal,

    // ─────────────────────────────────────────────────────────
    // Mutation Results
    // ─────────────────────────────────────────────────────────
    AssetSaved {
        created: bool,
        name: String,
        triggered_matches: u32,
        generated_commands: u32,
    },
    AssetDeleted {
        name: String,
    },
    RelationshipCreated {
        relationship_type: String,
    },
    /// A mutation was rejected or never reached the engine
    MutationFailed {
        /// Prefix for the toast, e.g. "Failed to save asset"
        context: String,
        error: String,
    },

    // ─────────────────────────────────────────────────────────
    // Confirm Dialog
    // ─────────────────────────────────────────────────────────
    RequestDeleteAsset,
    ConfirmDeleteAsset {
        id: String,
        name: String,
    },
    ConfirmDialogAccept,
    ConfirmDialogCancel,

    // ─────────────────────────────────────────────────────────
    // Methodology Detail
    // ─────────────────────────────────────────────────────────
    /// Open the detail modal for the selected methodology
    OpenMethodologyDetail,
    MethodologyLoaded {
        token: u64,
        detail: Box<MethodologyDetail>,
    },
    MethodologyFailed {
        token: u64,
        error: String,
    },
    DetailScrollUp,
    DetailScrollDown,

    // ─────────────────────────────────────────────────────────
    // Demo Scenarios
    // ─────────────────────────────────────────────────────────
    OpenScenarioPicker,
    ScenarioPickerNext,
    ScenarioPickerPrev,
    RunScenario(Scenario),
    ScenarioCompleted(Scenario),
    /// Ask before resetting the engine
    RequestReset,
    ConfirmReset,
    ResetCompleted,
}
