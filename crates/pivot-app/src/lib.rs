//! pivot-app - Application state and orchestration for the Pivot console
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state management,
//! the Engine abstraction for shared orchestration, configuration loading, the
//! schema-driven form engine and the polling synchronizer.

pub mod actions;
pub mod config;
pub mod confirm_dialog;
pub mod engine;
pub mod engine_event;
pub mod form;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod process;
pub mod signals;
pub mod state;
pub mod sync;
pub mod views;

// Re-export primary types
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::{FormInput, Message};
pub use state::AppState;
pub use sync::{SyncHandle, SyncSnapshot};
