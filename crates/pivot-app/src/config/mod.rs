//! Configuration file parsing for the Pivot console
//!
//! Supports `.pivot/config.toml` (or any path passed with `--config`).

pub mod settings;
pub mod types;

pub use settings::{default_config_path, init_config_dir, load_settings};
pub use types::*;
