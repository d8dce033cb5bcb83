//! Settings file loading

use std::path::{Path, PathBuf};

use pivot_core::prelude::*;

use super::types::Settings;

const PIVOT_DIR: &str = ".pivot";
const CONFIG_FILENAME: &str = "config.toml";

/// Default location of the settings file, relative to `base`
pub fn default_config_path(base: &Path) -> PathBuf {
    base.join(PIVOT_DIR).join(CONFIG_FILENAME)
}

/// Load settings from `config_path`.
///
/// A missing or unreadable file yields defaults; the console never refuses to
/// start because of its config.
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Write a commented default config under `base/.pivot/` if none exists
pub fn init_config_dir(base: &Path) -> Result<PathBuf> {
    let pivot_dir = base.join(PIVOT_DIR);

    if !pivot_dir.exists() {
        std::fs::create_dir_all(&pivot_dir)
            .map_err(|e| Error::config(format!("Failed to create .pivot dir: {}", e)))?;
    }

    let config_path = pivot_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# Pivot console configuration

[api]
base_url = "http://127.0.0.1:8000"
timeout_ms = 5000

[sync]
interval_ms = 3000

[ui]
icons = "unicode"          # "unicode" | "nerd_fonts"
default_tab = "assets"     # "assets" | "queue" | "library" | "topology"
confirm_delete = true

[forms]
preserve_unknown_properties = true
default_confidence = 1.0
"#;
        std::fs::write(&config_path, default_content)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(config_path)
}
