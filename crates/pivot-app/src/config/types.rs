//! Configuration types for the Pivot console

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Application settings (.pivot/config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub sync: SyncSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub forms: FormSettings,
}

/// Engine connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Base URL of the methodology engine
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.max(1))
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Polling settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncSettings {
    /// Delay between sync cycles. Values below 500 are raised to 500.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

/// Icon rendering mode for the TUI.
///
/// Controls whether icons use safe Unicode characters (default) or Nerd Font
/// glyphs, which require a patched font in the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconMode {
    /// Safe Unicode characters that work in all terminals
    #[default]
    Unicode,
    /// Nerd Font glyphs
    NerdFonts,
}

impl std::fmt::Display for IconMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IconMode::Unicode => write!(f, "unicode"),
            IconMode::NerdFonts => write!(f, "nerd_fonts"),
        }
    }
}

/// Top-level console tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Assets,
    Queue,
    Library,
    Topology,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Assets, Tab::Queue, Tab::Library, Tab::Topology];

    /// Zero-based position in the tab bar
    pub fn index(&self) -> usize {
        match self {
            Tab::Assets => 0,
            Tab::Queue => 1,
            Tab::Library => 2,
            Tab::Topology => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Assets => "Assets",
            Tab::Queue => "Attack Queue",
            Tab::Library => "Playbook Library",
            Tab::Topology => "Network Diagram",
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// UI settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default)]
    pub icons: IconMode,

    /// Tab shown at startup
    #[serde(default)]
    pub default_tab: Tab,

    /// Ask before deleting an asset
    #[serde(default = "default_true")]
    pub confirm_delete: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            icons: IconMode::default(),
            default_tab: Tab::default(),
            confirm_delete: true,
        }
    }
}

/// Property form settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormSettings {
    /// Keep properties the schema does not describe when editing an asset
    #[serde(default = "default_true")]
    pub preserve_unknown_properties: bool,

    /// Confidence pre-filled in new asset and relationship forms
    #[serde(default = "default_confidence")]
    pub default_confidence: f64,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            preserve_unknown_properties: true,
            default_confidence: default_confidence(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_interval_ms() -> u64 {
    3000
}

fn default_true() -> bool {
    true
}

fn default_confidence() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(settings.api.timeout_ms, 5000);
        assert_eq!(settings.sync.interval_ms, 3000);
        assert_eq!(settings.ui.icons, IconMode::Unicode);
        assert_eq!(settings.ui.default_tab, Tab::Assets);
        assert!(settings.ui.confirm_delete);
        assert!(settings.forms.preserve_unknown_properties);
        assert_eq!(settings.forms.default_confidence, 1.0);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let settings: Settings = toml::from_str("[ui]\ndefault_tab = \"topology\"\n").unwrap();
        assert_eq!(settings.ui.default_tab, Tab::Topology);
        assert!(settings.ui.confirm_delete);
        assert_eq!(settings.sync.interval_ms, 3000);
    }

    #[test]
    fn test_icon_mode_display() {
        assert_eq!(IconMode::Unicode.to_string(), "unicode");
        assert_eq!(IconMode::NerdFonts.to_string(), "nerd_fonts");
    }

    #[test]
    fn test_tab_cycling_wraps() {
        assert_eq!(Tab::Assets.next(), Tab::Queue);
        assert_eq!(Tab::Topology.next(), Tab::Assets);
        assert_eq!(Tab::Assets.prev(), Tab::Topology);
        assert_eq!(Tab::from_index(2), Some(Tab::Library));
        assert_eq!(Tab::from_index(4), None);
    }
}
