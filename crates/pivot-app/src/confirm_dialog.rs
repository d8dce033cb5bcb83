//! Confirm dialog state.
//!
//! Data model for yes/no prompts. The widget lives in
//! `pivot_tui::widgets::confirm_dialog`.

use pivot_core::Asset;

use crate::message::Message;

#[derive(Debug, Clone)]
pub struct ConfirmDialogState {
    pub title: String,
    pub message: String,
    /// Extra line rendered in the warning color
    pub warning: Option<String>,
    /// Sent when the user confirms
    pub on_confirm: Message,
}

impl ConfirmDialogState {
    pub fn new(title: impl Into<String>, message: impl Into<String>, on_confirm: Message) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            warning: None,
            on_confirm,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    pub fn delete_asset(asset: &Asset) -> Self {
        Self::new(
            "Delete Asset?",
            format!("Delete \"{}\"?", asset.name),
            Message::ConfirmDeleteAsset {
                id: asset.id.clone(),
                name: asset.name.clone(),
            },
        )
        .with_warning("Its relationships are removed by the engine.")
    }

    pub fn reset_engine() -> Self {
        Self::new(
            "Reset Engine?",
            "Clear all assets, matches and commands?",
            Message::ConfirmReset,
        )
        .with_warning("This cannot be undone.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivot_api::test_utils::test_asset;

    #[test]
    fn test_delete_asset_dialog_carries_id() {
        let dialog = ConfirmDialogState::delete_asset(&test_asset("a7", "host", "web-01"));
        assert!(dialog.message.contains("web-01"));
        assert!(matches!(
            dialog.on_confirm,
            Message::ConfirmDeleteAsset { ref id, .. } if id == "a7"
        ));
    }
}
