//! Semantic style builders.

use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use pivot_app::state::{ConnectionState, NotificationLevel};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

pub fn text_bright_bold() -> Style {
    Style::default()
        .fg(palette::TEXT_BRIGHT)
        .add_modifier(Modifier::BOLD)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Status styles ---
pub fn status_green() -> Style {
    Style::default().fg(palette::STATUS_GREEN)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn status_amber() -> Style {
    Style::default().fg(palette::STATUS_AMBER)
}

/// Keybinding hints in the status bar and modals
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_AMBER)
}

/// Highlight for the row under the cursor
pub fn selected_row() -> Style {
    Style::default()
        .bg(palette::SELECTED_BG)
        .add_modifier(Modifier::BOLD)
}

/// Group headings inside the tab lists
pub fn heading() -> Style {
    Style::default()
        .fg(palette::TEXT_SECONDARY)
        .add_modifier(Modifier::BOLD)
}

// --- Blocks ---

/// Rounded panel used by every tab and the header
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

/// Rounded popup with a title
pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(accent_bold())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_active())
        .style(Style::default().bg(palette::POPUP_BG))
}

// --- Domain indicators ---

/// Icon, label and style for the engine connection
pub fn connection_indicator(connection: &ConnectionState) -> (&'static str, &'static str, Style) {
    match connection {
        ConnectionState::Unknown => ("○", "Connecting", text_muted()),
        ConnectionState::Connected => ("●", "Connected", status_green()),
        ConnectionState::Unreachable { .. } => ("●", "Unreachable", status_red()),
    }
}

/// Border and text style for a toast
pub fn notification(level: NotificationLevel) -> Style {
    match level {
        NotificationLevel::Success => status_green(),
        NotificationLevel::Info => accent(),
        NotificationLevel::Error => status_red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_indicator_labels() {
        let (_, label, _) = connection_indicator(&ConnectionState::Connected);
        assert_eq!(label, "Connected");

        let (_, label, style) = connection_indicator(&ConnectionState::Unreachable {
            error: "refused".into(),
        });
        assert_eq!(label, "Unreachable");
        assert_eq!(style.fg, Some(palette::STATUS_RED));
    }

    #[test]
    fn test_notification_styles_differ_by_level() {
        assert_ne!(
            notification(NotificationLevel::Success),
            notification(NotificationLevel::Error)
        );
    }
}
