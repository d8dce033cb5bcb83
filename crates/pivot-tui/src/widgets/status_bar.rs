//! Status bar widget
//!
//! One line at the bottom: connection, last successful sync, work in
//! progress, stale collections and key hints for the current mode.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use pivot_app::config::Tab;
use pivot_app::state::{AppState, ConnectionState, UiMode};

use crate::theme::{icons::IconSet, palette, styles};

/// Braille spinner for work in progress; one frame per tick
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct StatusBar<'a> {
    state: &'a AppState,
    icons: IconSet,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState, icons: IconSet) -> Self {
        Self { state, icons }
    }

    fn left_spans(&self) -> Vec<Span<'static>> {
        let sync = &self.state.sync;
        let (dot, label, style) = styles::connection_indicator(&sync.connection);

        let mut spans = vec![
            Span::raw(" "),
            Span::styled(dot, style),
            Span::styled(format!(" {label}"), style),
        ];

        if let ConnectionState::Unreachable { error } = &sync.connection {
            spans.push(Span::styled(format!(" ({error})"), styles::text_muted()));
        }

        let last = sync
            .last_success
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string());
        spans.push(Span::styled("  │  ", styles::text_muted()));
        spans.push(Span::styled(
            format!("{} {last}", self.icons.refresh()),
            styles::text_secondary(),
        ));

        if !sync.failed.is_empty() && sync.connection == ConnectionState::Connected {
            let names: Vec<&str> = sync.failed.iter().map(|(c, _)| *c).collect();
            spans.push(Span::styled("  │  ", styles::text_muted()));
            spans.push(Span::styled(
                format!("{} stale: {}", self.icons.alert(), names.join(", ")),
                styles::status_amber(),
            ));
        }

        if let Some(busy) = &self.state.busy {
            let frame = SPINNER[(self.state.tick_count as usize) % SPINNER.len()];
            spans.push(Span::styled("  │  ", styles::text_muted()));
            spans.push(Span::styled(format!("{frame} {busy}"), styles::accent()));
        }

        spans
    }
}

/// Key hints for the current mode and tab
pub fn key_hints(state: &AppState) -> &'static str {
    match state.ui_mode {
        UiMode::FilterInput => "Enter apply · Esc clear · Ctrl+U erase",
        UiMode::AssetForm | UiMode::RelationshipForm => {
            "Tab next · Enter select · Space toggle · Ctrl+S save · Esc cancel"
        }
        UiMode::MethodologyDetail => "↑↓ scroll · Esc close",
        UiMode::ConfirmDialog => "y confirm · n cancel",
        UiMode::ScenarioPicker => "1-3 run · Enter run · Esc cancel",
        UiMode::Normal => match state.tab {
            Tab::Assets => "n new · e edit · d delete · l link · / filter · t type · s scenario · q quit",
            Tab::Queue => "r refresh · s scenario · R reset · q quit",
            Tab::Library => "Enter details · r refresh · q quit",
            Tab::Topology => "↑↓ focus · e edit · l link · n new · q quit",
        },
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        buf.set_style(area, Style::default().bg(palette::CARD_BG));

        let left = Line::from(self.left_spans());
        let left_width = left.width() as u16;
        buf.set_line(area.x, area.y, &left, area.width);

        let hints = Line::styled(format!("{} ", key_hints(self.state)), styles::keybinding());
        let hints_width = hints.width() as u16;
        // Hints only when they fit next to the status
        if left_width + hints_width + 2 <= area.width {
            buf.set_line(
                area.x + area.width - hints_width,
                area.y,
                &hints,
                hints_width,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_text, render_widget};
    use pivot_app::config::IconMode;

    fn icons() -> IconSet {
        IconSet::new(IconMode::Unicode)
    }

    #[test]
    fn test_status_before_first_sync() {
        let state = AppState::new();
        let text = buffer_text(&render_widget(StatusBar::new(&state, icons()), 160, 1));
        assert!(text.contains("Connecting"));
        assert!(text.contains("never"));
    }

    #[test]
    fn test_status_shows_unreachable_error() {
        let mut state = AppState::new();
        state.sync.connection = ConnectionState::Unreachable {
            error: "connection refused".into(),
        };
        let text = buffer_text(&render_widget(StatusBar::new(&state, icons()), 160, 1));
        assert!(text.contains("Unreachable (connection refused)"));
    }

    #[test]
    fn test_status_lists_stale_collections() {
        let mut state = AppState::new();
        state.sync.connection = ConnectionState::Connected;
        state.sync.failed = vec![("stats", "timeout".into())];
        let text = buffer_text(&render_widget(StatusBar::new(&state, icons()), 160, 1));
        assert!(text.contains("stale: stats"));
    }

    #[test]
    fn test_status_shows_busy_label() {
        let mut state = AppState::new();
        state.busy = Some("Resetting engine…".into());
        let text = buffer_text(&render_widget(StatusBar::new(&state, icons()), 160, 1));
        assert!(text.contains("Resetting engine…"));
    }

    #[test]
    fn test_hints_follow_mode() {
        let mut state = AppState::new();
        assert!(key_hints(&state).contains("/ filter"));
        state.ui_mode = UiMode::ConfirmDialog;
        assert_eq!(key_hints(&state), "y confirm · n cancel");
    }

    #[test]
    fn test_hints_dropped_when_narrow() {
        let state = AppState::new();
        let text = buffer_text(&render_widget(StatusBar::new(&state, icons()), 40, 1));
        assert!(!text.contains("q quit"));
    }
}
