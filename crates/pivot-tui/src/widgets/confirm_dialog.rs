//! Confirmation dialog widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use pivot_app::confirm_dialog::ConfirmDialogState;

use super::modal_overlay;
use crate::theme::styles;

pub struct ConfirmDialog<'a> {
    state: &'a ConfirmDialogState,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(state: &'a ConfirmDialogState) -> Self {
        Self { state }
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = if self.state.warning.is_some() { 8 } else { 7 };
        let modal = modal_overlay::centered_rect(56, height, area);
        modal_overlay::prepare_modal(buf, area, modal);

        let title = format!(" {} ", self.state.title);
        let mut lines = vec![
            Line::default(),
            Line::styled(self.state.message.clone(), styles::text_primary()),
        ];
        if let Some(warning) = &self.state.warning {
            lines.push(Line::styled(warning.clone(), styles::status_amber()));
        }
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("[y]", styles::keybinding()),
            Span::styled(" Yes    ", styles::text_secondary()),
            Span::styled("[n]", styles::keybinding()),
            Span::styled(" No", styles::text_secondary()),
        ]));

        Paragraph::new(lines)
            .block(styles::modal_block(&title))
            .centered()
            .wrap(Wrap { trim: true })
            .render(modal, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_text, render_widget};
    use pivot_api::test_utils::test_asset;

    #[test]
    fn test_delete_dialog_content() {
        let state = ConfirmDialogState::delete_asset(&test_asset("a1", "host", "web-01"));
        let text = buffer_text(&render_widget(ConfirmDialog::new(&state), 80, 20));
        assert!(text.contains("Delete Asset?"));
        assert!(text.contains("Delete \"web-01\"?"));
        assert!(text.contains("relationships are removed"));
        assert!(text.contains("[y] Yes"));
        assert!(text.contains("[n] No"));
    }

    #[test]
    fn test_dialog_in_small_area() {
        let state = ConfirmDialogState::reset_engine();
        let text = buffer_text(&render_widget(ConfirmDialog::new(&state), 30, 6));
        assert!(text.contains("Reset"));
    }
}
