//! Playbook Library tab

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use pivot_app::state::AppState;
use pivot_app::views;
use pivot_core::{category_icon, format_key, truncate, MethodologySummary};

use crate::theme::{icons::IconSet, palette, styles};

const DESCRIPTION_CHARS: usize = 90;

pub struct LibraryTab<'a> {
    state: &'a AppState,
    icons: IconSet,
}

impl<'a> LibraryTab<'a> {
    pub fn new(state: &'a AppState, icons: IconSet) -> Self {
        Self { state, icons }
    }

    fn methodology_item(&self, m: &MethodologySummary) -> ListItem<'static> {
        let mut title = vec![
            Span::raw("  "),
            Span::styled(
                m.name.clone(),
                styles::text_primary().add_modifier(Modifier::BOLD),
            ),
        ];

        if let Some(risk) = &m.risk_level {
            title.push(Span::raw("  "));
            title.push(Span::styled(
                format!("[{}]", risk.to_uppercase()),
                Style::default()
                    .fg(palette::risk(risk))
                    .add_modifier(Modifier::BOLD),
            ));
        }

        title.push(Span::styled(
            format!(
                "  {} triggers · {} steps",
                m.trigger_count, m.step_count
            ),
            styles::text_secondary(),
        ));

        if m.batch_compatible {
            title.push(Span::styled(
                format!("  {} batch", self.icons.batch()),
                styles::status_green(),
            ));
        }

        let mut lines = vec![Line::from(title)];
        if !m.description.is_empty() {
            lines.push(Line::styled(
                format!("    {}", truncate(&m.description, DESCRIPTION_CHARS)),
                styles::text_muted(),
            ));
        }
        ListItem::new(lines)
    }
}

impl Widget for LibraryTab<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let methodologies = &self.state.data.methodologies;
        let block = styles::glass_block(true)
            .title(format!(" Playbook Library ({}) ", methodologies.len()))
            .title_style(styles::accent_bold());
        let inner = block.inner(area);
        block.render(area, buf);

        if methodologies.is_empty() {
            Paragraph::new(Line::styled(
                "No methodologies loaded by the engine.",
                styles::text_muted(),
            ))
            .centered()
            .render(inner, buf);
            return;
        }

        let mut items = Vec::new();
        let mut selected_item = None;
        let mut row = 0;
        for (category, group) in views::library_groups(methodologies) {
            items.push(ListItem::new(Line::styled(
                format!(
                    "{} {} ({})",
                    category_icon(category),
                    format_key(category),
                    group.len()
                ),
                styles::heading(),
            )));
            for methodology in group {
                if row == self.state.library_cursor.selected {
                    selected_item = Some(items.len());
                }
                items.push(self.methodology_item(methodology));
                row += 1;
            }
        }

        let mut list_state = ListState::default().with_selected(selected_item);
        let list = List::new(items).highlight_style(styles::selected_row());
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_text, populated_state, render_widget};
    use pivot_app::config::IconMode;
    use pivot_api::test_utils::test_methodology;

    fn render(state: &AppState) -> Buffer {
        render_widget(LibraryTab::new(state, IconSet::new(IconMode::Unicode)), 120, 20)
    }

    #[test]
    fn test_grouped_by_category() {
        let text = buffer_text(&render(&populated_state()));
        assert!(text.contains("Playbook Library (2)"));
        assert!(text.contains("Exploitation (1)"));
        assert!(text.contains("Recon (1)"));
        assert!(text.contains("Kerberoast"));
        assert!(text.contains("1 triggers · 2 steps"));
    }

    #[test]
    fn test_missing_category_goes_to_uncategorized() {
        let mut state = AppState::new();
        let mut m = test_methodology("m9", "Loose Ends", "x");
        m.category = None;
        state.data.methodologies = vec![m];
        let text = buffer_text(&render(&state));
        assert!(text.contains("Uncategorized (1)"));
    }

    #[test]
    fn test_risk_level_colored() {
        let mut state = AppState::new();
        let mut m = test_methodology("m1", "Spray", "exploitation");
        m.risk_level = Some("critical".into());
        m.batch_compatible = true;
        state.data.methodologies = vec![m];

        let buf = render(&state);
        let text = buffer_text(&buf);
        assert!(text.contains("batch"));
        let (y, line) = text
            .lines()
            .enumerate()
            .find(|(_, l)| l.contains("[CRITICAL]"))
            .expect("risk badge");
        let byte = line.find("[CRITICAL]").expect("badge");
        let x = line[..byte].chars().count() as u16;
        assert_eq!(buf[(x, y as u16)].fg, palette::STATUS_RED);
    }
}
