//! Demo scenario picker

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, StatefulWidget, Widget},
};

use pivot_core::Scenario;

use super::modal_overlay;
use crate::theme::styles;

pub struct ScenarioPicker {
    selected: usize,
}

impl ScenarioPicker {
    pub fn new(selected: usize) -> Self {
        Self { selected }
    }
}

impl Widget for ScenarioPicker {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = Scenario::ALL.len() as u16 + 4;
        let modal = modal_overlay::centered_rect(46, height, area);
        modal_overlay::prepare_modal(buf, area, modal);

        let block = styles::modal_block(" Load Demo Scenario ")
            .title_bottom(Line::styled(" Enter run · Esc cancel ", styles::keybinding()));
        let inner = block.inner(modal);
        block.render(modal, buf);

        let items: Vec<ListItem> = Scenario::ALL
            .iter()
            .enumerate()
            .map(|(i, scenario)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {} ", i + 1), styles::keybinding()),
                    Span::styled(scenario.label(), styles::text_primary()),
                    Span::styled(format!("  {}", scenario.slug()), styles::text_muted()),
                ]))
            })
            .collect();

        let mut state = ListState::default().with_selected(Some(self.selected));
        let list = List::new(items)
            .highlight_style(styles::selected_row())
            .highlight_symbol("›");
        let list_area = Rect {
            y: inner.y + 1,
            height: inner.height.saturating_sub(1),
            ..inner
        };
        StatefulWidget::render(list, list_area, buf, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_text, render_widget};

    #[test]
    fn test_lists_every_scenario() {
        let text = buffer_text(&render_widget(ScenarioPicker::new(0), 80, 20));
        assert!(text.contains("Load Demo Scenario"));
        assert!(text.contains("1 Network Discovery"));
        assert!(text.contains("2 NAC Bypass"));
        assert!(text.contains("3 Web Enumeration"));
    }

    #[test]
    fn test_selection_marker() {
        let text = buffer_text(&render_widget(ScenarioPicker::new(1), 80, 20));
        let line = text.lines().find(|l| l.contains("›")).expect("marker");
        assert!(line.contains("NAC Bypass"));
    }
}
