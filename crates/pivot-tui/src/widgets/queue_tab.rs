//! Attack Queue tab
//!
//! Batch commands grouped by methodology on the left, pending trigger
//! matches on the right.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use pivot_app::state::AppState;
use pivot_app::views;
use pivot_core::{confidence_percent, BatchCommand, TriggerMatch};

use crate::theme::{icons::IconSet, palette, styles};

pub struct QueueTab<'a> {
    state: &'a AppState,
    icons: IconSet,
}

impl<'a> QueueTab<'a> {
    pub fn new(state: &'a AppState, icons: IconSet) -> Self {
        Self { state, icons }
    }

    /// Two-line command card; the left rail is green when batched
    fn command_item(&self, command: &BatchCommand) -> ListItem<'static> {
        let (rail, marker) = if command.batched {
            (palette::STATUS_GREEN, format!("{} BATCHED", self.icons.batch()))
        } else {
            (palette::STATUS_AMBER, "SINGLE".to_string())
        };
        let rail_style = Style::default().fg(rail);
        let targets = if command.target_count == 1 {
            "1 target".to_string()
        } else {
            format!("{} targets", command.target_count)
        };

        ListItem::new(vec![
            Line::from(vec![
                Span::styled("  ▌ ", rail_style),
                Span::styled(marker, rail_style),
                Span::styled(format!(" · {targets}"), styles::text_secondary()),
            ]),
            Line::from(vec![
                Span::styled("  ▌ ", rail_style),
                Span::styled(format!("{} ", self.icons.terminal()), styles::accent()),
                Span::styled(command.command.clone(), styles::text_primary()),
            ]),
        ])
    }

    fn render_commands(&self, area: Rect, buf: &mut Buffer) {
        let commands = &self.state.data.batch_commands;
        let block = styles::glass_block(true)
            .title(format!(" Batch Commands ({}) ", commands.len()))
            .title_style(styles::accent_bold());
        let inner = block.inner(area);
        block.render(area, buf);

        if commands.is_empty() {
            Paragraph::new(Line::styled(
                "No commands queued. Add assets to trigger methodologies.",
                styles::text_muted(),
            ))
            .centered()
            .render(inner, buf);
            return;
        }

        let mut items = Vec::new();
        let mut selected_item = None;
        let mut row = 0;
        for (methodology, group) in views::command_groups(commands) {
            items.push(ListItem::new(Line::styled(
                format!("{methodology} ({})", group.len()),
                styles::heading(),
            )));
            for command in group {
                if row == self.state.queue_cursor.selected {
                    selected_item = Some(items.len());
                }
                items.push(self.command_item(command));
                row += 1;
            }
        }

        let mut list_state = ListState::default().with_selected(selected_item);
        let list = List::new(items).highlight_style(styles::selected_row());
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }

    fn render_matches(&self, area: Rect, buf: &mut Buffer) {
        let pending = pending_matches(&self.state.data.trigger_matches);
        let block = styles::glass_block(false)
            .title(format!(" Pending Matches ({}) ", pending.len()))
            .title_style(styles::text_secondary());
        let inner = block.inner(area);
        block.render(area, buf);

        if pending.is_empty() {
            Paragraph::new(Line::styled("Nothing pending", styles::text_muted()))
                .centered()
                .render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = pending
            .into_iter()
            .map(|m| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!("P{} ", m.priority), styles::status_amber()),
                        Span::styled(m.methodology_name.clone(), styles::text_primary()),
                    ]),
                    Line::from(Span::styled(
                        format!(
                            "   {} confidence · {} assets",
                            confidence_percent(m.confidence),
                            m.matched_assets.len()
                        ),
                        styles::text_muted(),
                    )),
                ])
            })
            .collect();

        Widget::render(List::new(items), inner, buf);
    }
}

/// Unexecuted matches, highest priority first
pub fn pending_matches(matches: &[TriggerMatch]) -> Vec<&TriggerMatch> {
    let mut pending: Vec<&TriggerMatch> = matches.iter().filter(|m| !m.executed).collect();
    pending.sort_by(|a, b| b.priority.cmp(&a.priority));
    pending
}

impl Widget for QueueTab<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [commands, matches] =
            Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)])
                .areas(area);
        self.render_commands(commands, buf);
        self.render_matches(matches, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_text, populated_state, render_widget};
    use pivot_app::config::IconMode;

    fn trigger_match(name: &str, priority: i64, executed: bool) -> TriggerMatch {
        TriggerMatch {
            trigger_id: format!("t-{name}"),
            methodology_id: name.to_lowercase(),
            methodology_name: name.to_string(),
            priority,
            confidence: 0.9,
            matched_assets: vec![],
            matched_at: "2024-01-01T00:00:00".into(),
            executed,
        }
    }

    fn render(state: &AppState) -> Buffer {
        render_widget(QueueTab::new(state, IconSet::new(IconMode::Unicode)), 140, 20)
    }

    #[test]
    fn test_commands_grouped_by_methodology() {
        let text = buffer_text(&render(&populated_state()));
        assert!(text.contains("Batch Commands (2)"));
        assert!(text.contains("Kerberoast (1)"));
        assert!(text.contains("Nmap Sweep (1)"));
        assert!(text.contains("nmap -sV 10.0.0.0/24"));
        assert!(text.contains("BATCHED · 1 target"));
        assert!(text.contains("SINGLE · 1 target"));
    }

    #[test]
    fn test_rail_color_follows_batched_flag() {
        let buf = render(&populated_state());
        let text = buffer_text(&buf);
        for (y, line) in text.lines().enumerate() {
            if line.contains("BATCHED") {
                let x = line.chars().position(|c| c == '▌').expect("rail") as u16;
                assert_eq!(buf[(x, y as u16)].fg, palette::STATUS_GREEN);
            }
            if line.contains("SINGLE") {
                let x = line.chars().position(|c| c == '▌').expect("rail") as u16;
                assert_eq!(buf[(x, y as u16)].fg, palette::STATUS_AMBER);
            }
        }
    }

    #[test]
    fn test_pending_matches_sorted_and_filtered() {
        let matches = vec![
            trigger_match("Low", 1, false),
            trigger_match("Done", 9, true),
            trigger_match("High", 5, false),
        ];
        let pending = pending_matches(&matches);
        let names: Vec<&str> = pending.iter().map(|m| m.methodology_name.as_str()).collect();
        assert_eq!(names, vec!["High", "Low"]);
    }

    #[test]
    fn test_empty_queue_message() {
        let text = buffer_text(&render(&AppState::new()));
        assert!(text.contains("No commands queued"));
        assert!(text.contains("Nothing pending"));
    }
}
