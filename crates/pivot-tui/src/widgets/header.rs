//! Header widget
//!
//! Title with connection dot, engine stats, and the tab bar.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Tabs, Widget},
};

use pivot_app::config::Tab;
use pivot_app::state::ConnectionState;
use pivot_core::Stats;

use crate::theme::{palette, styles};

pub struct Header<'a> {
    stats: &'a Stats,
    tab: Tab,
    connection: &'a ConnectionState,
}

impl<'a> Header<'a> {
    pub fn new(stats: &'a Stats, tab: Tab, connection: &'a ConnectionState) -> Self {
        Self {
            stats,
            tab,
            connection,
        }
    }

    fn title_line(&self) -> Line<'static> {
        let (dot, _, dot_style) = styles::connection_indicator(self.connection);

        let mut spans = vec![
            Span::raw(" "),
            Span::styled(dot, dot_style),
            Span::raw(" "),
            Span::styled("Pivot Console", styles::accent_bold()),
            Span::styled("  │  ", styles::text_muted()),
        ];

        let counters = [
            ("Assets", self.stats.total_assets),
            ("Methodologies", self.stats.total_methodologies),
            ("Matches", self.stats.total_trigger_matches),
            ("Commands", self.stats.total_batch_commands),
            ("Pending", self.stats.pending_commands),
        ];
        for (i, (label, count)) in counters.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" · ", styles::text_muted()));
            }
            spans.push(Span::styled(format!("{label} "), styles::text_secondary()));
            let count_style = if label == "Pending" && count > 0 {
                styles::status_amber().add_modifier(Modifier::BOLD)
            } else {
                styles::text_bright_bold()
            };
            spans.push(Span::styled(count.to_string(), count_style));
        }

        Line::from(spans)
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        buf.set_line(inner.x, inner.y, &self.title_line(), inner.width);

        if inner.height < 2 {
            return;
        }

        let titles = Tab::ALL
            .iter()
            .map(|tab| Line::from(format!("{} {}", tab.index() + 1, tab.label())));
        let tabs = Tabs::new(titles)
            .select(self.tab.index())
            .style(styles::text_secondary())
            .highlight_style(
                Style::default()
                    .fg(palette::ACCENT)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider(Span::styled("│", styles::text_muted()));

        tabs.render(Rect::new(inner.x, inner.y + 1, inner.width, 1), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_text, render_widget};

    fn stats() -> Stats {
        Stats {
            total_assets: 12,
            total_methodologies: 8,
            total_trigger_matches: 3,
            total_batch_commands: 5,
            pending_commands: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_header_shows_stats_and_tabs() {
        let stats = stats();
        let buf = render_widget(
            Header::new(&stats, Tab::Queue, &ConnectionState::Connected),
            140,
            4,
        );
        let text = buffer_text(&buf);

        assert!(text.contains("Pivot Console"));
        assert!(text.contains("Assets 12"));
        assert!(text.contains("Methodologies 8"));
        assert!(text.contains("Pending 2"));
        assert!(text.contains("1 Assets"));
        assert!(text.contains("2 Attack Queue"));
        assert!(text.contains("4 Network Diagram"));
    }

    #[test]
    fn test_selected_tab_is_highlighted() {
        let stats = Stats::default();
        let buf = render_widget(
            Header::new(&stats, Tab::Library, &ConnectionState::Unknown),
            140,
            4,
        );
        let row: String = (0..140).map(|x| buf[(x, 2)].symbol()).collect();
        let col = row.find("3 Playbook").expect("tab title rendered");
        // `find` is a byte offset; the row before the title is plain ASCII
        let x = row[..col].chars().count() as u16;
        assert_eq!(buf[(x, 2)].fg, palette::ACCENT);
    }

    #[test]
    fn test_header_survives_one_row() {
        let stats = Stats::default();
        render_widget(
            Header::new(&stats, Tab::Assets, &ConnectionState::Unknown),
            30,
            3,
        );
    }
}
