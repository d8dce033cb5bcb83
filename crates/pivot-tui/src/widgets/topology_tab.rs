//! Network Diagram tab
//!
//! Zone columns of styled nodes, the relationship edge list and a tooltip
//! for the focused node.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

use pivot_app::state::AppState;
use pivot_app::views;
use pivot_core::{adjust_color, node_style, style_for_relationship, tooltip, Asset, Relationship};

use crate::theme::{palette, styles};

/// Brightening applied to the focused node
const FOCUS_LIGHTEN: i16 = 60;

/// Height of the edge list and tooltip row
const DETAIL_HEIGHT: u16 = 9;

pub struct TopologyTab<'a> {
    state: &'a AppState,
}

impl<'a> TopologyTab<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn focused(&self) -> Option<&'a Asset> {
        views::topology_order(&self.state.data.assets)
            .get(self.state.topology_cursor.selected)
            .copied()
    }

    fn render_columns(&self, area: Rect, buf: &mut Buffer, focused: Option<&Asset>) {
        let columns = views::topology_columns(&self.state.data.assets);
        let areas = Layout::horizontal(
            columns
                .iter()
                .map(|_| Constraint::Ratio(1, columns.len() as u32)),
        )
        .split(area);

        for ((zone, nodes), column) in columns.iter().zip(areas.iter()) {
            let zone_color = palette::rgb(zone.color());
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(zone_color))
                .title(format!(" {} ({}) ", zone.label(), nodes.len()))
                .title_style(Style::default().fg(zone_color).add_modifier(Modifier::BOLD));
            let inner = block.inner(*column);
            block.render(*column, buf);

            if inner.height == 0 {
                continue;
            }

            let focus_index = focused.and_then(|f| nodes.iter().position(|n| n.id == f.id));
            // Scroll so the focused node stays visible
            let offset = focus_index
                .map(|i| i.saturating_sub(inner.height as usize - 1))
                .unwrap_or(0);

            for (row, node) in nodes
                .iter()
                .skip(offset)
                .take(inner.height as usize)
                .enumerate()
            {
                let line = node_line(node, focus_index == Some(row + offset));
                buf.set_line(inner.x, inner.y + row as u16, &line, inner.width);
            }
        }
    }

    fn render_edges(&self, area: Rect, buf: &mut Buffer, focused: Option<&Asset>) {
        let relationships = &self.state.data.relationships;
        let block = styles::glass_block(false)
            .title(format!(" Relationships ({}) ", relationships.len()))
            .title_style(styles::text_secondary());
        let inner = block.inner(area);
        block.render(area, buf);

        if relationships.is_empty() {
            Paragraph::new(Line::styled(
                "No relationships. Press l to link two assets.",
                styles::text_muted(),
            ))
            .render(inner, buf);
            return;
        }

        let focused_id = focused.map(|a| a.id.as_str());
        let mut edges: Vec<&Relationship> = relationships.iter().collect();
        // Edges touching the focused node first
        edges.sort_by_key(|r| {
            !(Some(r.source_asset_id.as_str()) == focused_id
                || Some(r.target_asset_id.as_str()) == focused_id)
        });

        let items: Vec<ListItem> = edges
            .into_iter()
            .map(|r| ListItem::new(self.edge_line(r, focused_id)))
            .collect();
        Widget::render(List::new(items), inner, buf);
    }

    fn edge_line(&self, relationship: &Relationship, focused_id: Option<&str>) -> Line<'static> {
        let data = &self.state.data;
        let name = |id: &str| {
            data.asset(id)
                .map(|a| a.name.clone())
                .unwrap_or_else(|| id.to_string())
        };

        let style = style_for_relationship(&relationship.relationship_type);
        let mut edge_style = Style::default().fg(palette::rgb(style.color));
        if style.emphasized {
            edge_style = edge_style.add_modifier(Modifier::BOLD);
        }
        let touches_focus = focused_id.is_some_and(|id| {
            relationship.source_asset_id == id || relationship.target_asset_id == id
        });
        let name_style = if touches_focus {
            styles::text_bright_bold()
        } else {
            styles::text_secondary()
        };

        Line::from(vec![
            Span::styled(name(&relationship.source_asset_id), name_style),
            Span::styled(format!(" {}▶ ", style.line.glyph().repeat(3)), edge_style),
            Span::styled(name(&relationship.target_asset_id), name_style),
            Span::styled(
                format!("  {}", relationship.relationship_type),
                styles::text_muted(),
            ),
        ])
    }

    fn render_tooltip(&self, area: Rect, buf: &mut Buffer, focused: Option<&Asset>) {
        let block = styles::glass_block(true)
            .title(" Node ")
            .title_style(styles::accent_bold());

        let lines: Vec<Line> = match focused {
            Some(asset) => tooltip(asset)
                .lines()
                .enumerate()
                .map(|(i, text)| {
                    let style = if i == 0 {
                        styles::text_bright_bold()
                    } else {
                        styles::text_secondary()
                    };
                    Line::styled(text.to_string(), style)
                })
                .collect(),
            None => vec![Line::styled("No assets to show", styles::text_muted())],
        };

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

/// `[▣ web-01]` in the node color, brighter and highlighted when focused
fn node_line(asset: &Asset, focused: bool) -> Line<'static> {
    let style = node_style(asset);
    let (open, close) = style.shape.brackets();

    let span_style = if focused {
        Style::default()
            .fg(palette::rgb(adjust_color(style.color, FOCUS_LIGHTEN)))
            .bg(palette::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette::rgb(style.color))
    };

    Line::from(vec![
        Span::raw(if focused { "›" } else { " " }),
        Span::styled(
            format!("{open}{} {}{close}", style.icon, asset.name),
            span_style,
        ),
    ])
}

impl Widget for TopologyTab<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let focused = self.focused();

        let [columns, details] = Layout::vertical([
            Constraint::Min(4),
            Constraint::Length(DETAIL_HEIGHT),
        ])
        .areas(area);
        self.render_columns(columns, buf, focused);

        let [edges, tip] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(details);
        self.render_edges(edges, buf, focused);
        self.render_tooltip(tip, buf, focused);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_text, populated_state, render_widget};
    use pivot_core::Rgb;

    fn render(state: &AppState) -> Buffer {
        render_widget(TopologyTab::new(state), 150, 24)
    }

    #[test]
    fn test_zone_columns_rendered() {
        let text = buffer_text(&render(&populated_state()));
        assert!(text.contains("Internet (0)"));
        assert!(text.contains("DMZ (1)"));
        assert!(text.contains("Internal (2)"));
        assert!(text.contains("dmz-segment"));
    }

    #[test]
    fn test_edge_list_uses_asset_names() {
        let text = buffer_text(&render(&populated_state()));
        assert!(text.contains("web-01 ━━━▶ db-01"));
        assert!(text.contains("can_pivot_to"));
    }

    #[test]
    fn test_focused_node_is_brightened() {
        let mut state = populated_state();
        // Order: dmz-segment (DMZ), db-01, web-01 (Internal)
        state.topology_cursor.selected = 2;
        let buf = render(&state);
        let text = buffer_text(&buf);

        let (y, line) = text
            .lines()
            .enumerate()
            .find(|(_, l)| l.contains("›"))
            .expect("focus marker");
        assert!(line.contains("web-01"));

        let x = line.chars().position(|c| c == '›').expect("marker") as u16 + 1;
        let base = node_style(&state.data.assets[0]).color;
        let Rgb { r, g, b } = adjust_color(base, FOCUS_LIGHTEN);
        assert_eq!(buf[(x, y as u16)].fg, ratatui::style::Color::Rgb(r, g, b));
        assert_eq!(buf[(x, y as u16)].bg, palette::SELECTED_BG);
    }

    #[test]
    fn test_tooltip_for_focused_node() {
        let mut state = populated_state();
        state.topology_cursor.selected = 2;
        let text = buffer_text(&render(&state));
        assert!(text.contains("web-01 (Host)"));
        assert!(text.contains("Ip: 10.0.0.5"));
    }

    #[test]
    fn test_empty_diagram() {
        let text = buffer_text(&render(&AppState::new()));
        assert!(text.contains("No assets to show"));
        assert!(text.contains("No relationships"));
    }
}
