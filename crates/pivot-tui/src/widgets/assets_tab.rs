//! Assets tab
//!
//! Assets grouped by type with icon, confidence and main properties, plus
//! the name/type filter line.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use pivot_app::state::{AppState, UiMode};
use pivot_app::views;
use pivot_core::{
    confidence_percent, format_key, format_value, main_properties, truncate, Asset,
};

use crate::theme::{icons::IconSet, palette, styles};

/// Longest property value shown on an asset row
const ROW_VALUE_CHARS: usize = 24;

pub struct AssetsTab<'a> {
    state: &'a AppState,
    icons: IconSet,
}

impl<'a> AssetsTab<'a> {
    pub fn new(state: &'a AppState, icons: IconSet) -> Self {
        Self { state, icons }
    }

    fn filter_line(&self) -> Line<'static> {
        let filter = &self.state.filter;
        let editing = self.state.ui_mode == UiMode::FilterInput;

        let mut spans = vec![
            Span::styled(format!(" {} ", self.icons.filter()), styles::accent()),
            Span::styled("/", styles::text_muted()),
            Span::styled(filter.query.clone(), styles::text_primary()),
        ];
        if editing {
            spans.push(Span::styled("█", styles::accent()));
        }
        if let Some(asset_type) = &filter.asset_type {
            spans.push(Span::styled("   type: ", styles::text_muted()));
            spans.push(Span::styled(format_key(asset_type), styles::status_amber()));
        }
        Line::from(spans)
    }

    fn asset_item(&self, asset: &Asset) -> ListItem<'static> {
        let color = palette::rgb(pivot_core::style_for_type(&asset.asset_type).color);

        let mut spans = vec![
            Span::raw("  "),
            Span::styled(
                self.icons.asset(&asset.asset_type),
                Style::default().fg(color),
            ),
            Span::raw(" "),
            Span::styled(
                asset.name.clone(),
                styles::text_primary().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                confidence_percent(asset.confidence),
                confidence_style(asset.confidence),
            ),
        ];

        for (key, value) in main_properties(asset) {
            spans.push(Span::styled("  ", styles::text_muted()));
            spans.push(Span::styled(format!("{}: ", format_key(key)), styles::text_muted()));
            spans.push(Span::styled(
                truncate(&format_value(value), ROW_VALUE_CHARS),
                styles::text_secondary(),
            ));
        }

        ListItem::new(Line::from(spans))
    }
}

fn confidence_style(confidence: f64) -> Style {
    if confidence >= 0.8 {
        styles::status_green()
    } else if confidence >= 0.5 {
        styles::status_amber()
    } else {
        styles::status_red()
    }
}

impl Widget for AssetsTab<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let visible = views::visible_assets(state);

        let title = format!(" Assets ({}/{}) ", visible.len(), state.data.assets.len());
        let block = styles::glass_block(true)
            .title(title)
            .title_style(styles::accent_bold());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let show_filter = state.filter.is_active() || state.ui_mode == UiMode::FilterInput;
        let list_area = if show_filter && inner.height > 1 {
            let [filter_area, rest] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
            buf.set_line(
                filter_area.x,
                filter_area.y,
                &self.filter_line(),
                filter_area.width,
            );
            rest
        } else {
            inner
        };

        if visible.is_empty() {
            let message = if state.data.assets.is_empty() {
                "No assets yet. Press n to create one or s to load a demo scenario."
            } else {
                "No assets match the filter. Esc clears it."
            };
            Paragraph::new(Line::styled(message, styles::text_muted()))
                .centered()
                .render(list_area, buf);
            return;
        }

        let mut items = Vec::new();
        let mut selected_item = None;
        let mut row = 0;
        let groups = views::asset_groups(&state.data.assets, |a| state.filter.matches(a));
        for (asset_type, assets) in groups {
            items.push(ListItem::new(Line::styled(
                format!("{} ({})", format_key(asset_type), assets.len()),
                styles::heading(),
            )));
            for asset in assets {
                if row == state.assets_cursor.selected {
                    selected_item = Some(items.len());
                }
                items.push(self.asset_item(asset));
                row += 1;
            }
        }

        let mut list_state = ListState::default().with_selected(selected_item);
        let list = List::new(items).highlight_style(styles::selected_row());
        StatefulWidget::render(list, list_area, buf, &mut list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_text, populated_state, render_widget};
    use pivot_app::config::IconMode;

    fn render(state: &AppState) -> String {
        let icons = IconSet::new(IconMode::Unicode);
        buffer_text(&render_widget(AssetsTab::new(state, icons), 120, 16))
    }

    #[test]
    fn test_assets_grouped_by_type() {
        let text = render(&populated_state());
        assert!(text.contains("Assets (3/3)"));
        assert!(text.contains("Host (2)"));
        assert!(text.contains("Network Segment (1)"));
        // Groups are ordered by type name
        assert!(text.find("Host (2)") < text.find("Network Segment (1)"));
    }

    #[test]
    fn test_asset_row_shows_confidence_and_main_properties() {
        let text = render(&populated_state());
        let row = text
            .lines()
            .find(|l| l.contains("web-01"))
            .expect("web-01 row");
        assert!(row.contains("100%"));
        assert!(row.contains("Ip: 10.0.0.5"));
        assert!(row.contains("Os: Linux"));
    }

    #[test]
    fn test_filter_line_and_count() {
        let mut state = populated_state();
        state.filter.query = "db".into();
        let text = render(&state);
        assert!(text.contains("Assets (1/3)"));
        assert!(text.contains("/db"));
        assert!(text.contains("db-01"));
        assert!(!text.contains("web-01"));
    }

    #[test]
    fn test_empty_states() {
        let text = render(&AppState::new());
        assert!(text.contains("No assets yet"));

        let mut state = populated_state();
        state.filter.query = "nothing-like-this".into();
        let text = render(&state);
        assert!(text.contains("No assets match the filter"));
    }

    #[test]
    fn test_selected_row_is_highlighted() {
        let mut state = populated_state();
        state.assets_cursor.selected = 1;
        let icons = IconSet::new(IconMode::Unicode);
        let buf = render_widget(AssetsTab::new(&state, icons), 120, 16);
        // Row layout: border, "Host (2)", web-01, db-01
        let y = 3;
        let row: String = (0..120).map(|x| buf[(x, y)].symbol()).collect();
        assert!(row.contains("db-01"));
        assert_eq!(buf[(3, y)].bg, palette::SELECTED_BG);
    }
}
