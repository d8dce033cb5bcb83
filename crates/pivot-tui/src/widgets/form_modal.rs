//! Form modal
//!
//! Draws any [`FormControls`] implementation (asset and relationship forms)
//! as a scrolling list of labelled controls with the inline error below.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use unicode_width::UnicodeWidthStr;

use pivot_app::form::{FormControls, FormRow, RowKind};

use super::modal_overlay;
use crate::theme::{palette, styles};

/// Column where control values start
const LABEL_WIDTH: usize = 24;

const FORM_HINTS: &str =
    " Tab/↑↓ move · Enter select · ←→/Space toggle · Ctrl+D remove · Ctrl+S save · Esc cancel";

pub struct FormModal<'a> {
    form: &'a dyn FormControls,
}

impl<'a> FormModal<'a> {
    pub fn new(form: &'a dyn FormControls) -> Self {
        Self { form }
    }
}

/// Pad with spaces to `width` display columns
fn pad_to_width(text: &str, width: usize) -> String {
    let used = text.width();
    format!("{text}{}", " ".repeat(width.saturating_sub(used)))
}

/// One form row as a line; `focused` draws the cursor
pub fn row_line(row: &FormRow, focused: bool) -> Line<'static> {
    let indent = "  ".repeat(row.depth as usize);
    let marker = if focused {
        Span::styled("› ", styles::accent_bold())
    } else {
        Span::raw("  ")
    };
    let label_style = if focused {
        styles::text_bright_bold()
    } else {
        styles::text_secondary()
    };
    let required = if row.required { " *" } else { "" };
    let label = format!("{indent}{}{required}", row.label);
    let padded = pad_to_width(&label, LABEL_WIDTH);

    let input_bg = if focused {
        palette::INPUT_FOCUSED_BG
    } else {
        palette::INPUT_BG
    };

    match &row.kind {
        RowKind::Heading => Line::from(vec![
            Span::raw("  "),
            Span::styled(label, styles::heading().add_modifier(Modifier::UNDERLINED)),
        ]),
        RowKind::Text {
            value,
            placeholder,
            masked,
            multiline,
        } => {
            let mut spans = vec![marker, Span::styled(padded, label_style)];
            if value.is_empty() && !focused {
                spans.push(Span::styled(
                    format!(" {} ", placeholder.unwrap_or("")),
                    Style::default().fg(palette::TEXT_MUTED).bg(input_bg),
                ));
            } else {
                let shown = if *masked {
                    "•".repeat(value.chars().count())
                } else if *multiline {
                    value.replace('\n', " ⏎ ")
                } else {
                    value.clone()
                };
                spans.push(Span::styled(
                    format!(" {shown}"),
                    Style::default().fg(palette::TEXT_PRIMARY).bg(input_bg),
                ));
                if focused {
                    spans.push(Span::styled(
                        "█",
                        Style::default().fg(palette::ACCENT).bg(input_bg),
                    ));
                }
                spans.push(Span::styled(" ", Style::default().bg(input_bg)));
            }
            Line::from(spans)
        }
        RowKind::Checkbox(checked) => {
            let (mark, style) = if *checked {
                ("[x]", styles::status_green())
            } else {
                ("[ ]", styles::text_muted())
            };
            Line::from(vec![
                marker,
                Span::styled(padded, label_style),
                Span::styled(mark, style),
            ])
        }
        RowKind::Choice { value } => {
            let shown = if value.is_empty() {
                Span::styled("select…", styles::text_muted())
            } else {
                Span::styled(value.clone(), styles::text_primary())
            };
            Line::from(vec![
                marker,
                Span::styled(padded, label_style),
                Span::styled("‹ ", styles::accent()),
                shown,
                Span::styled(" ›", styles::accent()),
            ])
        }
        RowKind::Action => Line::from(vec![
            marker,
            Span::styled(
                format!("{indent}+ {}", row.label),
                if focused {
                    styles::accent_bold()
                } else {
                    styles::accent()
                },
            ),
        ]),
    }
}

impl Widget for FormModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width.saturating_sub(8).min(100);
        let height = area.height.saturating_sub(4);
        let modal = modal_overlay::centered_rect(width, height, area);
        modal_overlay::prepare_modal(buf, area, modal);

        let title = format!(" {} ", self.form.title());
        let block = styles::modal_block(&title);
        let inner = block.inner(modal);
        block.render(modal, buf);

        if inner.height < 3 {
            return;
        }

        let [rows_area, error_area, hint_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let rows = self.form.rows();
        let focus = self.form.focus();
        let focused_index = rows.iter().position(|r| r.slot == Some(focus));
        let visible = rows_area.height as usize;
        let offset = focused_index
            .map(|i| i.saturating_sub(visible.saturating_sub(1)))
            .unwrap_or(0);

        for (i, row) in rows.iter().skip(offset).take(visible).enumerate() {
            let line = row_line(row, row.slot == Some(focus));
            buf.set_line(rows_area.x, rows_area.y + i as u16, &line, rows_area.width);
        }

        if let Some(error) = self.form.error() {
            let line = Line::styled(format!(" {error}"), styles::status_red());
            buf.set_line(error_area.x, error_area.y, &line, error_area.width);
        }

        let hint = if self.form.is_submitting() {
            Line::styled(" Saving…", styles::accent())
        } else {
            Line::styled(FORM_HINTS, styles::keybinding())
        };
        buf.set_line(hint_area.x, hint_area.y, &hint, hint_area.width);
    }
}
