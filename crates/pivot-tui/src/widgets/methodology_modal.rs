//! Methodology detail modal

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use pivot_app::state::{DetailState, MethodologyView};
use pivot_core::{category_icon, format_key, format_value, MethodologyDetail};

use super::modal_overlay;
use crate::theme::{palette, styles};

pub struct MethodologyModal<'a> {
    view: &'a MethodologyView,
    tick: u64,
}

impl<'a> MethodologyModal<'a> {
    pub fn new(view: &'a MethodologyView, tick: u64) -> Self {
        Self { view, tick }
    }
}

fn section(title: &str) -> Line<'static> {
    Line::styled(
        title.to_string(),
        styles::accent_bold().add_modifier(Modifier::UNDERLINED),
    )
}

fn bullets(items: &[String], lines: &mut Vec<Line<'static>>) {
    for item in items {
        lines.push(Line::styled(format!("  • {item}"), styles::text_primary()));
    }
}

/// Full detail as styled lines, in reading order
pub fn detail_lines(detail: &MethodologyDetail) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let category = detail.category.as_deref().unwrap_or("uncategorized");
    let mut header = vec![
        Span::styled(
            format!("{} {}", category_icon(category), format_key(category)),
            styles::text_secondary(),
        ),
    ];
    if let Some(risk) = &detail.risk_level {
        header.push(Span::styled("  ·  risk ", styles::text_muted()));
        header.push(Span::styled(
            risk.to_uppercase(),
            Style::default()
                .fg(palette::risk(risk))
                .add_modifier(Modifier::BOLD),
        ));
    }
    if detail.batch_compatible {
        header.push(Span::styled("  ·  batch compatible", styles::status_green()));
    }
    lines.push(Line::from(header));
    lines.push(Line::default());

    if !detail.description.is_empty() {
        lines.push(Line::styled(detail.description.clone(), styles::text_primary()));
        lines.push(Line::default());
    }

    if !detail.triggers.is_empty() {
        lines.push(section("Triggers"));
        for trigger in &detail.triggers {
            let mut text = format!("  • [{}] {}", trigger.trigger_type, trigger.description);
            if let Some(asset_type) = &trigger.asset_type {
                text.push_str(&format!(" ({})", format_key(asset_type)));
            }
            lines.push(Line::from(vec![
                Span::styled(text, styles::text_primary()),
                Span::styled(format!("  priority {}", trigger.priority), styles::text_muted()),
            ]));
        }
        lines.push(Line::default());
    }

    if !detail.steps.is_empty() {
        lines.push(section("Steps"));
        let mut steps: Vec<_> = detail.steps.iter().collect();
        steps.sort_by_key(|s| s.order);
        for (i, step) in steps.into_iter().enumerate() {
            let mut title = vec![Span::styled(
                format!("  {}. {}", i + 1, step.name),
                styles::text_bright_bold(),
            )];
            if step.requires_confirmation {
                title.push(Span::styled("  confirm first", styles::status_amber()));
            }
            if let Some(timeout) = step.timeout_seconds {
                title.push(Span::styled(format!("  {timeout}s timeout"), styles::text_muted()));
            }
            lines.push(Line::from(title));
            if !step.description.is_empty() {
                lines.push(Line::styled(
                    format!("     {}", step.description),
                    styles::text_secondary(),
                ));
            }
            if !step.command.is_empty() {
                lines.push(Line::from(vec![
                    Span::styled("     $ ", styles::accent()),
                    Span::styled(step.command.clone(), styles::text_primary()),
                ]));
            }
        }
        lines.push(Line::default());
    }

    let meta = &detail.metadata;
    if !meta.tools.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Tools: ", styles::accent_bold()),
            Span::styled(meta.tools.join(", "), styles::text_primary()),
        ]));
        lines.push(Line::default());
    }

    if !meta.risk_warning.is_empty() {
        lines.push(Line::styled(
            format!("⚠ {}", meta.risk_warning),
            styles::status_amber().add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::default());
    }

    if !meta.expected_outcomes.is_empty() {
        lines.push(section("Expected Outcomes"));
        bullets(&meta.expected_outcomes, &mut lines);
        lines.push(Line::default());
    }

    if !meta.common_issues.is_empty() {
        lines.push(section("Common Issues"));
        bullets(&meta.common_issues, &mut lines);
        lines.push(Line::default());
    }

    if !meta.troubleshooting.is_empty() {
        lines.push(section("Troubleshooting"));
        for (key, value) in &meta.troubleshooting {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}: ", format_key(key)), styles::text_secondary()),
                Span::styled(format_value(value), styles::text_primary()),
            ]));
        }
    }

    lines
}

impl Widget for MethodologyModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = modal_overlay::centered_rect_percent(80, 85, area);
        modal_overlay::prepare_modal(buf, area, modal);

        let title = format!(" {} ", self.view.name);
        let block = styles::modal_block(&title);
        let inner = block.inner(modal);
        block.render(modal, buf);

        if inner.height < 2 {
            return;
        }

        let [body, hint] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        match &self.view.detail {
            DetailState::Loading => {
                const SPINNER: &[&str] = &["◐", "◓", "◑", "◒"];
                let frame = SPINNER[(self.tick as usize) % SPINNER.len()];
                Paragraph::new(Line::styled(
                    format!("{frame} Loading methodology…"),
                    styles::accent(),
                ))
                .centered()
                .render(body, buf);
            }
            DetailState::Failed(error) => {
                Paragraph::new(Line::styled(
                    format!("Failed to load methodology: {error}"),
                    styles::status_red(),
                ))
                .wrap(Wrap { trim: true })
                .render(body, buf);
            }
            DetailState::Loaded(detail) => {
                Paragraph::new(detail_lines(detail))
                    .wrap(Wrap { trim: false })
                    .scroll((self.view.scroll, 0))
                    .render(body, buf);
            }
        }

        buf.set_line(
            hint.x,
            hint.y,
            &Line::styled(" ↑↓ scroll · Esc close", styles::keybinding()),
            hint.width,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_text, render_widget};
    use pivot_core::{MethodologyMetadata, MethodologyStep, TriggerSpec};
    use serde_json::json;

    fn detail() -> MethodologyDetail {
        let mut metadata = MethodologyMetadata {
            tools: vec!["nmap".into(), "masscan".into()],
            risk_warning: "Noisy scan".into(),
            expected_outcomes: vec!["Open ports".into()],
            common_issues: vec!["Rate limiting".into()],
            ..Default::default()
        };
        metadata
            .troubleshooting
            .insert("slow_scan".into(), json!("Lower the timing template"));

        MethodologyDetail {
            id: "m1".into(),
            name: "Nmap Sweep".into(),
            description: "Discover live hosts".into(),
            category: Some("recon".into()),
            risk_level: Some("low".into()),
            batch_compatible: true,
            triggers: vec![TriggerSpec {
                id: "t1".into(),
                trigger_type: "asset_discovered".into(),
                description: "New segment".into(),
                priority: 5,
                asset_type: Some("network_segment".into()),
                required_properties: Default::default(),
                required_count: 1,
                deduplication: Default::default(),
            }],
            steps: vec![
                MethodologyStep {
                    id: "s2".into(),
                    name: "Service scan".into(),
                    description: String::new(),
                    command: "nmap -sV {target}".into(),
                    order: 2,
                    timeout_seconds: None,
                    requires_confirmation: true,
                },
                MethodologyStep {
                    id: "s1".into(),
                    name: "Ping sweep".into(),
                    description: "ICMP first".into(),
                    command: "nmap -sn {cidr}".into(),
                    order: 1,
                    timeout_seconds: Some(300),
                    requires_confirmation: false,
                },
            ],
            metadata,
        }
    }

    fn all_text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_detail_sections_in_order() {
        let text = all_text(&detail_lines(&detail()));
        let order = [
            "Discover live hosts",
            "Triggers",
            "[asset_discovered] New segment (Network Segment)",
            "Steps",
            "1. Ping sweep",
            "$ nmap -sn {cidr}",
            "2. Service scan",
            "Tools: nmap, masscan",
            "⚠ Noisy scan",
            "Expected Outcomes",
            "Common Issues",
            "Troubleshooting",
            "Slow Scan: Lower the timing template",
        ];
        let mut last = 0;
        for needle in order {
            let at = text[last..]
                .find(needle)
                .unwrap_or_else(|| panic!("missing or out of order: {needle}"));
            last += at;
        }
    }

    #[test]
    fn test_step_flags() {
        let text = all_text(&detail_lines(&detail()));
        assert!(text.contains("confirm first"));
        assert!(text.contains("300s timeout"));
    }

    #[test]
    fn test_loading_and_failed_states() {
        let mut view = MethodologyView {
            id: "m1".into(),
            name: "Nmap Sweep".into(),
            token: 1,
            detail: DetailState::Loading,
            scroll: 0,
        };
        let text = buffer_text(&render_widget(MethodologyModal::new(&view, 0), 100, 30));
        assert!(text.contains("Nmap Sweep"));
        assert!(text.contains("Loading methodology…"));

        view.detail = DetailState::Failed("Methodology m1 not found".into());
        let text = buffer_text(&render_widget(MethodologyModal::new(&view, 0), 100, 30));
        assert!(text.contains("Methodology m1 not found"));
    }

    #[test]
    fn test_scroll_hides_first_lines() {
        let view = MethodologyView {
            id: "m1".into(),
            name: "Nmap Sweep".into(),
            token: 1,
            detail: DetailState::Loaded(Box::new(detail())),
            scroll: 2,
        };
        let text = buffer_text(&render_widget(MethodologyModal::new(&view, 0), 100, 30));
        assert!(!text.contains("risk LOW"));
        assert!(text.contains("Discover live hosts"));
    }
}
