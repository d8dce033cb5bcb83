//! Main render/view function (View in TEA pattern)

use ratatui::{style::Style, widgets::Block, Frame};

use pivot_app::config::Tab;
use pivot_app::state::{AppState, UiMode};

use crate::layout;
use crate::theme::{icons::IconSet, palette};
use crate::widgets;

/// Render the complete UI (View function in TEA).
///
/// A pure function of the state: tabs first, then the modal for the
/// current mode, then toasts on top of everything.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let icons = IconSet::new(state.settings.ui.icons);

    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let areas = layout::create(area);

    frame.render_widget(
        widgets::Header::new(&state.data.stats, state.tab, &state.sync.connection),
        areas.header,
    );

    match state.tab {
        Tab::Assets => frame.render_widget(widgets::AssetsTab::new(state, icons), areas.content),
        Tab::Queue => frame.render_widget(widgets::QueueTab::new(state, icons), areas.content),
        Tab::Library => {
            frame.render_widget(widgets::LibraryTab::new(state, icons), areas.content)
        }
        Tab::Topology => frame.render_widget(widgets::TopologyTab::new(state), areas.content),
    }

    frame.render_widget(widgets::StatusBar::new(state, icons), areas.status);

    match state.ui_mode {
        UiMode::Normal | UiMode::FilterInput => {}
        UiMode::AssetForm | UiMode::RelationshipForm => {
            if let Some(form) = state.active_form() {
                frame.render_widget(widgets::FormModal::new(form), area);
            }
        }
        UiMode::MethodologyDetail => {
            if let Some(view) = &state.methodology {
                frame.render_widget(
                    widgets::MethodologyModal::new(view, state.tick_count),
                    area,
                );
            }
        }
        UiMode::ConfirmDialog => {
            if let Some(dialog) = &state.confirm_dialog {
                frame.render_widget(widgets::ConfirmDialog::new(dialog), area);
            }
        }
        UiMode::ScenarioPicker => {
            frame.render_widget(
                widgets::ScenarioPicker::new(state.scenario_cursor.selected),
                area,
            );
        }
    }

    if !state.notifications.is_empty() {
        frame.render_widget(
            widgets::Toasts::new(&state.notifications, icons),
            areas.content,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_text, populated_state, render_frame};
    use pivot_app::confirm_dialog::ConfirmDialogState;
    use pivot_app::form::AssetFormState;

    fn render(state: &AppState) -> String {
        buffer_text(&render_frame(140, 40, |frame| view(frame, state)))
    }

    #[test]
    fn test_view_renders_active_tab() {
        let mut state = populated_state();
        assert!(render(&state).contains("Assets (3/3)"));

        state.tab = Tab::Queue;
        assert!(render(&state).contains("Batch Commands (2)"));

        state.tab = Tab::Library;
        assert!(render(&state).contains("Playbook Library (2)"));

        state.tab = Tab::Topology;
        assert!(render(&state).contains("Relationships (1)"));
    }

    #[test]
    fn test_view_draws_form_modal() {
        let mut state = populated_state();
        state.asset_form = Some(AssetFormState::create(&state.settings.forms));
        state.ui_mode = UiMode::AssetForm;
        assert!(render(&state).contains("Create Asset"));
    }

    #[test]
    fn test_view_draws_confirm_dialog() {
        let mut state = populated_state();
        state.show_confirm(ConfirmDialogState::reset_engine());
        assert!(render(&state).contains("Reset Engine?"));
    }

    #[test]
    fn test_view_draws_toasts_over_content() {
        let mut state = populated_state();
        state.notify_success("Asset created successfully!");
        assert!(render(&state).contains("Asset created successfully!"));
    }

    #[test]
    fn test_view_tiny_terminal_does_not_panic() {
        let mut state = populated_state();
        state.ui_mode = UiMode::ScenarioPicker;
        render_frame(20, 6, |frame| view(frame, &state));
    }

    #[test]
    fn test_status_line_snapshot() {
        let state = AppState::new();
        let buf = render_frame(120, 10, |frame| view(frame, &state));
        let status = buffer_text(&buf).lines().last().unwrap_or_default().to_string();
        insta::assert_snapshot!(status.trim(), @"○ Connecting  │  ↻ never                  n new · e edit · d delete · l link · / filter · t type · s scenario · q quit");
    }
}
