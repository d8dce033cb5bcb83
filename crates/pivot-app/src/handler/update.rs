//! Main update function - handles state transitions (TEA pattern)

use std::time::Instant;

use pivot_core::prelude::*;

use super::{forms, keys, sync, UpdateAction, UpdateResult};
use crate::confirm_dialog::ConfirmDialogState;
use crate::message::Message;
use crate::state::{AppState, DetailState, MethodologyView, UiMode};
use crate::views;

/// Process a message and update state
/// Returns an optional action for the event loop and an optional follow-up
/// message
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => keys::handle_key(state, key)
            .map(UpdateResult::message)
            .unwrap_or_default(),

        Message::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            state.notifications.expire(Instant::now());
            UpdateResult::none()
        }

        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::RequestQuit => {
            if state.ui_mode == UiMode::Normal {
                state.request_quit();
            } else {
                state.close_modal();
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Synchronization
        // ─────────────────────────────────────────────────────────
        Message::RefreshRequested => UpdateResult::action(UpdateAction::RefreshNow),

        Message::SyncCompleted(snapshot) => sync::handle_sync_completed(state, *snapshot),

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::SwitchTab(tab) => {
            state.tab = tab;
            UpdateResult::none()
        }

        Message::NextTab => {
            state.tab = state.tab.next();
            UpdateResult::none()
        }

        Message::PrevTab => {
            state.tab = state.tab.prev();
            UpdateResult::none()
        }

        Message::SelectNext => {
            let len = state.row_count();
            state.cursor_mut().next(len);
            UpdateResult::none()
        }

        Message::SelectPrev => {
            state.cursor_mut().prev();
            UpdateResult::none()
        }

        Message::SelectFirst => {
            state.cursor_mut().first();
            UpdateResult::none()
        }

        Message::SelectLast => {
            let len = state.row_count();
            state.cursor_mut().last(len);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Asset Filter
        // ─────────────────────────────────────────────────────────
        Message::StartFilter => {
            state.ui_mode = UiMode::FilterInput;
            UpdateResult::none()
        }

        Message::FilterInput { text } => {
            state.filter.query = text;
            state.assets_cursor.first();
            UpdateResult::none()
        }

        Message::EndFilter => {
            state.ui_mode = UiMode::Normal;
            UpdateResult::none()
        }

        Message::ClearFilter => {
            state.filter = Default::default();
            state.assets_cursor.first();
            state.ui_mode = UiMode::Normal;
            UpdateResult::none()
        }

        Message::CycleTypeFilter => {
            let types = views::present_types(&state.data.assets);
            let next = match state.filter.asset_type.as_deref() {
                None => types.first(),
                Some(current) => types
                    .iter()
                    .position(|t| *t == current)
                    .and_then(|pos| types.get(pos + 1)),
            };
            state.filter.asset_type = next.map(|t| t.to_string());
            state.assets_cursor.first();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Forms
        // ─────────────────────────────────────────────────────────
        Message::OpenCreateAsset => forms::open_create_asset(state),
        Message::OpenEditAsset => forms::open_edit_asset(state),
        Message::OpenRelationshipForm => forms::open_relationship_form(state),
        Message::Form(input) => forms::handle_form_input(state, input),
        Message::SubmitForm => forms::submit_form(state),

        Message::CloseModal => {
            state.close_modal();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Mutation Results
        // ─────────────────────────────────────────────────────────
        Message::AssetSaved {
            created,
            name,
            triggered_matches,
            generated_commands,
        } => forms::handle_asset_saved(
            state,
            created,
            &name,
            triggered_matches,
            generated_commands,
        ),

        Message::AssetDeleted { name } => {
            state.busy = None;
            state.notify_success(format!("Asset deleted: {}", name));
            UpdateResult::action(UpdateAction::RefreshNow)
        }

        Message::RelationshipCreated { relationship_type } => {
            forms::handle_relationship_created(state, &relationship_type)
        }

        Message::MutationFailed { context, error } => {
            forms::handle_mutation_failed(state, &context, &error)
        }

        // ─────────────────────────────────────────────────────────
        // Confirm Dialog
        // ─────────────────────────────────────────────────────────
        Message::RequestDeleteAsset => {
            let Some(asset) = state.selected_asset() else {
                return UpdateResult::none();
            };
            if state.settings.ui.confirm_delete {
                let dialog = ConfirmDialogState::delete_asset(asset);
                state.show_confirm(dialog);
                UpdateResult::none()
            } else {
                UpdateResult::message(Message::ConfirmDeleteAsset {
                    id: asset.id.clone(),
                    name: asset.name.clone(),
                })
            }
        }

        Message::ConfirmDeleteAsset { id, name } => {
            state.close_modal();
            state.busy = Some(format!("Deleting {}…", name));
            UpdateResult::action(UpdateAction::DeleteAsset { id, name })
        }

        Message::ConfirmDialogAccept => match state.confirm_dialog.take() {
            Some(dialog) => {
                state.close_modal();
                UpdateResult::message(dialog.on_confirm)
            }
            None => {
                state.close_modal();
                UpdateResult::none()
            }
        },

        Message::ConfirmDialogCancel => {
            state.close_modal();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Methodology Detail
        // ─────────────────────────────────────────────────────────
        Message::OpenMethodologyDetail => {
            let Some((id, name)) = state
                .selected_methodology()
                .map(|m| (m.id.clone(), m.name.clone()))
            else {
                return UpdateResult::none();
            };
            let token = state.next_request_token();
            state.close_modal();
            state.methodology = Some(MethodologyView {
                id: id.clone(),
                name,
                token,
                detail: DetailState::Loading,
                scroll: 0,
            });
            state.ui_mode = UiMode::MethodologyDetail;
            UpdateResult::action(UpdateAction::FetchMethodology { id, token })
        }

        Message::MethodologyLoaded { token, detail } => {
            match state.methodology.as_mut() {
                Some(view) if view.token == token => view.detail = DetailState::Loaded(detail),
                _ => debug!("Ignoring stale methodology response (token {})", token),
            }
            UpdateResult::none()
        }

        Message::MethodologyFailed { token, error } => {
            match state.methodology.as_mut() {
                Some(view) if view.token == token => {
                    warn!("Failed to load methodology {}: {}", view.id, error);
                    view.detail = DetailState::Failed(error);
                }
                _ => debug!("Ignoring stale methodology failure (token {})", token),
            }
            UpdateResult::none()
        }

        Message::DetailScrollUp => {
            if let Some(view) = state.methodology.as_mut() {
                view.scroll = view.scroll.saturating_sub(1);
            }
            UpdateResult::none()
        }

        Message::DetailScrollDown => {
            if let Some(view) = state.methodology.as_mut() {
                view.scroll = view.scroll.saturating_add(1);
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Demo Scenarios
        // ─────────────────────────────────────────────────────────
        Message::OpenScenarioPicker => {
            state.close_modal();
            state.scenario_cursor.first();
            state.ui_mode = UiMode::ScenarioPicker;
            UpdateResult::none()
        }

        Message::ScenarioPickerNext => {
            state.scenario_cursor.next(pivot_core::Scenario::ALL.len());
            UpdateResult::none()
        }

        Message::ScenarioPickerPrev => {
            state.scenario_cursor.prev();
            UpdateResult::none()
        }

        Message::RunScenario(scenario) => {
            state.close_modal();
            state.busy = Some(format!("Running {}…", scenario.label()));
            UpdateResult::action(UpdateAction::RunScenario(scenario))
        }

        Message::ScenarioCompleted(scenario) => {
            state.busy = None;
            state.notify_success(format!("Scenario loaded: {}", scenario.label()));
            UpdateResult::action(UpdateAction::RefreshNow)
        }

        Message::RequestReset => {
            state.show_confirm(ConfirmDialogState::reset_engine());
            UpdateResult::none()
        }

        Message::ConfirmReset => {
            state.close_modal();
            state.busy = Some("Resetting engine…".to_string());
            UpdateResult::action(UpdateAction::ResetEngine)
        }

        Message::ResetCompleted => {
            state.busy = None;
            state.filter = Default::default();
            state.notify_success("Engine reset");
            UpdateResult::action(UpdateAction::RefreshNow)
        }
    }
}
