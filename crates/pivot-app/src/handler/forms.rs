//! Asset and relationship form handlers

use pivot_core::prelude::*;

use super::{UpdateAction, UpdateResult};
use crate::form::{AssetFormState, FormMode, RelationshipFormState};
use crate::message::FormInput;
use crate::state::{AppState, UiMode};

pub fn open_create_asset(state: &mut AppState) -> UpdateResult {
    state.close_modal();
    state.asset_form = Some(AssetFormState::create(&state.settings.forms));
    state.ui_mode = UiMode::AssetForm;
    UpdateResult::none()
}

pub fn open_edit_asset(state: &mut AppState) -> UpdateResult {
    let Some(form) = state
        .selected_asset()
        .map(|asset| AssetFormState::edit(asset, &state.settings.forms))
    else {
        return UpdateResult::none();
    };
    state.close_modal();
    state.asset_form = Some(form);
    state.ui_mode = UiMode::AssetForm;
    UpdateResult::none()
}

pub fn open_relationship_form(state: &mut AppState) -> UpdateResult {
    if state.data.assets.len() < 2 {
        state.notify_info("Add at least two assets to create a relationship");
        return UpdateResult::none();
    }
    let source = state.selected_asset().map(|a| a.id.clone());
    let form = RelationshipFormState::new(
        &state.data.assets,
        source.as_deref(),
        &state.settings.forms,
    );
    state.close_modal();
    state.relationship_form = Some(form);
    state.ui_mode = UiMode::RelationshipForm;
    UpdateResult::none()
}

pub fn handle_form_input(state: &mut AppState, input: FormInput) -> UpdateResult {
    let Some(form) = state.active_form_mut() else {
        return UpdateResult::none();
    };
    if form.is_submitting() {
        return UpdateResult::none();
    }

    match input {
        FormInput::Next => form.focus_next(),
        FormInput::Prev => form.focus_prev(),
        FormInput::Activate => {
            if !form.activate() {
                form.focus_next();
            }
        }
        edit => {
            form.set_error(None);
            match edit {
                FormInput::Char(c) => form.input_char(c),
                FormInput::Backspace => form.backspace(),
                FormInput::Clear => form.clear(),
                FormInput::Toggle { forward } => form.toggle(forward),
                FormInput::RemoveItem => {
                    form.remove_item();
                }
                FormInput::Next | FormInput::Prev | FormInput::Activate => {}
            }
        }
    }
    UpdateResult::none()
}

/// Validate the open form and hand the request to the event loop.
///
/// Validation failures stay inline; nothing is sent.
pub fn submit_form(state: &mut AppState) -> UpdateResult {
    match state.ui_mode {
        UiMode::AssetForm => {
            let Some(form) = state.asset_form.as_mut() else {
                return UpdateResult::none();
            };
            if form.submitting {
                return UpdateResult::none();
            }
            match form.to_draft() {
                Ok(draft) => {
                    form.error = None;
                    form.submitting = true;
                    let id = match &form.mode {
                        FormMode::Create => None,
                        FormMode::Edit { id } => Some(id.clone()),
                    };
                    UpdateResult::action(UpdateAction::SaveAsset { id, draft })
                }
                Err(e) => {
                    debug!("Asset form rejected: {}", e);
                    form.error = Some(e.user_message());
                    UpdateResult::none()
                }
            }
        }
        UiMode::RelationshipForm => {
            let Some(form) = state.relationship_form.as_mut() else {
                return UpdateResult::none();
            };
            if form.submitting {
                return UpdateResult::none();
            }
            match form.to_draft() {
                Ok(draft) => {
                    form.error = None;
                    form.submitting = true;
                    UpdateResult::action(UpdateAction::CreateRelationship(draft))
                }
                Err(e) => {
                    debug!("Relationship form rejected: {}", e);
                    form.error = Some(e.user_message());
                    UpdateResult::none()
                }
            }
        }
        _ => UpdateResult::none(),
    }
}

pub fn handle_asset_saved(
    state: &mut AppState,
    created: bool,
    name: &str,
    triggered_matches: u32,
    generated_commands: u32,
) -> UpdateResult {
    if state.ui_mode == UiMode::AssetForm {
        state.close_modal();
    }

    let mut message = if created {
        "Asset created successfully!".to_string()
    } else {
        "Asset updated successfully!".to_string()
    };
    if triggered_matches > 0 || generated_commands > 0 {
        message.push_str(&format!(
            " {} methodologies triggered, {} commands generated",
            triggered_matches, generated_commands
        ));
    }
    info!("Saved asset {} (created: {})", name, created);
    state.notify_success(message);
    UpdateResult::action(UpdateAction::RefreshNow)
}

pub fn handle_relationship_created(state: &mut AppState, relationship_type: &str) -> UpdateResult {
    if state.ui_mode == UiMode::RelationshipForm {
        state.close_modal();
    }
    state.notify_success(format!("Relationship created: {}", relationship_type));
    UpdateResult::action(UpdateAction::RefreshNow)
}

/// Report a failed mutation; an open form keeps its draft for another try
pub fn handle_mutation_failed(state: &mut AppState, context: &str, error: &str) -> UpdateResult {
    warn!("{}: {}", context, error);
    state.busy = None;
    if let Some(form) = state.active_form_mut() {
        if form.is_submitting() {
            form.set_error(Some(error.to_string()));
        }
    }
    if let Some(form) = state.asset_form.as_mut() {
        form.submitting = false;
    }
    if let Some(form) = state.relationship_form.as_mut() {
        form.submitting = false;
    }
    state.notify_error(format!("{}: {}", context, error));
    UpdateResult::none()
}
