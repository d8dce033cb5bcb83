//! Key event handlers for different UI modes

use pivot_core::Scenario;

use crate::config::Tab;
use crate::form::RowKind;
use crate::input_key::InputKey;
use crate::message::{FormInput, Message};
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    match state.ui_mode {
        UiMode::Normal => handle_key_normal(state, key),
        UiMode::FilterInput => handle_key_filter_input(state, key),
        UiMode::AssetForm | UiMode::RelationshipForm => handle_key_form(state, key),
        UiMode::MethodologyDetail => handle_key_methodology_detail(key),
        UiMode::ConfirmDialog => handle_key_confirm_dialog(key),
        UiMode::ScenarioPicker => handle_key_scenario_picker(state, key),
    }
}

fn handle_key_normal(state: &AppState, key: InputKey) -> Option<Message> {
    // Tab-specific bindings take precedence
    let tab_message = match state.tab {
        Tab::Assets => handle_key_assets_tab(state, &key),
        Tab::Library => match key {
            InputKey::Enter => Some(Message::OpenMethodologyDetail),
            _ => None,
        },
        Tab::Topology => match key {
            InputKey::Enter | InputKey::Char('e') => Some(Message::OpenEditAsset),
            InputKey::Char('n') => Some(Message::OpenCreateAsset),
            InputKey::Char('l') => Some(Message::OpenRelationshipForm),
            _ => None,
        },
        Tab::Queue => None,
    };
    if tab_message.is_some() {
        return tab_message;
    }

    if let Some(index) = key.digit_index() {
        return Tab::from_index(index).map(Message::SwitchTab);
    }

    match key {
        InputKey::Char('q') => Some(Message::RequestQuit),
        InputKey::CharCtrl('c') => Some(Message::Quit),

        InputKey::Tab => Some(Message::NextTab),
        InputKey::BackTab => Some(Message::PrevTab),

        InputKey::Char('j') | InputKey::Down => Some(Message::SelectNext),
        InputKey::Char('k') | InputKey::Up => Some(Message::SelectPrev),
        InputKey::Char('g') | InputKey::Home | InputKey::PageUp => Some(Message::SelectFirst),
        InputKey::Char('G') | InputKey::End | InputKey::PageDown => Some(Message::SelectLast),

        InputKey::Char('r') => Some(Message::RefreshRequested),
        InputKey::Char('s') => Some(Message::OpenScenarioPicker),
        InputKey::Char('R') => Some(Message::RequestReset),

        _ => None,
    }
}

fn handle_key_assets_tab(state: &AppState, key: &InputKey) -> Option<Message> {
    match key {
        InputKey::Char('n') => Some(Message::OpenCreateAsset),
        InputKey::Char('e') | InputKey::Enter => Some(Message::OpenEditAsset),
        InputKey::Char('d') => Some(Message::RequestDeleteAsset),
        InputKey::Char('l') => Some(Message::OpenRelationshipForm),
        InputKey::Char('/') => Some(Message::StartFilter),
        InputKey::Char('t') => Some(Message::CycleTypeFilter),
        InputKey::Esc if state.filter.is_active() => Some(Message::ClearFilter),
        _ => None,
    }
}

fn handle_key_filter_input(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::ClearFilter),
        InputKey::Enter => Some(Message::EndFilter),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::CharCtrl('u') => Some(Message::FilterInput {
            text: String::new(),
        }),
        InputKey::Backspace => {
            let mut text = state.filter.query.clone();
            text.pop();
            Some(Message::FilterInput { text })
        }
        InputKey::Char(c) => Some(Message::FilterInput {
            text: format!("{}{}", state.filter.query, c),
        }),
        InputKey::Down => Some(Message::SelectNext),
        InputKey::Up => Some(Message::SelectPrev),
        _ => None,
    }
}

fn handle_key_form(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::CloseModal),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::CharCtrl('s') => Some(Message::SubmitForm),

        InputKey::Tab | InputKey::Down => Some(Message::Form(FormInput::Next)),
        InputKey::BackTab | InputKey::Up => Some(Message::Form(FormInput::Prev)),
        InputKey::Enter => Some(Message::Form(FormInput::Activate)),
        InputKey::Left => Some(Message::Form(FormInput::Toggle { forward: false })),
        InputKey::Right => Some(Message::Form(FormInput::Toggle { forward: true })),

        InputKey::Char(' ') if focused_is_toggle(state) => {
            Some(Message::Form(FormInput::Toggle { forward: true }))
        }
        InputKey::Char(c) => Some(Message::Form(FormInput::Char(c))),
        InputKey::Backspace => Some(Message::Form(FormInput::Backspace)),
        InputKey::CharCtrl('u') => Some(Message::Form(FormInput::Clear)),
        InputKey::CharCtrl('d') => Some(Message::Form(FormInput::RemoveItem)),
        _ => None,
    }
}

/// Space flips checkboxes and steps selects; elsewhere it is typed
fn focused_is_toggle(state: &AppState) -> bool {
    let Some(form) = state.active_form() else {
        return false;
    };
    let focus = form.focus();
    form.rows()
        .iter()
        .find(|row| row.slot == Some(focus))
        .is_some_and(|row| matches!(row.kind, RowKind::Checkbox(_) | RowKind::Choice { .. }))
}

fn handle_key_methodology_detail(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc | InputKey::Enter | InputKey::Char('q') => Some(Message::CloseModal),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::Char('j') | InputKey::Down | InputKey::PageDown => {
            Some(Message::DetailScrollDown)
        }
        InputKey::Char('k') | InputKey::Up | InputKey::PageUp => Some(Message::DetailScrollUp),
        _ => None,
    }
}

fn handle_key_confirm_dialog(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('y' | 'Y') | InputKey::Enter => Some(Message::ConfirmDialogAccept),
        InputKey::Char('n' | 'N') | InputKey::Esc => Some(Message::ConfirmDialogCancel),
        // Force quit with Ctrl+C even in dialog
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

fn handle_key_scenario_picker(state: &AppState, key: InputKey) -> Option<Message> {
    if let Some(index) = key.digit_index() {
        return Scenario::ALL.get(index).copied().map(Message::RunScenario);
    }

    match key {
        InputKey::Esc | InputKey::Char('q') => Some(Message::CloseModal),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::Char('j') | InputKey::Down => Some(Message::ScenarioPickerNext),
        InputKey::Char('k') | InputKey::Up => Some(Message::ScenarioPickerPrev),
        InputKey::Enter => Some(Message::RunScenario(state.selected_scenario())),
        _ => None,
    }
}
