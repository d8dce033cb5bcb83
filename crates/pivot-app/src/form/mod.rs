//! Schema-driven forms
//!
//! - `draft`: editable controls built from a property schema
//! - `serialize`: submitted entries back to a property map
//! - `asset_form` / `relationship_form`: the two modal forms built on top

pub mod asset_form;
pub mod draft;
pub mod relationship_form;
pub mod serialize;

pub use asset_form::{AssetFormState, FormMode};
pub use draft::{ArrayItem, FieldValue, FormDraftState, Slot};
pub use relationship_form::{AssetChoice, RelationshipFormState};
pub use serialize::{serialize, FormEntry, FormValue};

/// How a row is drawn
#[derive(Debug, Clone, PartialEq)]
pub enum RowKind {
    /// Section or item heading, not focusable
    Heading,
    Text {
        value: String,
        placeholder: Option<&'static str>,
        masked: bool,
        multiline: bool,
    },
    Checkbox(bool),
    /// Select control; an empty value means nothing chosen
    Choice { value: String },
    /// Button-like row such as "+ Add Network Interfaces"
    Action,
}

/// One line of a rendered form
#[derive(Debug, Clone, PartialEq)]
pub struct FormRow {
    /// Focus index, `None` for headings
    pub slot: Option<usize>,
    /// Indentation level
    pub depth: u8,
    pub label: String,
    pub kind: RowKind,
    pub required: bool,
}

impl FormRow {
    pub fn heading(label: impl Into<String>, depth: u8) -> Self {
        Self {
            slot: None,
            depth,
            label: label.into(),
            kind: RowKind::Heading,
            required: false,
        }
    }

    pub fn text(slot: usize, label: impl Into<String>, value: &str) -> Self {
        Self {
            slot: Some(slot),
            depth: 0,
            label: label.into(),
            kind: RowKind::Text {
                value: value.to_string(),
                placeholder: None,
                masked: false,
                multiline: false,
            },
            required: false,
        }
    }

    pub fn choice(slot: usize, label: impl Into<String>, value: &str) -> Self {
        Self {
            slot: Some(slot),
            depth: 0,
            label: label.into(),
            kind: RowKind::Choice {
                value: value.to_string(),
            },
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Keyboard-level editing shared by the modal forms.
///
/// Forms expose one focus cursor over `slot_count()` controls; the handler
/// maps keys onto these operations.
pub trait FormControls {
    fn slot_count(&self) -> usize;
    fn focus(&self) -> usize;
    fn set_focus(&mut self, focus: usize);

    fn input_char(&mut self, c: char);
    fn backspace(&mut self);
    fn clear(&mut self);
    /// Flip a checkbox or step a select
    fn toggle(&mut self, forward: bool);
    /// Enter on an action row
    fn activate(&mut self) -> bool;
    /// Remove the array item under the cursor
    fn remove_item(&mut self) -> bool;

    /// Title, rows and inline error for rendering
    fn title(&self) -> String;
    fn rows(&self) -> Vec<FormRow>;
    fn error(&self) -> Option<&str>;
    fn set_error(&mut self, error: Option<String>);
    fn is_submitting(&self) -> bool;

    fn focus_next(&mut self) {
        let count = self.slot_count();
        if count > 0 {
            self.set_focus((self.focus() + 1) % count);
        }
    }

    fn focus_prev(&mut self) {
        let count = self.slot_count();
        if count > 0 {
            self.set_focus((self.focus() + count - 1) % count);
        }
    }
}

/// Parse a confidence field: blank means `default`
pub(crate) fn parse_confidence(text: &str, default: f64) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(default);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|c| (0.0..=1.0).contains(c))
}

/// Display text for a confidence value
pub(crate) fn confidence_text(confidence: f64) -> String {
    let text = format!("{:.2}", confidence);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() {
        "0".to_string()
    } else {
        text.to_string()
    }
}
