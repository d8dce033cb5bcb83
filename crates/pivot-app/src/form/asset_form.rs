//! Create/edit asset modal state

use pivot_core::prelude::*;
use pivot_core::{asset_types, schema_for, Asset, AssetDraft};

use super::{confidence_text, parse_confidence, FormControls, FormDraftState, FormRow};
use crate::config::FormSettings;

/// Type, name and confidence precede the property controls
const HEADER_SLOTS: usize = 3;
const TYPE_SLOT: usize = 0;
const NAME_SLOT: usize = 1;
const CONFIDENCE_SLOT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Editing an existing asset; its type is locked
    Edit { id: String },
}

#[derive(Debug, Clone)]
pub struct AssetFormState {
    pub mode: FormMode,
    asset_type: String,
    pub name: String,
    pub confidence: String,
    pub properties: FormDraftState,
    focus: usize,
    preserve_unknown: bool,
    default_confidence: f64,
    pub error: Option<String>,
    /// A request is outstanding; further submits are ignored
    pub submitting: bool,
}

impl AssetFormState {
    pub fn create(settings: &FormSettings) -> Self {
        let asset_type = asset_types()[0].to_string();
        Self {
            mode: FormMode::Create,
            properties: FormDraftState::from_schema(schema_for(&asset_type), None),
            asset_type,
            name: String::new(),
            confidence: confidence_text(settings.default_confidence),
            focus: NAME_SLOT,
            preserve_unknown: settings.preserve_unknown_properties,
            default_confidence: settings.default_confidence,
            error: None,
            submitting: false,
        }
    }

    pub fn edit(asset: &Asset, settings: &FormSettings) -> Self {
        Self {
            mode: FormMode::Edit {
                id: asset.id.clone(),
            },
            asset_type: asset.asset_type.clone(),
            name: asset.name.clone(),
            confidence: confidence_text(asset.confidence),
            properties: FormDraftState::from_schema(
                schema_for(&asset.asset_type),
                Some(&asset.properties),
            )
            .preserve_unknown(settings.preserve_unknown_properties),
            focus: NAME_SLOT,
            preserve_unknown: settings.preserve_unknown_properties,
            default_confidence: settings.default_confidence,
            error: None,
            submitting: false,
        }
    }

    pub fn asset_type(&self) -> &str {
        &self.asset_type
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    /// Switch to another asset type, rebuilding the property controls
    pub fn set_asset_type(&mut self, asset_type: &str) {
        if self.is_edit() || asset_type == self.asset_type {
            return;
        }
        self.asset_type = asset_type.to_string();
        self.properties = FormDraftState::from_schema(schema_for(asset_type), None)
            .preserve_unknown(self.preserve_unknown);
    }

    fn cycle_type(&mut self, forward: bool) {
        let types = asset_types();
        let next = match types.iter().position(|t| *t == self.asset_type) {
            Some(pos) if forward => (pos + 1) % types.len(),
            Some(pos) => (pos + types.len() - 1) % types.len(),
            None => 0,
        };
        self.set_asset_type(types[next]);
    }

    /// Validate and build the request body
    pub fn to_draft(&self) -> Result<AssetDraft> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::validation("Asset name is required"));
        }
        let confidence = parse_confidence(&self.confidence, self.default_confidence)
            .ok_or_else(|| Error::validation("Confidence must be a number between 0 and 1"))?;
        // Engine-created assets may lack required keys; only new ones are held to them
        if !self.is_edit() {
            if let Some(label) = self.properties.missing_required().first() {
                return Err(Error::validation(format!("{label} is required")));
            }
        }

        Ok(AssetDraft {
            asset_type: self.asset_type.clone(),
            name: name.to_string(),
            properties: self.properties.to_properties(),
            confidence,
        })
    }
}

impl FormControls for AssetFormState {
    fn slot_count(&self) -> usize {
        HEADER_SLOTS + self.properties.slot_count()
    }

    fn focus(&self) -> usize {
        self.focus
    }

    fn set_focus(&mut self, focus: usize) {
        self.focus = focus.min(self.slot_count().saturating_sub(1));
    }

    fn input_char(&mut self, c: char) {
        match self.focus {
            TYPE_SLOT => {}
            NAME_SLOT => self.name.push(c),
            CONFIDENCE_SLOT => self.confidence.push(c),
            slot => self.properties.input_char(slot - HEADER_SLOTS, c),
        }
    }

    fn backspace(&mut self) {
        match self.focus {
            TYPE_SLOT => {}
            NAME_SLOT => {
                self.name.pop();
            }
            CONFIDENCE_SLOT => {
                self.confidence.pop();
            }
            slot => self.properties.backspace(slot - HEADER_SLOTS),
        }
    }

    fn clear(&mut self) {
        match self.focus {
            TYPE_SLOT => {}
            NAME_SLOT => self.name.clear(),
            CONFIDENCE_SLOT => self.confidence.clear(),
            slot => self.properties.clear(slot - HEADER_SLOTS),
        }
    }

    fn toggle(&mut self, forward: bool) {
        match self.focus {
            TYPE_SLOT => self.cycle_type(forward),
            NAME_SLOT | CONFIDENCE_SLOT => {}
            slot => self.properties.toggle(slot - HEADER_SLOTS, forward),
        }
    }

    fn activate(&mut self) -> bool {
        self.focus >= HEADER_SLOTS && self.properties.activate(self.focus - HEADER_SLOTS)
    }

    fn remove_item(&mut self) -> bool {
        if self.focus < HEADER_SLOTS || !self.properties.remove_item_at(self.focus - HEADER_SLOTS)
        {
            return false;
        }
        self.set_focus(self.focus);
        true
    }

    fn title(&self) -> String {
        match self.mode {
            FormMode::Create => "Create Asset".to_string(),
            FormMode::Edit { .. } => format!("Edit Asset: {}", self.name),
        }
    }

    fn rows(&self) -> Vec<FormRow> {
        let mut type_row = FormRow::choice(TYPE_SLOT, "Type", &self.asset_type);
        if self.is_edit() {
            type_row.label = "Type (locked)".to_string();
        }

        let mut rows = vec![
            type_row,
            FormRow::text(NAME_SLOT, "Name", &self.name).required(),
            FormRow::text(CONFIDENCE_SLOT, "Confidence", &self.confidence),
            FormRow::heading("Properties", 0),
        ];
        if self.properties.is_empty() {
            rows.push(FormRow::heading("No properties defined for this type", 1));
        } else {
            rows.extend(self.properties.rows(HEADER_SLOTS));
        }
        rows
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    fn is_submitting(&self) -> bool {
        self.submitting
    }
}
